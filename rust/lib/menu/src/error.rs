use thiserror::Error;

use crate::NodeId;

/// Malformed tree data from the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),

    #[error("node {id} declares parent {declared:?} but is nested under {actual:?}")]
    ParentMismatch {
        id: NodeId,
        declared: Option<NodeId>,
        actual: Option<NodeId>,
    },

    #[error("node {id} references unknown parent {parent}")]
    UnknownParent { id: NodeId, parent: NodeId },

    #[error("node {0} is part of a parent cycle")]
    Cycle(NodeId),
}

impl From<TreeError> for campus_core::ServiceError {
    fn from(e: TreeError) -> Self {
        campus_core::ServiceError::Internal(format!("malformed menu tree: {}", e))
    }
}
