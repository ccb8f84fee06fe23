//! Backend collaborators and the records that cross them.

use async_trait::async_trait;
use campus_core::Session;
use campus_menu::{MenuNode, NodeId, PermissionRecord};
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// A persisted role as fetched for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub menu_ids: Vec<NodeId>,
    #[serde(default)]
    pub data_permission_ids: Vec<NodeId>,
}

/// Atomic role write: both selections plus the form fields in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSavePayload {
    pub menu_ids: Vec<NodeId>,
    pub data_permission_ids: Vec<NodeId>,
    pub name: String,
    pub description: String,
}

/// Read side: identity, menus, permissions, roles.
#[async_trait]
pub trait MenuSource: Send + Sync + 'static {
    /// Exchange credentials for a fresh session.
    async fn login(&self, username: &str, password: &str) -> Result<Session, ConsoleError>;

    /// The full menu forest, nested.
    async fn menus(&self, session: &Session) -> Result<Vec<MenuNode>, ConsoleError>;

    /// The actor's permission records.
    async fn permissions(&self, session: &Session) -> Result<Vec<PermissionRecord>, ConsoleError>;

    async fn role(&self, session: &Session, role_id: i64) -> Result<RoleRecord, ConsoleError>;
}

/// Write side for role edits.
#[async_trait]
pub trait RoleSink: Send + Sync + 'static {
    /// Create (`role_id == None`) or update a role. Returns the role's id.
    async fn save_role(
        &self,
        session: &Session,
        role_id: Option<i64>,
        payload: &RoleSavePayload,
    ) -> Result<i64, ConsoleError>;
}
