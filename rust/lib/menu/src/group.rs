//! Layout grouping of data permissions under their menu.

use serde::{Deserialize, Serialize};

use crate::forest::Forest;
use crate::model::{NodeId, PermissionRecord};

/// Label for permissions whose menu is missing or unknown.
pub const UNGROUPED_LABEL: &str = "Other";

/// A block of permissions shown under one menu heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGroup {
    pub menu_id: Option<NodeId>,
    pub label: String,
    pub permission_ids: Vec<NodeId>,
}

/// Group permissions by the label of their menu, in first-appearance order.
/// Layout only: selection never looks at groups.
pub fn group_by_menu(records: &[PermissionRecord], menus: &Forest) -> Vec<PermissionGroup> {
    let mut groups: Vec<PermissionGroup> = Vec::new();
    for record in records {
        let menu = record.menu_id.and_then(|m| menus.node(m));
        let (menu_id, label) = match menu {
            Some(node) => (Some(node.id), node.label.clone()),
            None => (None, UNGROUPED_LABEL.to_string()),
        };
        match groups.iter_mut().find(|g| g.menu_id == menu_id) {
            Some(group) => group.permission_ids.push(record.id),
            None => groups.push(PermissionGroup {
                menu_id,
                label,
                permission_ids: vec![record.id],
            }),
        }
    }
    groups
}
