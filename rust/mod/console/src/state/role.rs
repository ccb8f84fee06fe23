//! Role editor state, stored at `role/editor`.

use std::sync::Arc;

use campus_core::ServiceError;
use campus_flux::state;
use campus_menu::{group_by_menu, Forest, PermissionGroup, PermissionRecord, TreeError, TreeSelection};

use super::app::LoadPhase;
use crate::source::{RoleRecord, RoleSavePayload};

/// An in-progress role edit. Selections are local until `role/save`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDraft {
    /// `None` for a role that has not been created yet.
    pub role_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub menus: TreeSelection,
    pub data_permissions: TreeSelection,
    pub groups: Vec<PermissionGroup>,
}

impl RoleDraft {
    /// Draft over the full menu forest and the flat permission list, seeded
    /// from the persisted role if there is one.
    pub fn new(
        menus: Arc<Forest>,
        permissions: &[PermissionRecord],
        role: Option<&RoleRecord>,
    ) -> Result<Self, TreeError> {
        let flat = Forest::from_leaves(permissions.iter().map(|p| {
            let label = if p.name.is_empty() { &p.code } else { &p.name };
            (p.id, label.clone())
        }))?;
        let groups = group_by_menu(permissions, &menus);

        let (role_id, name, description, menu_ids, permission_ids) = match role {
            Some(r) => (
                Some(r.id),
                r.name.clone(),
                r.description.clone(),
                r.menu_ids.clone(),
                r.data_permission_ids.clone(),
            ),
            None => (None, String::new(), String::new(), Vec::new(), Vec::new()),
        };

        Ok(Self {
            role_id,
            name,
            description,
            menus: TreeSelection::new(menus, menu_ids),
            data_permissions: TreeSelection::new(Arc::new(flat), permission_ids),
            groups,
        })
    }

    pub fn to_payload(&self) -> RoleSavePayload {
        RoleSavePayload {
            menu_ids: self.menus.selected_ids(),
            data_permission_ids: self.data_permissions.selected_ids(),
            name: self.name.trim().to_string(),
            description: self.description.clone(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.menus.is_disabled()
    }

    /// Freeze or unfreeze both selections and the form fields.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.menus.set_disabled(disabled);
        self.data_permissions.set_disabled(disabled);
    }
}

/// Outcome of the last save attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Saved { role_id: i64 },
    Error(ServiceError),
}

#[state("role/editor")]
pub struct RoleEditor {
    pub phase: LoadPhase,
    pub draft: Option<RoleDraft>,
    pub notice: Option<Notice>,
    pub saving: bool,
}

impl RoleEditor {
    pub fn loading() -> Self {
        Self {
            phase: LoadPhase::Loading,
            draft: None,
            notice: None,
            saving: false,
        }
    }

    pub fn failed(error: ServiceError) -> Self {
        Self {
            phase: LoadPhase::Failed,
            draft: None,
            notice: Some(Notice::Error(error)),
            saving: false,
        }
    }

    pub fn ready(draft: RoleDraft) -> Self {
        let phase = if draft.menus.forest().is_empty() && draft.data_permissions.forest().is_empty() {
            LoadPhase::Empty
        } else {
            LoadPhase::Ready
        };
        Self {
            phase,
            draft: Some(draft),
            notice: None,
            saving: false,
        }
    }
}
