//! Role editor requests.

use campus_flux::request;
use campus_menu::NodeId;

/// Open the editor. `None` starts a new role.
#[request("role/load")]
pub struct RoleLoadReq {
    pub role_id: Option<i64>,
}

#[request("role/toggle-menu")]
pub struct RoleToggleMenuReq {
    pub id: NodeId,
    pub checked: bool,
}

#[request("role/toggle-permission")]
pub struct RoleTogglePermissionReq {
    pub id: NodeId,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleField {
    Name,
    Description,
}

#[request("role/update-field")]
pub struct RoleUpdateFieldReq {
    pub field: RoleField,
    pub value: String,
}

/// Persist the draft in one write.
#[request("role/save")]
pub struct RoleSaveReq;
