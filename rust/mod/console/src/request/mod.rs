//! Request payloads. Each carries its routing `PATH`.

pub mod app;
pub mod auth;
pub mod nav;
pub mod role;

pub use app::{InitializeReq, NavigateReq};
pub use auth::{LoginReq, LogoutReq, RestoreSessionReq};
pub use nav::{NavClickReq, NavLoadReq, NavToggleReq};
pub use role::{
    RoleField, RoleLoadReq, RoleSaveReq, RoleToggleMenuReq, RoleTogglePermissionReq,
    RoleUpdateFieldReq,
};
