//! State types, one per well-known path.

pub mod app;
pub mod auth;
pub mod nav;
pub mod role;

pub use app::{AppRoute, LoadPhase};
pub use auth::{AuthPhase, AuthState};
pub use nav::{NavMenu, Sidebar};
pub use role::{Notice, RoleDraft, RoleEditor};
