//! Menu trees for the campus console.
//!
//! The sidebar and the role editor both work on the same shape: a forest of
//! menu nodes fetched from the backend. This crate holds that forest in an
//! arena and layers the two behaviours on top:
//!
//! - [`TreeSelection`]: tri-state checkbox selection for role editing.
//!   A parent's checked state is derived from its leaves.
//! - [`NavState`]: sidebar expansion: auto-expand toward the active route,
//!   with manual open/close overrides that win over auto-expansion.
//!
//! [`filter_by_codes`] trims the forest to what the actor may see before
//! either of them runs.
//!
//! ```ignore
//! let forest = Arc::new(Forest::from_tree(menus)?);
//! let visible = Arc::new(filter_by_codes(&forest, &permission_codes(&perms)));
//!
//! let mut nav = NavState::new(visible, "/students");
//! let rows = nav.rows();
//!
//! let mut sel = TreeSelection::new(forest, role.menu_ids);
//! sel.set_selected(42, true);
//! ```

pub mod error;
pub mod filter;
pub mod forest;
pub mod group;
pub mod model;
pub mod nav;
pub mod selection;

pub use error::TreeError;
pub use filter::{filter_by_codes, permission_codes};
pub use forest::{Forest, Node};
pub use group::{group_by_menu, PermissionGroup, UNGROUPED_LABEL};
pub use model::{MenuNode, NodeId, PermissionRecord};
pub use nav::{ClickOutcome, NavRow, NavState, Override};
pub use selection::{CheckState, SelectionSet, TreeSelection};
