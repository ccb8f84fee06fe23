//! App-level state: the current route, and the load phase shared by the
//! data-backed screens.

use campus_flux::state;
use serde::{Deserialize, Serialize};

/// Current route. Stored at `app/route`.
#[state("app/route")]
pub struct AppRoute(pub String);

impl AppRoute {
    pub const LOGIN: &'static str = "/login";
    pub const HOME: &'static str = "/";
}

/// Where a screen's data stands. `Empty` is a display state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadPhase {
    Loading,
    Ready,
    Empty,
    Failed,
}
