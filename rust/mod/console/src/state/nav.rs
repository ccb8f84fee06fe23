//! Sidebar state: the live `NavState` at `nav/state` and its rendered rows
//! at `nav/menu`.

use campus_core::ServiceError;
use campus_flux::state;
use campus_menu::{NavRow, NavState};

use super::app::LoadPhase;

/// Expansion state of the permission-filtered menu forest.
#[state("nav/state")]
pub struct Sidebar(pub NavState);

/// What the shell renders.
#[state("nav/menu")]
pub struct NavMenu {
    pub phase: LoadPhase,
    pub rows: Vec<NavRow>,
    pub error: Option<ServiceError>,
}

impl NavMenu {
    pub fn loading() -> Self {
        Self {
            phase: LoadPhase::Loading,
            rows: Vec::new(),
            error: None,
        }
    }

    pub fn failed(error: ServiceError) -> Self {
        Self {
            phase: LoadPhase::Failed,
            rows: Vec::new(),
            error: Some(error),
        }
    }

    pub fn render(nav: &NavState) -> Self {
        let rows = nav.rows();
        let phase = if rows.is_empty() {
            LoadPhase::Empty
        } else {
            LoadPhase::Ready
        };
        Self {
            phase,
            rows,
            error: None,
        }
    }
}
