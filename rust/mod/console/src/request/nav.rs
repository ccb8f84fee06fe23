//! Sidebar requests.

use campus_flux::request;
use campus_menu::NodeId;

/// Fetch menus and permissions, filter, and render. Clears manual overrides.
#[request("nav/load")]
pub struct NavLoadReq;

/// A click on a sidebar row.
#[request("nav/click")]
pub struct NavClickReq {
    pub id: NodeId,
}

/// Expand/collapse toggle without navigation.
#[request("nav/toggle")]
pub struct NavToggleReq {
    pub id: NodeId,
}
