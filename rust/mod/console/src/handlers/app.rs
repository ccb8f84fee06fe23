//! App lifecycle handler implementations.

use campus_flux::StateStore;
use tracing::debug;

use crate::request::*;
use crate::state::*;

/// Handle `app/initialize`.
pub async fn handle_initialize(store: &StateStore) {
    store.set(AuthState::PATH, AuthState::signed_out());
    store.set(AppRoute::PATH, AppRoute(AppRoute::LOGIN.into()));
    store.remove(Sidebar::PATH);
    store.remove(NavMenu::PATH);
    store.remove(RoleEditor::PATH);
}

/// Handle `app/navigate`. Manual overrides survive the route change.
pub async fn handle_navigate(req: &NavigateReq, store: &StateStore) {
    debug!(path = %req.path, "navigate");
    store.set(AppRoute::PATH, AppRoute(req.path.clone()));

    if let Some(Sidebar(mut nav)) = store.read::<Sidebar>(Sidebar::PATH) {
        nav.set_route(req.path.clone());
        store.set(NavMenu::PATH, NavMenu::render(&nav));
        store.set(Sidebar::PATH, Sidebar(nav));
    }
}
