//! Sidebar handler implementations.

use std::sync::Arc;

use campus_core::ServiceError;
use campus_flux::StateStore;
use campus_menu::{filter_by_codes, permission_codes, ClickOutcome, Forest, NavState};
use tracing::{debug, info, warn};

use super::current_session;
use crate::request::*;
use crate::source::MenuSource;
use crate::state::*;

/// Handle `nav/load`: fetch, filter by the actor's permission codes, render.
pub async fn handle_load(store: &StateStore, source: &dyn MenuSource) {
    let session = match current_session(store) {
        Ok(s) => s,
        Err(e) => {
            store.set(NavMenu::PATH, NavMenu::failed(e));
            return;
        }
    };

    store.set(NavMenu::PATH, NavMenu::loading());

    let fetched = async {
        let menus = source.menus(&session).await?;
        let permissions = source.permissions(&session).await?;
        Ok::<_, crate::ConsoleError>((menus, permissions))
    }
    .await;

    let (menus, permissions) = match fetched {
        Ok(data) => data,
        Err(e) => {
            warn!(error = %e, "sidebar load failed");
            store.set(NavMenu::PATH, NavMenu::failed(e.into()));
            return;
        }
    };

    let forest = match Forest::from_tree(menus) {
        Ok(f) => f,
        Err(e) => {
            warn!(error = %e, "menu tree rejected");
            store.set(NavMenu::PATH, NavMenu::failed(ServiceError::from(e)));
            return;
        }
    };

    let visible = filter_by_codes(&forest, &permission_codes(&permissions));
    info!(
        total = forest.len(),
        visible = visible.len(),
        "sidebar loaded"
    );

    let route = store
        .read::<AppRoute>(AppRoute::PATH)
        .map(|r| r.0)
        .unwrap_or_else(|| AppRoute::HOME.to_string());
    publish(store, NavState::new(Arc::new(visible), route));
}

/// Handle `nav/click`: branches toggle, routed leaves navigate.
pub async fn handle_click(req: &NavClickReq, store: &StateStore) {
    let Some(Sidebar(mut nav)) = store.read::<Sidebar>(Sidebar::PATH) else {
        debug!(id = req.id, "click before sidebar load");
        return;
    };
    match nav.click(req.id) {
        ClickOutcome::Navigate(path) => {
            nav.set_route(path.clone());
            store.set(AppRoute::PATH, AppRoute(path));
            publish(store, nav);
        }
        ClickOutcome::Toggled { .. } => publish(store, nav),
        ClickOutcome::Ignored => debug!(id = req.id, "click ignored"),
    }
}

/// Handle `nav/toggle`.
pub async fn handle_toggle(req: &NavToggleReq, store: &StateStore) {
    let Some(Sidebar(mut nav)) = store.read::<Sidebar>(Sidebar::PATH) else {
        debug!(id = req.id, "toggle before sidebar load");
        return;
    };
    if nav.toggle(req.id).is_some() {
        publish(store, nav);
    }
}

fn publish(store: &StateStore, nav: NavState) {
    store.set(NavMenu::PATH, NavMenu::render(&nav));
    store.set(Sidebar::PATH, Sidebar(nav));
}
