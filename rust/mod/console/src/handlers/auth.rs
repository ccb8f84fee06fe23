//! Auth handler implementations.

use campus_core::{ServiceError, Session};
use campus_flux::StateStore;
use tracing::{info, warn};

use crate::request::*;
use crate::source::MenuSource;
use crate::state::*;

/// Handle `auth/login`.
pub async fn handle_login(req: &LoginReq, store: &StateStore, source: &dyn MenuSource) {
    store.set(AuthState::PATH, AuthState {
        busy: true,
        ..AuthState::signed_out()
    });

    if req.username.trim().is_empty() || req.password.is_empty() {
        store.set(AuthState::PATH, AuthState {
            error: Some(ServiceError::Validation("username and password are required".into())),
            ..AuthState::signed_out()
        });
        return;
    }

    match source.login(&req.username, &req.password).await {
        Ok(session) => {
            info!(user_id = session.user_id, username = %session.username, "signed in");
            store.set(AuthState::PATH, AuthState::signed_in(session));
            store.set(AppRoute::PATH, AppRoute(AppRoute::HOME.into()));
        }
        Err(e) => {
            warn!(username = %req.username, error = %e, "login failed");
            store.set(AuthState::PATH, AuthState {
                error: Some(e.into()),
                ..AuthState::signed_out()
            });
        }
    }
}

/// Handle `auth/restore`. The token is trusted until the backend rejects it.
pub async fn handle_restore(req: &RestoreSessionReq, store: &StateStore) {
    if req.token.is_empty() {
        store.set(AuthState::PATH, AuthState {
            error: Some(ServiceError::Unauthorized("no saved session".into())),
            ..AuthState::signed_out()
        });
        return;
    }
    let session = Session::new(req.user_id, req.username.clone(), req.token.clone());
    info!(user_id = session.user_id, "session restored");
    store.set(AuthState::PATH, AuthState::signed_in(session));
}

/// Handle `auth/logout`.
pub async fn handle_logout(store: &StateStore) {
    if let Some(auth) = store.read::<AuthState>(AuthState::PATH) {
        if let Some(session) = auth.session {
            info!(user_id = session.user_id, "signed out");
        }
    }
    store.set(AuthState::PATH, AuthState::signed_out());
    store.set(AppRoute::PATH, AppRoute(AppRoute::LOGIN.into()));
    store.remove(Sidebar::PATH);
    store.remove(NavMenu::PATH);
    store.remove(RoleEditor::PATH);
}
