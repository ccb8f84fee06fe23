//! Handler implementations and flux wiring.

pub mod app;
pub mod auth;
pub mod nav;
pub mod role;

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use campus_core::{session, ServiceError, Session};
use campus_flux::{Flux, StateStore};
use tracing::warn;

use crate::request::*;
use crate::source::{MenuSource, RoleSink};
use crate::state::AuthState;

/// Backend collaborators shared by every handler.
pub struct ConsoleContext {
    pub source: Arc<dyn MenuSource>,
    pub sink: Arc<dyn RoleSink>,
}

impl ConsoleContext {
    pub fn new(source: Arc<dyn MenuSource>, sink: Arc<dyn RoleSink>) -> Self {
        Self { source, sink }
    }
}

/// Register every console request handler with `flux`.
pub fn register_handlers(flux: &Flux, ctx: Arc<ConsoleContext>) {
    on_request(flux, &ctx, InitializeReq::PATH, |_: InitializeReq, store, _| async move {
        app::handle_initialize(&store).await;
    });
    on_request(flux, &ctx, NavigateReq::PATH, |req: NavigateReq, store, _| async move {
        app::handle_navigate(&req, &store).await;
    });

    on_request(flux, &ctx, LoginReq::PATH, |req: LoginReq, store, ctx| async move {
        auth::handle_login(&req, &store, ctx.source.as_ref()).await;
    });
    on_request(flux, &ctx, RestoreSessionReq::PATH, |req: RestoreSessionReq, store, _| async move {
        auth::handle_restore(&req, &store).await;
    });
    on_request(flux, &ctx, LogoutReq::PATH, |_: LogoutReq, store, _| async move {
        auth::handle_logout(&store).await;
    });

    on_request(flux, &ctx, NavLoadReq::PATH, |_: NavLoadReq, store, ctx| async move {
        nav::handle_load(&store, ctx.source.as_ref()).await;
    });
    on_request(flux, &ctx, NavClickReq::PATH, |req: NavClickReq, store, _| async move {
        nav::handle_click(&req, &store).await;
    });
    on_request(flux, &ctx, NavToggleReq::PATH, |req: NavToggleReq, store, _| async move {
        nav::handle_toggle(&req, &store).await;
    });

    on_request(flux, &ctx, RoleLoadReq::PATH, |req: RoleLoadReq, store, ctx| async move {
        role::handle_load(&req, &store, ctx.source.as_ref()).await;
    });
    on_request(flux, &ctx, RoleToggleMenuReq::PATH, |req: RoleToggleMenuReq, store, _| async move {
        role::handle_toggle_menu(&req, &store).await;
    });
    on_request(
        flux,
        &ctx,
        RoleTogglePermissionReq::PATH,
        |req: RoleTogglePermissionReq, store, _| async move {
            role::handle_toggle_permission(&req, &store).await;
        },
    );
    on_request(flux, &ctx, RoleUpdateFieldReq::PATH, |req: RoleUpdateFieldReq, store, _| async move {
        role::handle_update_field(&req, &store).await;
    });
    on_request(flux, &ctx, RoleSaveReq::PATH, |_: RoleSaveReq, store, ctx| async move {
        role::handle_save(&store, ctx.sink.as_ref()).await;
    });
}

/// Route `path` to `handler`, downcasting the payload to `R` first.
fn on_request<R, F, Fut>(flux: &Flux, ctx: &Arc<ConsoleContext>, path: &'static str, handler: F)
where
    R: Any + Clone + Send + Sync,
    F: Fn(R, Arc<StateStore>, Arc<ConsoleContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let ctx = Arc::clone(ctx);
    flux.on(path, move |_, payload, store| {
        let call = payload
            .downcast_ref::<R>()
            .cloned()
            .map(|req| handler(req, store, Arc::clone(&ctx)));
        async move {
            match call {
                Some(fut) => fut.await,
                None => warn!(path, "request payload has the wrong type"),
            }
        }
    });
}

/// The signed-in session, or `Unauthorized`.
pub(crate) fn current_session(store: &StateStore) -> Result<Session, ServiceError> {
    let auth = store.read::<AuthState>(AuthState::PATH);
    session::require(auth.as_ref().and_then(|a| a.session.as_ref())).cloned()
}
