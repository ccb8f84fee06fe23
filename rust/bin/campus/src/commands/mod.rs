//! Subcommand implementations.

pub mod login;
pub mod role;
pub mod sidebar;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use campus_client::HttpBackend;
use campus_console::request::{InitializeReq, RestoreSessionReq};
use campus_console::state::AuthState;
use campus_console::{register_handlers, ConsoleContext};
use campus_core::ConsoleConfig;
use campus_flux::Flux;

/// A flux instance wired to the configured backend, initialized.
pub async fn console(config: &ConsoleConfig) -> Result<Flux> {
    let backend = Arc::new(
        HttpBackend::from_config(config).context("failed to build HTTP client")?,
    );
    let flux = Flux::new();
    register_handlers(&flux, Arc::new(ConsoleContext::new(backend.clone(), backend)));
    flux.emit(InitializeReq::PATH, InitializeReq).await;
    Ok(flux)
}

/// `console` plus the session saved by `campus login`.
pub async fn signed_in(config: &ConsoleConfig) -> Result<Flux> {
    if !config.has_credentials() {
        bail!("Not logged in. Run `campus login` first.");
    }
    let flux = console(config).await?;
    flux.emit(RestoreSessionReq::PATH, RestoreSessionReq {
        user_id: config.user_id.unwrap_or_default(),
        username: config.username.clone(),
        token: config.token.clone(),
    })
    .await;

    let auth = flux
        .read::<AuthState>(AuthState::PATH)
        .context("auth state missing after restore")?;
    if let Some(err) = auth.error {
        bail!("{} ({})", err, err.error_code());
    }
    Ok(flux)
}
