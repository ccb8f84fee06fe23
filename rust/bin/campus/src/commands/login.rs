//! Login / logout commands.

use std::path::Path;

use anyhow::{bail, Context, Result};
use campus_console::request::LoginReq;
use campus_console::state::AuthState;
use campus_core::ConsoleConfig;

/// Log in through the console handlers and save the session.
pub async fn login(
    username: &str,
    password: &str,
    config: &mut ConsoleConfig,
    config_path: &Path,
) -> Result<()> {
    let flux = super::console(config).await?;
    flux.emit(LoginReq::PATH, LoginReq {
        username: username.to_string(),
        password: password.to_string(),
    })
    .await;

    let auth = flux
        .read::<AuthState>(AuthState::PATH)
        .context("auth state missing after login")?;
    if let Some(err) = auth.error {
        bail!("Login failed: {} ({})", err, err.error_code());
    }
    let Some(session) = auth.session else {
        bail!("Login failed: no session returned");
    };

    config.token = session.token().to_string();
    config.user_id = Some(session.user_id);
    config.username = session.username.clone();
    config.save(config_path)?;

    println!("Logged in as {}.", session.username);
    println!("Token saved to {}.", config_path.display());
    Ok(())
}

pub fn logout(config: &mut ConsoleConfig, config_path: &Path) -> Result<()> {
    if !config.has_credentials() {
        println!("Not logged in.");
        return Ok(());
    }
    config.clear_credentials();
    config.save(config_path)?;
    println!("Logged out.");
    Ok(())
}
