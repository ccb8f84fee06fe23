//! `campus sidebar`: the permission-filtered sidebar as the shell would
//! render it.

use anyhow::{bail, Context, Result};
use campus_console::request::{NavLoadReq, NavToggleReq, NavigateReq};
use campus_console::state::{LoadPhase, NavMenu};
use campus_core::ConsoleConfig;
use campus_menu::NavRow;

pub async fn show(config: &ConsoleConfig, route: &str, toggles: &[i64], json_output: bool) -> Result<()> {
    let flux = super::signed_in(config).await?;
    flux.emit(NavigateReq::PATH, NavigateReq { path: route.to_string() })
        .await;
    flux.emit(NavLoadReq::PATH, NavLoadReq).await;
    for &id in toggles {
        flux.emit(NavToggleReq::PATH, NavToggleReq { id }).await;
    }

    let menu = flux
        .read::<NavMenu>(NavMenu::PATH)
        .context("sidebar state missing after load")?;
    if let Some(err) = menu.error {
        bail!("Failed to load sidebar: {} ({})", err, err.error_code());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&menu.rows)?);
        return Ok(());
    }
    if menu.phase == LoadPhase::Empty {
        println!("(no menus available)");
        return Ok(());
    }
    for row in &menu.rows {
        println!("{}", render_row(row));
    }
    Ok(())
}

fn render_row(row: &NavRow) -> String {
    let indent = "  ".repeat(row.depth);
    let marker = match (row.has_children, row.expanded) {
        (true, true) => "v",
        (true, false) => ">",
        (false, _) => "-",
    };
    let mut line = format!("{}{} {} [{}]", indent, marker, row.label, row.id);
    if let Some(path) = &row.path {
        line.push_str("  ");
        line.push_str(path);
    }
    if row.active {
        line.push_str("  (active)");
    }
    line
}
