//! `campus role`: a role's menu tree with tri-state markers and its data
//! permissions grouped by menu.

use anyhow::{bail, Context, Result};
use campus_console::request::{RoleLoadReq, RoleSaveReq, RoleToggleMenuReq};
use campus_console::state::{Notice, RoleDraft, RoleEditor};
use campus_core::ConsoleConfig;
use campus_flux::Flux;
use campus_menu::{CheckState, TreeSelection};
use tracing::warn;

/// Selection changes requested on the command line.
#[derive(Debug)]
pub struct Edits {
    pub check: Vec<i64>,
    pub uncheck: Vec<i64>,
    pub save: bool,
}

pub async fn show(config: &ConsoleConfig, role_id: i64, edits: &Edits, json_output: bool) -> Result<()> {
    let flux = super::signed_in(config).await?;
    flux.emit(RoleLoadReq::PATH, RoleLoadReq { role_id: Some(role_id) })
        .await;
    let draft = current_draft(&flux)?;

    let changes = edits
        .check
        .iter()
        .map(|&id| (id, true))
        .chain(edits.uncheck.iter().map(|&id| (id, false)));
    for (id, checked) in changes {
        if !draft.menus.forest().contains(id) {
            warn!(id, "no such menu node, skipping");
            continue;
        }
        flux.emit(RoleToggleMenuReq::PATH, RoleToggleMenuReq { id, checked })
            .await;
    }

    if edits.save {
        flux.emit(RoleSaveReq::PATH, RoleSaveReq).await;
        let editor = flux
            .read::<RoleEditor>(RoleEditor::PATH)
            .context("role editor missing after save")?;
        match editor.notice {
            Some(Notice::Saved { role_id }) => eprintln!("Saved role {}.", role_id),
            Some(Notice::Error(err)) => bail!("Save failed: {} ({})", err, err.error_code()),
            None => {}
        }
    }

    let draft = current_draft(&flux)?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&draft.to_payload())?);
        return Ok(());
    }
    print!("{}", render(&draft));
    Ok(())
}

fn current_draft(flux: &Flux) -> Result<RoleDraft> {
    let editor = flux
        .read::<RoleEditor>(RoleEditor::PATH)
        .context("role editor missing after load")?;
    match (editor.draft, editor.notice) {
        (Some(draft), _) => Ok(draft),
        (None, Some(Notice::Error(err))) => {
            bail!("Failed to load role: {} ({})", err, err.error_code())
        }
        (None, _) => bail!("Failed to load role"),
    }
}

fn marker(selection: &TreeSelection, id: i64) -> &'static str {
    match selection.check_state(id) {
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
        CheckState::Unchecked => "[ ]",
    }
}

fn render(draft: &RoleDraft) -> String {
    let mut out = String::new();
    match draft.role_id {
        Some(id) => out.push_str(&format!("Role {}: {}\n", id, draft.name)),
        None => out.push_str(&format!("New role: {}\n", draft.name)),
    }
    if !draft.description.is_empty() {
        out.push_str(&format!("  {}\n", draft.description));
    }

    out.push_str("\nMenus\n");
    let menus = draft.menus.forest();
    for (id, depth) in menus.preorder() {
        let Some(node) = menus.node(id) else { continue };
        out.push_str(&format!(
            "{}{} {} ({})\n",
            "  ".repeat(depth + 1),
            marker(&draft.menus, id),
            node.label,
            id
        ));
    }

    out.push_str("\nData permissions\n");
    let perms = draft.data_permissions.forest();
    for group in &draft.groups {
        out.push_str(&format!("  {}\n", group.label));
        for &id in &group.permission_ids {
            let label = perms.node(id).map(|n| n.label.as_str()).unwrap_or("?");
            out.push_str(&format!(
                "    {} {} ({})\n",
                marker(&draft.data_permissions, id),
                label,
                id
            ));
        }
    }
    out
}
