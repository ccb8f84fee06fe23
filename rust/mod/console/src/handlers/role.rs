//! Role editor handler implementations.

use std::sync::Arc;

use campus_core::ServiceError;
use campus_flux::StateStore;
use campus_menu::Forest;
use tracing::{debug, info, warn};

use super::current_session;
use crate::request::*;
use crate::source::{MenuSource, RoleSink};
use crate::state::*;

/// Handle `role/load`.
pub async fn handle_load(req: &RoleLoadReq, store: &StateStore, source: &dyn MenuSource) {
    let session = match current_session(store) {
        Ok(s) => s,
        Err(e) => {
            store.set(RoleEditor::PATH, RoleEditor::failed(e));
            return;
        }
    };

    store.set(RoleEditor::PATH, RoleEditor::loading());

    let fetched = async {
        let menus = source.menus(&session).await?;
        let permissions = source.permissions(&session).await?;
        let role = match req.role_id {
            Some(id) => Some(source.role(&session, id).await?),
            None => None,
        };
        Ok::<_, crate::ConsoleError>((menus, permissions, role))
    }
    .await;

    let (menus, permissions, role) = match fetched {
        Ok(data) => data,
        Err(e) => {
            warn!(role_id = ?req.role_id, error = %e, "role load failed");
            store.set(RoleEditor::PATH, RoleEditor::failed(e.into()));
            return;
        }
    };

    let draft = Forest::from_tree(menus)
        .and_then(|forest| RoleDraft::new(Arc::new(forest), &permissions, role.as_ref()));
    match draft {
        Ok(draft) => {
            debug!(role_id = ?draft.role_id, "role editor ready");
            store.set(RoleEditor::PATH, RoleEditor::ready(draft));
        }
        Err(e) => {
            warn!(error = %e, "role editor data rejected");
            store.set(RoleEditor::PATH, RoleEditor::failed(ServiceError::from(e)));
        }
    }
}

/// Handle `role/toggle-menu`.
pub async fn handle_toggle_menu(req: &RoleToggleMenuReq, store: &StateStore) {
    edit_draft(store, |draft| draft.menus.set_selected(req.id, req.checked));
}

/// Handle `role/toggle-permission`.
pub async fn handle_toggle_permission(req: &RoleTogglePermissionReq, store: &StateStore) {
    edit_draft(store, |draft| {
        draft.data_permissions.set_selected(req.id, req.checked)
    });
}

/// Handle `role/update-field`. Ignored while a save is in flight.
pub async fn handle_update_field(req: &RoleUpdateFieldReq, store: &StateStore) {
    edit_draft(store, |draft| {
        if draft.is_disabled() {
            debug!(field = ?req.field, "field edit ignored while saving");
            return;
        }
        match req.field {
            RoleField::Name => draft.name = req.value.clone(),
            RoleField::Description => draft.description = req.value.clone(),
        }
    });
}

/// Handle `role/save`: one atomic write of both selections and the form.
pub async fn handle_save(store: &StateStore, sink: &dyn RoleSink) {
    let Some(mut editor) = store.read::<RoleEditor>(RoleEditor::PATH) else {
        debug!("save without an open editor");
        return;
    };
    let Some(mut draft) = editor.draft.take() else {
        debug!("save without a draft");
        return;
    };
    if editor.saving {
        debug!("save already in flight");
        return;
    }

    let session = match current_session(store) {
        Ok(s) => s,
        Err(e) => {
            store.set(RoleEditor::PATH, RoleEditor {
                draft: Some(draft),
                notice: Some(Notice::Error(e)),
                ..editor
            });
            return;
        }
    };

    if draft.name.trim().is_empty() {
        store.set(RoleEditor::PATH, RoleEditor {
            draft: Some(draft),
            notice: Some(Notice::Error(ServiceError::Validation(
                "role name is required".into(),
            ))),
            ..editor
        });
        return;
    }

    let payload = draft.to_payload();
    let role_id = draft.role_id;
    draft.set_disabled(true);
    store.set(RoleEditor::PATH, RoleEditor {
        draft: Some(draft.clone()),
        notice: None,
        saving: true,
        ..editor
    });

    let result = sink.save_role(&session, role_id, &payload).await;

    draft.set_disabled(false);
    let notice = match result {
        Ok(id) => {
            info!(role_id = id, menus = payload.menu_ids.len(), "role saved");
            draft.role_id = Some(id);
            Notice::Saved { role_id: id }
        }
        Err(e) => {
            warn!(role_id = ?role_id, error = %e, "role save failed");
            Notice::Error(e.into())
        }
    };
    store.set(RoleEditor::PATH, RoleEditor {
        draft: Some(draft),
        notice: Some(notice),
        saving: false,
        ..editor
    });
}

fn edit_draft(store: &StateStore, edit: impl FnOnce(&mut RoleDraft)) {
    let Some(mut editor) = store.read::<RoleEditor>(RoleEditor::PATH) else {
        return;
    };
    let Some(draft) = editor.draft.as_mut() else {
        return;
    };
    edit(draft);
    if !editor.saving {
        editor.notice = None;
    }
    store.set(RoleEditor::PATH, editor);
}
