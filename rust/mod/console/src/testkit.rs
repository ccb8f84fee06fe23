//! In-memory backend for handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use campus_core::Session;
use campus_flux::Flux;
use campus_menu::{MenuNode, PermissionRecord};

use crate::error::ConsoleError;
use crate::request::RoleToggleMenuReq;
use crate::source::{MenuSource, RoleRecord, RoleSavePayload, RoleSink};
use crate::state::RoleEditor;

pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "tok-1";

pub struct FakeBackend {
    pub menus: Mutex<Vec<MenuNode>>,
    pub permissions: Mutex<Vec<PermissionRecord>>,
    pub roles: Mutex<HashMap<i64, RoleRecord>>,
    pub saved: Mutex<Vec<(Option<i64>, RoleSavePayload)>>,
    pub tokens_seen: Mutex<Vec<String>>,
    pub fail_save: AtomicBool,
    pub offline: AtomicBool,
    /// Emitted from inside `save_role`, to poke the editor mid-save.
    pub during_save: OnceLock<(Arc<Flux>, RoleToggleMenuReq)>,
    /// Editor state right after the mid-save request ran.
    pub editor_mid_save: Mutex<Option<RoleEditor>>,
}

impl FakeBackend {
    // 1 Academics
    // ├── 2 Classes    class:list    /classes
    // └── 3 Students
    //     ├── 4 Roster student:list  /students
    //     └── 5 Fees   finance:fees  /fees
    // 6 Settings       sys:settings  /settings
    pub fn campus() -> Arc<Self> {
        let menus = vec![
            MenuNode::branch(1, "Academics", vec![
                MenuNode::leaf(2, "Classes", "class:list", "/classes"),
                MenuNode::branch(3, "Students", vec![
                    MenuNode::leaf(4, "Roster", "student:list", "/students"),
                    MenuNode::leaf(5, "Fees", "finance:fees", "/fees"),
                ]),
            ]),
            MenuNode::leaf(6, "Settings", "sys:settings", "/settings"),
        ];
        let permissions = vec![
            perm(100, "class:list", Some(2), "List classes"),
            perm(101, "student:list", Some(4), "List students"),
            perm(102, "student:export", Some(4), "Export students"),
        ];
        let mut roles = HashMap::new();
        roles.insert(7, RoleRecord {
            id: 7,
            name: "Teacher".into(),
            description: "Homeroom staff".into(),
            menu_ids: vec![2],
            data_permission_ids: vec![101],
        });

        Arc::new(Self {
            menus: Mutex::new(menus),
            permissions: Mutex::new(permissions),
            roles: Mutex::new(roles),
            saved: Mutex::new(Vec::new()),
            tokens_seen: Mutex::new(Vec::new()),
            fail_save: AtomicBool::new(false),
            offline: AtomicBool::new(false),
            during_save: OnceLock::new(),
            editor_mid_save: Mutex::new(None),
        })
    }

    fn check(&self, session: &Session) -> Result<(), ConsoleError> {
        self.tokens_seen.lock().unwrap().push(session.token().to_string());
        if self.offline.load(Ordering::SeqCst) {
            return Err(ConsoleError::Unavailable("connection refused".into()));
        }
        if session.token() != TOKEN {
            return Err(ConsoleError::SessionRejected("unknown token".into()));
        }
        Ok(())
    }
}

pub fn perm(id: i64, code: &str, menu: Option<i64>, name: &str) -> PermissionRecord {
    PermissionRecord {
        id,
        code: code.into(),
        menu_id: menu,
        name: name.into(),
    }
}

#[async_trait]
impl MenuSource for FakeBackend {
    async fn login(&self, username: &str, password: &str) -> Result<Session, ConsoleError> {
        if password != PASSWORD {
            return Err(ConsoleError::InvalidCredentials);
        }
        Ok(Session::new(1, username, TOKEN))
    }

    async fn menus(&self, session: &Session) -> Result<Vec<MenuNode>, ConsoleError> {
        self.check(session)?;
        Ok(self.menus.lock().unwrap().clone())
    }

    async fn permissions(&self, session: &Session) -> Result<Vec<PermissionRecord>, ConsoleError> {
        self.check(session)?;
        Ok(self.permissions.lock().unwrap().clone())
    }

    async fn role(&self, session: &Session, role_id: i64) -> Result<RoleRecord, ConsoleError> {
        self.check(session)?;
        self.roles
            .lock()
            .unwrap()
            .get(&role_id)
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound(format!("role {}", role_id)))
    }
}

#[async_trait]
impl RoleSink for FakeBackend {
    async fn save_role(
        &self,
        session: &Session,
        role_id: Option<i64>,
        payload: &RoleSavePayload,
    ) -> Result<i64, ConsoleError> {
        self.check(session)?;
        if let Some((flux, req)) = self.during_save.get() {
            flux.emit(RoleToggleMenuReq::PATH, req.clone()).await;
            *self.editor_mid_save.lock().unwrap() = flux.read::<RoleEditor>(RoleEditor::PATH);
        }
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(ConsoleError::Backend {
                status: 500,
                message: "database is locked".into(),
            });
        }
        self.saved.lock().unwrap().push((role_id, payload.clone()));
        Ok(role_id.unwrap_or(42))
    }
}
