//! Authenticated session context.
//!
//! A `Session` is created on successful login and dropped on logout. It is
//! passed explicitly to every collaborator that needs the actor's identity
//! or token; there is no process-global login store.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::ServiceError;

/// The current actor's identity and bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    token: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a freshly issued token.
    pub fn new(user_id: i64, username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            token: token.into(),
            created_at: Utc::now(),
        }
    }

    /// Raw bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Token stays out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Borrow the session or fail with `Unauthorized`.
pub fn require(session: Option<&Session>) -> Result<&Session, ServiceError> {
    session.ok_or_else(|| ServiceError::Unauthorized("not logged in".into()))
}
