//! Auth state, stored at `auth/state`.

use campus_core::{ServiceError, Session};
use campus_flux::state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated,
    Authenticated,
}

/// Login status. The session lives here and nowhere else; handlers take it
/// from this state and pass it to collaborators explicitly.
#[state("auth/state")]
pub struct AuthState {
    pub phase: AuthPhase,
    pub session: Option<Session>,
    pub busy: bool,
    pub error: Option<ServiceError>,
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self {
            phase: AuthPhase::Unauthenticated,
            session: None,
            busy: false,
            error: None,
        }
    }

    pub fn signed_in(session: Session) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            session: Some(session),
            busy: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated && self.session.is_some()
    }
}
