use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. The rendering shell matches on
// these to pick a notification style, never on the message string.

/// Stable error code constants.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const UNAVAILABLE: &str = "UNAVAILABLE";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified error type surfaced to the console UI.
///
/// Every failure that reaches the user (login rejected, menu fetch failed,
/// role save rejected) is folded into one of these variants. None of them
/// are fatal: the console keeps its local state and lets the user retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Input data is invalid (e.g. empty role name).
    #[error("{0}")]
    Validation(String),

    /// Missing or expired session.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but lacks the required permission.
    #[error("{0}")]
    PermissionDenied(String),

    /// Backend unreachable or returned a server-side failure.
    #[error("{0}")]
    Unavailable(String),

    /// Unexpected internal error (malformed data, decode failure).
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            ServiceError::PermissionDenied(_) => error_code::PERMISSION_DENIED,
            ServiceError::Unavailable(_) => error_code::UNAVAILABLE,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// Whether retrying the same action later may succeed without user edits.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_mapping() {
        assert_eq!(ServiceError::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(ServiceError::Validation("x".into()).error_code(), "VALIDATION_FAILED");
        assert_eq!(ServiceError::Unauthorized("x".into()).error_code(), "UNAUTHENTICATED");
        assert_eq!(ServiceError::PermissionDenied("x".into()).error_code(), "PERMISSION_DENIED");
        assert_eq!(ServiceError::Unavailable("x".into()).error_code(), "UNAVAILABLE");
        assert_eq!(ServiceError::Internal("x".into()).error_code(), "INTERNAL");
    }

    #[test]
    fn only_unavailable_is_retryable() {
        assert!(ServiceError::Unavailable("down".into()).is_retryable());
        assert!(!ServiceError::Validation("bad".into()).is_retryable());
        assert!(!ServiceError::Unauthorized("expired".into()).is_retryable());
    }

    #[test]
    fn error_display_is_just_message() {
        assert_eq!(ServiceError::NotFound("role 7".into()).to_string(), "role 7");
        assert_eq!(ServiceError::Validation("name is empty".into()).to_string(), "name is empty");
        assert_eq!(ServiceError::Unavailable("HTTP 502".into()).to_string(), "HTTP 502");
    }
}
