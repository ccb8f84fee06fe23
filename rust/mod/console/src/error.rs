use campus_core::ServiceError;
use thiserror::Error;

/// Failure reported by a backend collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("session rejected: {0}")]
    SessionRejected(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<ConsoleError> for ServiceError {
    fn from(e: ConsoleError) -> Self {
        let message = e.to_string();
        match e {
            ConsoleError::InvalidCredentials | ConsoleError::SessionRejected(_) => {
                ServiceError::Unauthorized(message)
            }
            ConsoleError::NotFound(_) => ServiceError::NotFound(message),
            ConsoleError::Unavailable(_) => ServiceError::Unavailable(message),
            ConsoleError::Backend { status: 403, .. } => ServiceError::PermissionDenied(message),
            ConsoleError::Backend { status: 400 | 422, .. } => ServiceError::Validation(message),
            ConsoleError::Backend { status, .. } if status >= 500 => {
                ServiceError::Unavailable(message)
            }
            ConsoleError::Backend { .. } | ConsoleError::Malformed(_) => {
                ServiceError::Internal(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_service_codes() {
        let code = |e: ConsoleError| ServiceError::from(e).error_code();
        assert_eq!(code(ConsoleError::InvalidCredentials), "UNAUTHENTICATED");
        assert_eq!(code(ConsoleError::SessionRejected("expired".into())), "UNAUTHENTICATED");
        assert_eq!(code(ConsoleError::NotFound("role 9".into())), "NOT_FOUND");
        assert_eq!(
            code(ConsoleError::Backend { status: 403, message: "no".into() }),
            "PERMISSION_DENIED"
        );
        assert_eq!(
            code(ConsoleError::Backend { status: 422, message: "bad".into() }),
            "VALIDATION_FAILED"
        );
        assert_eq!(
            code(ConsoleError::Backend { status: 503, message: "down".into() }),
            "UNAVAILABLE"
        );
        assert_eq!(code(ConsoleError::Malformed("eof".into())), "INTERNAL");
    }

    #[test]
    fn unavailable_is_retryable() {
        let e: ServiceError = ConsoleError::Unavailable("timeout".into()).into();
        assert!(e.is_retryable());
        assert_eq!(e.to_string(), "backend unavailable: timeout");
    }
}
