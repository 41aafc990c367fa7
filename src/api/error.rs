//! Error taxonomy for the HTTP API layer.
//!
//! Three families of failure exist: transport failures (no response reached
//! us), the client-side request timeout, and server-reported failures
//! (status-coded, optionally carrying a structured error payload).

use thiserror::Error;

/// Error type for API client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure not otherwise classified.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the client's fixed timeout.
    #[error("Request timeout. Please check your connection.")]
    Timeout,

    /// No response was received at all.
    #[error("Network error. Please check your connection.")]
    Network,

    /// The server returned 401; stored credentials have been cleared.
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// The server returned 422 with one or more validation messages.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Any other error status, with the message drawn from the error body
    /// when one was present.
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body could not be parsed as the expected shape.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The message the server reported, if this error carries one.
    ///
    /// Used by the store to build user-facing messages with the
    /// server-body-first priority.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => Some(message),
            ApiError::Validation(errors) => errors.first().map(String::as_str),
            _ => None,
        }
    }

    /// True when no response was received (network absence or timeout).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Network | ApiError::Timeout)
    }

    /// True when the failing status was 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_priority() {
        let err = ApiError::Server {
            status: 500,
            message: "database down".to_string(),
        };
        assert_eq!(err.server_message(), Some("database down"));

        let err = ApiError::Validation(vec!["title too long".to_string()]);
        assert_eq!(err.server_message(), Some("title too long"));

        assert_eq!(ApiError::Network.server_message(), None);
        assert_eq!(ApiError::Timeout.server_message(), None);
    }

    #[test]
    fn test_unreachable_classification() {
        assert!(ApiError::Network.is_unreachable());
        assert!(ApiError::Timeout.is_unreachable());
        assert!(!ApiError::SessionExpired.is_unreachable());
        assert!(!ApiError::Server {
            status: 500,
            message: String::new()
        }
        .is_unreachable());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(ApiError::Server {
            status: 404,
            message: "no such route".to_string()
        }
        .is_not_found());
        assert!(!ApiError::Server {
            status: 403,
            message: String::new()
        }
        .is_not_found());
        assert!(!ApiError::Network.is_not_found());
    }
}
