//! API client error taxonomy.
//!
//! Five failure classes reach callers; the sixth (a 401 that a silent
//! refresh resolved) never surfaces. Service wrappers and UI layers are
//! expected to display the `Display` output of [`ApiError`] verbatim, so
//! every variant renders a human-readable message rather than a trace.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Terminal auth failure: a 401 that one refresh-and-retry could not
    /// resolve. The session-expired handler has already been invoked; the
    /// caller only needs to stop its own in-flight state.
    #[error("session expired; please sign in again")]
    SessionExpired,

    /// Non-2xx response carrying a structured error body. The message
    /// combines the top-level message with any field-level details.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    /// Non-2xx response whose body could not be parsed as an error object.
    #[error("HTTP {0}")]
    Http(StatusCode),

    /// Transport-level failure with no HTTP response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response body that did not match the expected shape.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// The HTTP status attached to this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(status) => Some(*status),
            Self::SessionExpired | Self::Network(_) | Self::Parse(_) => None,
        }
    }

    /// Whether this error is a "resource missing" response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_facing() {
        let err = ApiError::Api {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Invalid; sku: required".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid; sku: required");

        assert_eq!(
            ApiError::Http(StatusCode::BAD_GATEWAY).to_string(),
            "HTTP 502 Bad Gateway"
        );
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(
            ApiError::Http(StatusCode::NOT_FOUND).status(),
            Some(StatusCode::NOT_FOUND)
        );
        assert!(ApiError::Http(StatusCode::NOT_FOUND).is_not_found());
        assert_eq!(ApiError::SessionExpired.status(), None);
    }
}
