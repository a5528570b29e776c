//! API error type.
//!
//! Every transport failure and every non-2xx response that crosses the
//! client boundary ends up here, carrying the status code and the raw
//! response body for diagnostics.

use thiserror::Error;

use crate::traits::HttpError;

/// A failed HTTP exchange with the Kimi backend.
///
/// `status` is `0` when no response was received at all (connection refused,
/// timeout, dropped stream).
#[derive(Debug, Error)]
#[error("{message} (Status: {status})")]
pub struct ApiError {
    message: String,
    status: u16,
    body: String,
    #[source]
    source: Option<HttpError>,
}

/// Placeholder body used when the server never answered.
pub const NO_RESPONSE_BODY: &str = "No response";

impl ApiError {
    /// Create an API error from a status and raw body.
    pub fn new(message: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            body: body.into(),
            source: None,
        }
    }

    /// Translate a transport error, keeping it as the cause.
    pub fn from_http(message: impl Into<String>, err: HttpError) -> Self {
        let (status, body) = match &err {
            HttpError::Status { status, body } => (*status, body.clone()),
            _ => (0, NO_RESPONSE_BODY.to_string()),
        };
        Self {
            message: format!("{}: {}", message.into(), err),
            status,
            body,
            source: Some(err),
        }
    }

    /// HTTP status code, or `0` if no response was received.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw response body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether a response was received at all.
    pub fn has_response(&self) -> bool {
        self.status != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_status_error_preserves_body_verbatim() {
        let body = r#"{"error_type":"auth.token.invalid","message":"unauthorized"}"#;
        let err = ApiError::from_http(
            "API request failed",
            HttpError::Status {
                status: 401,
                body: body.to_string(),
            },
        );
        assert_eq!(err.status(), 401);
        assert_eq!(err.body(), body);
        assert!(err.has_response());
        assert!(err.to_string().ends_with("(Status: 401)"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_transport_error_has_zero_status() {
        let err = ApiError::from_http(
            "API request failed",
            HttpError::ConnectionFailed("connection refused".to_string()),
        );
        assert_eq!(err.status(), 0);
        assert_eq!(err.body(), NO_RESPONSE_BODY);
        assert!(!err.has_response());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_new_has_no_source() {
        let err = ApiError::new("Upload rejected", 403, "Forbidden");
        assert_eq!(err.status(), 403);
        assert_eq!(err.body(), "Forbidden");
        assert!(err.source().is_none());
    }
}
