//! Unified error type for the engine.

use thiserror::Error;

use super::api::ApiError;
use super::auth::AuthError;
use super::category::ErrorCategory;
use super::upload::UploadError;

/// Boxed cause attached to an [`KimiError::Internal`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for the Kimi engine.
///
/// Every fallible public operation returns this type. Callers are expected
/// to branch on the variant (or on [`KimiError::category`]) to decide how to
/// recover.
#[derive(Debug, Error)]
pub enum KimiError {
    /// Credential acquisition failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Non-2xx response or transport failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// File upload failed.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The client was closed before or during the operation.
    #[error("Client is closed")]
    ClientClosed,

    /// Anything unexpected.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl KimiError {
    /// Create an internal error without a cause.
    pub fn internal(message: impl Into<String>) -> Self {
        KimiError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error that keeps its cause.
    pub fn internal_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        KimiError::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            KimiError::Auth(_) => ErrorCategory::Auth,
            KimiError::Api(_) => ErrorCategory::Api,
            KimiError::Upload(_) => ErrorCategory::Upload,
            KimiError::ClientClosed => ErrorCategory::Closed,
            KimiError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            KimiError::Auth(err) => err.error_code(),
            KimiError::Api(_) => "E_API",
            KimiError::Upload(err) => err.error_code(),
            KimiError::ClientClosed => "E_CLOSED",
            KimiError::Internal { .. } => "E_INTERNAL",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Check if this error calls for fresh browser cookies.
    pub fn requires_reauth(&self) -> bool {
        match self {
            KimiError::Auth(err) => err.requires_reauth(),
            KimiError::Api(err) => err.status() == 401,
            KimiError::Upload(UploadError::Failed { source, .. }) => source.requires_reauth(),
            _ => false,
        }
    }

    /// The API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            KimiError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for KimiError {
    fn from(err: serde_json::Error) -> Self {
        KimiError::internal_with(format!("JSON error: {}", err), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadStep;
    use crate::traits::HttpError;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn test_categories() {
        let auth: KimiError = AuthError::TokenMissing {
            name: "kimi-auth".to_string(),
        }
        .into();
        assert_eq!(auth.category(), ErrorCategory::Auth);

        let api: KimiError = ApiError::new("failed", 500, "oops").into();
        assert_eq!(api.category(), ErrorCategory::Api);

        let upload: KimiError = UploadError::FileNotFound {
            path: PathBuf::from("x"),
        }
        .into();
        assert_eq!(upload.category(), ErrorCategory::Upload);

        assert_eq!(KimiError::ClientClosed.category(), ErrorCategory::Closed);
        assert_eq!(
            KimiError::internal("boom").category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_requires_reauth_on_401() {
        let err: KimiError = ApiError::from_http(
            "API request failed",
            HttpError::Status {
                status: 401,
                body: "Unauthorized".to_string(),
            },
        )
        .into();
        assert!(err.requires_reauth());

        let err: KimiError = ApiError::new("failed", 403, "Forbidden").into();
        assert!(!err.requires_reauth());
    }

    #[test]
    fn test_requires_reauth_through_upload() {
        let err: KimiError = UploadError::failed(
            "a.txt",
            UploadStep::PreSign,
            ApiError::new("failed", 401, "Unauthorized"),
        )
        .into();
        assert!(err.requires_reauth());
    }

    #[test]
    fn test_transparent_display_and_source() {
        let err: KimiError = ApiError::new("API request failed", 404, "nope").into();
        assert_eq!(err.to_string(), "API request failed (Status: 404)");
        assert_eq!(err.as_api().map(|e| e.body()), Some("nope"));

        let err = KimiError::internal_with(
            "Stream processing failed",
            std::io::Error::new(std::io::ErrorKind::Other, "bad"),
        );
        assert_eq!(err.source().map(|s| s.to_string()), Some("bad".to_string()));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: KimiError = json_err.into();
        assert!(matches!(err, KimiError::Internal { .. }));
        assert_eq!(err.error_code(), "E_INTERNAL");
    }
}
