//! Authentication-related error types.
//!
//! These errors are raised while acquiring the bearer credential from the
//! browser-exported cookie file. None of them involve the network.

use std::path::PathBuf;

use thiserror::Error;

/// Credential acquisition failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured cookie file does not exist.
    #[error("Cookie file not found at: {}", path.display())]
    CookieFileNotFound { path: PathBuf },

    /// The cookie file was parsed but holds no usable token.
    #[error("Authentication token '{name}' not found in cookies file")]
    TokenMissing { name: String },

    /// The cookie file could not be read or is not in Netscape format.
    #[error("Failed to load or process cookies from {}: {source}", path.display())]
    CookieParse {
        path: PathBuf,
        #[source]
        source: CookieParseError,
    },
}

impl AuthError {
    /// Check if this error might be resolved by exporting fresh cookies.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, AuthError::TokenMissing { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::CookieFileNotFound { .. } => "E_AUTH_NO_FILE",
            AuthError::TokenMissing { .. } => "E_AUTH_NO_TOKEN",
            AuthError::CookieParse { .. } => "E_AUTH_PARSE",
        }
    }
}

/// Reason a cookie file could not be parsed.
#[derive(Debug, Error)]
pub enum CookieParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 7 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid boolean flag '{value}'")]
    InvalidFlag { line: usize, value: String },

    #[error("line {line}: invalid expiry '{value}'")]
    InvalidExpiry { line: usize, value: String },
}
