//! Error category classification.
//!
//! Callers branch on the category to pick a remediation: re-export cookies
//! for `Auth`, inspect status and body for `Api`, and so on.

use std::fmt;

/// High-level categorization of engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Credential acquisition failed (cookie file, token).
    Auth,

    /// The backend answered with a non-2xx status, or could not be reached.
    Api,

    /// A file upload failed at some step.
    Upload,

    /// The client was used after `close()`.
    Closed,

    /// Anything not anticipated by the other categories.
    Internal,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "auth",
            ErrorCategory::Api => "api",
            ErrorCategory::Upload => "upload",
            ErrorCategory::Closed => "closed",
            ErrorCategory::Internal => "internal",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "Export fresh cookies from a logged-in browser session",
            ErrorCategory::Api => "Inspect the status code and response body",
            ErrorCategory::Upload => "Check the file path and try the upload again",
            ErrorCategory::Closed => "Create a new client; a closed client cannot be reopened",
            ErrorCategory::Internal => "This may be a bug. Please report this issue if it persists",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
