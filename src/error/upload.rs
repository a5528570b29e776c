//! File upload error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::kimi_error::KimiError;

/// The stage of the upload protocol that was running when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    /// Reading the local file.
    ReadFile,
    /// Requesting a presigned upload target.
    PreSign,
    /// Sending the raw bytes to the presigned URL.
    PutObject,
    /// Registering the stored object with the backend.
    Register,
    /// Triggering document parsing.
    Parse,
}

impl UploadStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStep::ReadFile => "read_file",
            UploadStep::PreSign => "pre_sign",
            UploadStep::PutObject => "put_object",
            UploadStep::Register => "register",
            UploadStep::Parse => "parse",
        }
    }
}

impl fmt::Display for UploadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload pipeline failures.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The local file does not exist. Raised before any network activity.
    #[error("File not found at path: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A step of the pipeline failed.
    #[error("Failed to upload file '{}' at step {step}: {source}", path.display())]
    Failed {
        path: PathBuf,
        step: UploadStep,
        #[source]
        source: Box<KimiError>,
    },
}

impl UploadError {
    /// Wrap a failure at `step` for the file at `path`.
    pub fn failed(path: impl Into<PathBuf>, step: UploadStep, source: impl Into<KimiError>) -> Self {
        UploadError::Failed {
            path: path.into(),
            step,
            source: Box::new(source.into()),
        }
    }

    /// The local path the upload was attempted for.
    pub fn path(&self) -> &PathBuf {
        match self {
            UploadError::FileNotFound { path } | UploadError::Failed { path, .. } => path,
        }
    }

    /// The failing step, if the pipeline got past the existence check.
    pub fn step(&self) -> Option<UploadStep> {
        match self {
            UploadError::FileNotFound { .. } => None,
            UploadError::Failed { step, .. } => Some(*step),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            UploadError::FileNotFound { .. } => "E_UPLOAD_NOT_FOUND",
            UploadError::Failed { .. } => "E_UPLOAD_FAILED",
        }
    }
}
