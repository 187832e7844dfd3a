//! Error types for firmware publication.
//!
//! Every error is terminal for a run. The only non-fatal failure (the STS
//! identity check) is modelled as [`crate::session::IdentityCheck`] and never
//! becomes a [`PublishError`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publication operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Boxed error returned by storage backends
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a required local file was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Nothing exists at the path
    Missing,
    /// Something exists, but it is not a regular file
    NotAFile,
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundReason::Missing => f.write_str("does not exist"),
            NotFoundReason::NotAFile => f.write_str("is not a regular file"),
        }
    }
}

/// Main error type for all publication operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// Required local file or document is absent or has the wrong type
    #[error("required file not found: {} ({reason})", path.display())]
    NotFound {
        /// Path that was checked
        path: PathBuf,
        /// Missing vs. wrong type
        reason: NotFoundReason,
    },

    /// Build info document is not valid structured data
    #[error("invalid JSON in {}: {source}", path.display())]
    MalformedInput {
        /// Document path
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Required field is absent, empty, or whitespace only
    #[error("build info missing required key '{field}' in {}", path.display())]
    MissingField {
        /// Document path
        path: PathBuf,
        /// Field name
        field: String,
    },

    /// Remote write failed
    #[error("upload failed for {} -> {destination}: {source}", local_path.display())]
    TransferFailed {
        /// Local file being uploaded
        local_path: PathBuf,
        /// Fully qualified destination (`s3://bucket/key`)
        destination: String,
        /// Transport error
        #[source]
        source: TransportError,
    },

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl PublishError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::NotFound { path, .. } => vec![
                "Build the firmware first: idf.py build".to_string(),
                format!("Check that {} is produced by the build", path.display()),
            ],
            PublishError::MalformedInput { .. } => vec![
                "Regenerate build_info.json by re-running the build".to_string(),
            ],
            PublishError::MissingField { field, .. } => vec![format!(
                "Ensure the build writes a non-empty '{}' value",
                field
            )],
            PublishError::TransferFailed { .. } => vec![
                "Verify credentials: aws sts get-caller-identity --profile <name>".to_string(),
                "Check that the profile has s3:PutObject on the bucket".to_string(),
                "Uploads overwrite, so the run can be repeated from scratch".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
