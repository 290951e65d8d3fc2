//! Application layer errors.
//!
//! These errors represent failures in orchestration, not bad input.
//! Input rejections are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// An external command exited with a non-zero status.
    #[error("command `{command}` failed: {output}")]
    Tooling { command: String, output: String },

    /// An external command could not be started at all.
    #[error("could not run `{command}`: {reason}")]
    ToolingUnavailable { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Template mode failure (clone, manifest rewrite, import rewrite, setup hook).
    #[error("Template error: {reason}")]
    Template { reason: String },

    /// Rendering the generated sources failed.
    #[error("Rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Tooling { command, .. } => vec![
                format!("`{command}` reported an error, see its output above"),
                "Check that the Go toolchain is installed and on PATH".into(),
            ],
            Self::ToolingUnavailable { command, .. } => vec![
                format!("Could not start `{command}`"),
                "Install Go from https://go.dev/dl/ and make sure `go` is on PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::Template { .. } => vec![
                "Check the repository URL and your network connection".into(),
                "Try: modforge list templates".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Partially generated files may remain in {}", path.display()),
                "Remove the directory manually before retrying".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Tooling { .. } | Self::ToolingUnavailable { .. } => ErrorCategory::Tooling,
            Self::Template { .. } => ErrorCategory::Template,
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Io,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}
