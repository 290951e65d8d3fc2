// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// Every variant is a rejection of user input. Nothing has been written to
/// disk when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("module name must not be empty")]
    EmptyModule,

    #[error("Go version must not be empty")]
    EmptyGoVersion,

    #[error("target directory is not empty: {}", path.display())]
    TargetNotEmpty { path: PathBuf },

    #[error("target path is not a directory: {}", path.display())]
    TargetNotDirectory { path: PathBuf },

    #[error("path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("invalid template url '{url}': {reason}")]
    InvalidTemplateUrl { url: String, reason: String },

    // ========================================================================
    // Invariant Violations
    // ========================================================================
    #[error("duplicate generated path: {path}")]
    DuplicatePath { path: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("unknown adapter '{name}'")]
    UnknownAdapter { name: String },

    #[error("unknown service '{name}'")]
    UnknownService { name: String },

    #[error("unknown flavor '{flavor}' for service '{service}'")]
    UnknownFlavor { service: String, flavor: String },

    #[error("unknown logger '{name}'")]
    UnknownLogger { name: String },

    #[error("unknown template '{name}'")]
    UnknownTemplate { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyModule => vec![
                "Pass a module import path, e.g. --module github.com/acme/billing".into(),
            ],
            Self::EmptyGoVersion => vec![
                "Pass a Go version, e.g. --go-version 1.22".into(),
                "Or install Go so the local version can be detected".into(),
            ],
            Self::TargetNotEmpty { path } => vec![
                format!("'{}' already contains files", path.display()),
                "Choose an empty or non-existent directory".into(),
            ],
            Self::TargetNotDirectory { path } => vec![
                format!("'{}' exists and is a file", path.display()),
                "Choose a directory path instead".into(),
            ],
            Self::PathEscapesRoot { path } => vec![
                format!("'{path}' must be relative to the project root"),
            ],
            Self::InvalidTemplateUrl { .. } => vec![
                "Use a full repository URL, e.g. https://github.com/acme/go-template".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two descriptors render '{path}'"),
                "Check that custom descriptors use distinct packages".into(),
            ],
            Self::UnknownAdapter { .. } => vec!["Try: modforge list adapters".into()],
            Self::UnknownService { .. } | Self::UnknownFlavor { .. } => {
                vec!["Try: modforge list services".into()]
            }
            Self::UnknownLogger { .. } => vec!["Try: modforge list loggers".into()],
            Self::UnknownTemplate { .. } => vec![
                "Try: modforge list templates".into(),
                "Or use an arbitrary repository with: modforge template --custom --url <URL>"
                    .into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownAdapter { .. }
            | Self::UnknownService { .. }
            | Self::UnknownFlavor { .. }
            | Self::UnknownLogger { .. }
            | Self::UnknownTemplate { .. } => ErrorCategory::NotFound,
            Self::DuplicatePath { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
