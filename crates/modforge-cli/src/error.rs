//! Error handling for the Modforge CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use modforge_core::error::{ErrorCategory as CoreCategory, ForgeError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or missing command-line input that clap cannot catch.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from generation or template installation.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("{0}")]
    Core(#[from] ForgeError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Rendering machine-readable output failed.
    #[error("Failed to render output: {message}")]
    Output { message: String },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Shorthand for [`CliError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Use --help for usage information".into()],

            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path(None).display()
                ),
                "Inspect the effective values with: modforge config list".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Output { .. } => vec!["Retry with --format human".into()],

            Self::Cancelled => vec!["No changes were made".into()],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{feature}' feature is not available in this build"),
                "Use the non-interactive commands instead: modforge generate --help".into(),
                format!("Or reinstall with: cargo install modforge-cli --features {feature}"),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::UserError
            }
            Self::ConfigError { .. } | Self::IoError { .. } => ErrorCategory::Io,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::NotFound => ErrorCategory::UserError,
                CoreCategory::Tooling | CoreCategory::Template => ErrorCategory::Tooling,
                CoreCategory::Io => ErrorCategory::Io,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Output { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category            | Code |
    /// |---------------------|------|
    /// | User / validation   |  2   |
    /// | Tooling / template  |  3   |
    /// | I/O / configuration |  4   |
    /// | Internal            |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Tooling => 3,
            ErrorCategory::Io => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            self.category().label().red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\n{}: {}\n", self.category().label(), self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Tooling => tracing::error!("Tooling error: {}", self),
            ErrorCategory::Io => tracing::error!("I/O error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, unknown names).
    UserError,
    /// The Go toolchain or a template repository failed.
    Tooling,
    /// Filesystem or configuration file failure.
    Io,
    /// Internal/system error.
    Internal,
}

impl ErrorCategory {
    /// Header printed in front of the message.
    pub fn label(self) -> &'static str {
        match self {
            Self::UserError => "Error",
            Self::Tooling => "Tooling error",
            Self::Io => "I/O error",
            Self::Internal => "Internal error",
        }
    }
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use modforge_core::{application::ApplicationError, domain::DomainError};

    fn core(err: impl Into<ForgeError>) -> CliError {
        CliError::Core(err.into())
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn validation_errors_exit_2() {
        assert_eq!(core(DomainError::EmptyModule).exit_code(), 2);
        assert_eq!(
            core(DomainError::TargetNotEmpty {
                path: PathBuf::from("/tmp/x")
            })
            .exit_code(),
            2
        );
        assert_eq!(CliError::invalid("missing --module").exit_code(), 2);
    }

    #[test]
    fn unknown_names_exit_2() {
        let err = core(DomainError::UnknownAdapter {
            name: "postgresql".into(),
        });
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("list adapters")));
    }

    #[test]
    fn tooling_and_template_errors_exit_3() {
        let tooling = core(ApplicationError::Tooling {
            command: "go mod tidy".into(),
            output: "no network".into(),
        });
        assert_eq!(tooling.exit_code(), 3);

        let template = core(ApplicationError::Template {
            reason: "clone failed".into(),
        });
        assert_eq!(template.exit_code(), 3);
    }

    #[test]
    fn io_errors_exit_4() {
        let fs = core(ApplicationError::FilesystemError {
            path: PathBuf::from("/ro"),
            reason: "read-only".into(),
        });
        assert_eq!(fs.exit_code(), 4);
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn internal_errors_exit_1() {
        let err = core(ForgeError::Internal {
            message: "lock poisoned".into(),
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn feature_not_available_is_usage_error() {
        let err = CliError::FeatureNotAvailable {
            feature: "interactive",
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("generate")));
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_header_and_suggestions() {
        let err = core(DomainError::TargetNotEmpty {
            path: PathBuf::from("/tmp/x"),
        });
        let s = err.format_plain(false);
        assert!(s.contains("Error: target directory is not empty"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let err = CliError::Cancelled;
        let s = err.format_plain(true);
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_prints_cause() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        assert!(err.format_plain(true).contains("Caused by: disk full"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { message, .. }) if message == "reading config"));
    }
}
