//! Application layer for Modforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (Generator, TemplateInstaller)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerationReport, Generator, TemplateInstaller, TemplateSource, toolchain,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandOutput, CommandRunner, Filesystem, NoopProgress, ProgressReporter, ProjectRenderer,
    RepositoryCloner,
};

pub use error::ApplicationError;
