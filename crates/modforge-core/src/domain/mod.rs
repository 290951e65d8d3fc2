// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Modforge.
//!
//! This module contains pure generation rules with no I/O. Filesystem,
//! process and network access are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No tracing**: Observability belongs to the application and CLI layers
//! - **Immutable records**: `Settings` and descriptors never change after construction
pub mod entities;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod render;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-exports for convenience
pub use entities::{
    common::{Permissions, RelativePath},
    descriptor::{
        ConfigBlock, ConfigValue, Descriptor, DescriptorKind, EnabledModule, Flavor, Fragments,
        ServiceFile,
    },
    project_structure::{FileRole, FileToWrite, ProjectStructure},
    registry::Registry,
    repo_template::{RepoTemplate, SetupAction},
    settings::{DEFAULT_LOGGER, Settings, SettingsBuilder, normalize_go_version},
};

pub use error::{DomainError, ErrorCategory};
pub use plan::DirectoryPlan;
pub use render::RenderContext;
pub use value_objects::{GenerationStage, GoImport};
