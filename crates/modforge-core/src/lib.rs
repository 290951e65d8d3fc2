//! Modforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Modforge
//! Go project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          modforge-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (Generator, TemplateInstaller)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, CommandRunner, Cloner,     │
//! │  ProjectRenderer, ProgressReporter)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    modforge-adapters (Infrastructure)   │
//! │ (LocalFilesystem, ProcessRunner, Git)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Settings, Registry, Descriptor, Plan) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modforge_core::prelude::*;
//!
//! let registry = modforge_adapters::builtin::registry();
//! let settings = Settings::builder()
//!     .module("github.com/acme/billing")
//!     .go_version("1.22")
//!     .path("./billing")
//!     .adapter("redis")
//!     .build(&registry)?;
//!
//! let generator = Generator::new(registry, filesystem, runner, renderer);
//! generator.generate(&settings)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, Generator, TemplateInstaller, TemplateSource,
        ports::{
            CommandOutput, CommandRunner, Filesystem, ProgressReporter, ProjectRenderer,
            RepositoryCloner,
        },
    };
    pub use crate::domain::{
        Descriptor, DescriptorKind, GenerationStage, ProjectStructure, Registry, RenderContext,
        RepoTemplate, Settings, SettingsBuilder,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
