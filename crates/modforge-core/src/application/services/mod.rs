//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "install a template".

pub mod generator;
pub mod template_installer;
pub mod toolchain;

pub use generator::{GenerationReport, Generator};
pub use template_installer::{TemplateInstaller, TemplateSource};
