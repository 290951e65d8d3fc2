pub mod common;
pub mod descriptor;
pub mod project_structure;
pub mod registry;
pub mod repo_template;
pub mod settings;

pub use super::error::DomainError;
