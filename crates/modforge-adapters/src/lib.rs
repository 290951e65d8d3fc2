//! Infrastructure adapters for Modforge.
//!
//! This crate implements the ports defined in `modforge_core::application::ports`
//! and ships the built-in descriptor registry. All I/O lives here.

pub mod builtin;
pub mod filesystem;
pub mod git;
pub mod process;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use git::GitCloner;
pub use process::ProcessRunner;
pub use renderer::GoRenderer;
