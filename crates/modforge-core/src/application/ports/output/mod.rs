//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `modforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::domain::{EnabledModule, GenerationStage, Permissions, ProjectStructure, Settings};
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `modforge_adapters::filesystem::LocalFilesystem` (production)
/// - `modforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Paths are passed through as given; the generator always joins them onto
///   the target directory first
/// - Permissions are capability-based, not Unix-specific
pub trait Filesystem: Send + Sync {
    /// Create a single directory. The parent must exist.
    fn create_dir(&self, path: &Path) -> ForgeResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Read a file's raw bytes.
    fn read_file(&self, path: &Path) -> ForgeResult<Vec<u8>>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, permissions: Permissions) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Direct children of a directory, as full paths, sorted.
    fn read_dir(&self, path: &Path) -> ForgeResult<Vec<PathBuf>>;

    /// Every regular file below `root`, recursively, sorted.
    fn walk_files(&self, root: &Path) -> ForgeResult<Vec<PathBuf>>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ForgeResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Read a file as UTF-8.
    fn read_to_string(&self, path: &Path) -> ForgeResult<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// True when `path` is absent, or a directory with no entries.
    fn is_empty_or_absent(&self, path: &Path) -> ForgeResult<bool> {
        if !self.exists(path) {
            return Ok(true);
        }
        Ok(self.is_dir(path) && self.read_dir(path)?.is_empty())
    }
}

/// Combined result of an external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    /// stdout followed by stderr.
    pub output: String,
}

impl CommandOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Port for running external commands in a working directory.
///
/// Implemented by:
/// - `modforge_adapters::process::ProcessRunner` (std::process)
///
/// Returns `Err` only when the program could not be started; a non-zero
/// exit is reported through `CommandOutput::success`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> ForgeResult<CommandOutput>;
}

/// Port for fetching template repositories.
///
/// Implemented by:
/// - `modforge_adapters::git::GitCloner` (libgit2)
pub trait RepositoryCloner: Send + Sync {
    /// Clone `url` into the existing, empty directory `into`.
    fn fetch_into(&self, url: &str, into: &Path) -> ForgeResult<()>;
}

/// Port for turning enabled descriptors into source files.
///
/// Implemented by:
/// - `modforge_adapters::renderer::GoRenderer`
pub trait ProjectRenderer: Send + Sync {
    /// Render every generated file. Paths in the result are relative to the target.
    fn render(
        &self,
        settings: &Settings,
        modules: &[EnabledModule<'_>],
    ) -> ForgeResult<ProjectStructure>;
}

/// Port for stage notifications.
///
/// All methods default to no-ops.
pub trait ProgressReporter: Send + Sync {
    /// A long-running step (external command, clone) is about to start.
    fn step_started(&self, _message: &str) {}

    /// A stage was reached.
    fn stage_completed(&self, _stage: GenerationStage, _message: &str) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {}
