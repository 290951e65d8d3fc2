use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

/// Which generation step a rendered file belongs to.
///
/// The generator writes files group by group so each group maps onto one
/// stage of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Logger,
    Main,
    App,
    Config,
    Service,
}

/// Rendered project files ready for materialization.
///
/// This is the output of the rendering step. It contains no logic, only data.
/// Paths are relative to the target directory.
#[derive(Debug, Clone, Default)]
pub struct ProjectStructure {
    files: Vec<FileToWrite>,
}

impl ProjectStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        content: String,
        role: FileRole,
        permissions: Permissions,
    ) -> Result<(), DomainError> {
        let path = RelativePath::try_new(path)?;
        self.files.push(FileToWrite {
            path,
            content,
            role,
            permissions,
        });
        Ok(())
    }

    pub fn with_file(
        mut self,
        path: impl Into<PathBuf>,
        content: String,
        role: FileRole,
    ) -> Result<Self, DomainError> {
        self.add_file(path, content, role, Permissions::default())?;
        Ok(self)
    }

    /// Reject duplicate paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter()
    }

    pub fn files_with_role(&self, role: FileRole) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter().filter(move |f| f.role == role)
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&FileToWrite> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path.as_path() == path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
    pub role: FileRole,
    pub permissions: Permissions,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
