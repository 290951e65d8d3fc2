//! Domain value objects: GenerationStage, GoImport.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. This
//! file defines the types, their string representations and their parsers.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── GenerationStage ───────────────────────────────────────────────────────────

/// Where a generation run is (or stopped).
///
/// Scaffold mode walks these in declaration order; any failure after
/// `ModuleManifestCreated` ends in `RolledBack`. Template mode reports the
/// `Template*` stages instead of the file-assembly ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationStage {
    Init,
    ModuleManifestCreated,
    FolderStructureCreated,
    LoggerInstalled,
    MainFileWritten,
    AppFileWritten,
    ConfigFilesWritten,
    DescriptorFilesCopied,
    DependenciesResolved,
    TemplateCloned,
    TemplateConfigured,
    ImportsRewritten,
    Done,
    RolledBack,
}

impl GenerationStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ModuleManifestCreated => "module-manifest-created",
            Self::FolderStructureCreated => "folder-structure-created",
            Self::LoggerInstalled => "logger-installed",
            Self::MainFileWritten => "main-file-written",
            Self::AppFileWritten => "app-file-written",
            Self::ConfigFilesWritten => "config-files-written",
            Self::DescriptorFilesCopied => "descriptor-files-copied",
            Self::DependenciesResolved => "dependencies-resolved",
            Self::TemplateCloned => "template-cloned",
            Self::TemplateConfigured => "template-configured",
            Self::ImportsRewritten => "imports-rewritten",
            Self::Done => "done",
            Self::RolledBack => "rolled-back",
        }
    }

    /// The stages scaffold mode passes through, in order.
    pub const SCAFFOLD: [GenerationStage; 10] = [
        Self::Init,
        Self::ModuleManifestCreated,
        Self::FolderStructureCreated,
        Self::LoggerInstalled,
        Self::MainFileWritten,
        Self::AppFileWritten,
        Self::ConfigFilesWritten,
        Self::DescriptorFilesCopied,
        Self::DependenciesResolved,
        Self::Done,
    ];

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::RolledBack)
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── GoImport ──────────────────────────────────────────────────────────────────

/// One Go import spec, optionally aliased (`_ "github.com/go-sql-driver/mysql"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoImport {
    path: String,
    alias: Option<String>,
}

impl GoImport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    pub fn aliased(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: Some(alias.into()),
        }
    }

    /// Parse `"path"` or `"alias path"`.
    pub fn parse(spec: &str) -> Self {
        match spec.trim().split_once(char::is_whitespace) {
            Some((alias, path)) => Self::aliased(alias, path.trim()),
            None => Self::new(spec.trim()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Standard-library imports have no dot in their first path element.
    pub fn is_std(&self) -> bool {
        let first = self.path.split('/').next().unwrap_or_default();
        !first.contains('.')
    }
}

impl fmt::Display for GoImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{alias} \"{}\"", self.path),
            None => write!(f, "\"{}\"", self.path),
        }
    }
}
