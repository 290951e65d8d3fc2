use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A filesystem path guaranteed to stay inside the project root.
///
/// Invariant: never absolute and never climbs with `..`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if escapes {
            Err(DomainError::PathEscapesRoot {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Capability-based permissions model.
///
/// `owner_only` maps to mode `0600` on unix and is used for files that may
/// carry credentials (the generated YAML config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    writable: bool,
    executable: bool,
    owner_only: bool,
}

impl Permissions {
    pub const fn read_write() -> Self {
        Self {
            writable: true,
            executable: false,
            owner_only: false,
        }
    }

    pub const fn owner_only() -> Self {
        Self {
            writable: true,
            executable: false,
            owner_only: true,
        }
    }

    pub const fn executable() -> Self {
        Self {
            writable: true,
            executable: true,
            owner_only: false,
        }
    }

    pub const fn writable(&self) -> bool {
        self.writable
    }
    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
    pub const fn owner_only_flag(&self) -> bool {
        self.owner_only
    }

    /// True when the adapter must change the platform default mode.
    pub const fn is_default(&self) -> bool {
        !self.executable && !self.owner_only
    }

    /// Unix mode bits for this permission set.
    pub const fn unix_mode(&self) -> u32 {
        match (self.owner_only, self.executable) {
            (true, true) => 0o700,
            (true, false) => 0o600,
            (false, true) => 0o755,
            (false, false) => 0o644,
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_rejects_escapes() {
        assert!(RelativePath::try_new("pkg/redis").is_ok());
        assert!(RelativePath::try_new("../outside").is_err());
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("a").unwrap().join("..").is_err());
    }

    #[test]
    fn permission_modes() {
        assert_eq!(Permissions::owner_only().unix_mode(), 0o600);
        assert_eq!(Permissions::executable().unix_mode(), 0o755);
        assert!(Permissions::default().is_default());
        assert!(!Permissions::owner_only().is_default());
    }
}
