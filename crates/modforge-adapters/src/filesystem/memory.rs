//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use modforge_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::Permissions,
    error::{ForgeError, ForgeResult},
};

/// In-memory filesystem for testing.
///
/// Behaves like a strict local filesystem: writing a file or creating a
/// single directory requires the parent to exist.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    permissions: HashMap<PathBuf, Permissions>,
    /// Writes to these paths fail, for exercising rollback.
    failing_writes: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    fn read(&self) -> ForgeResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write(&self) -> ForgeResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error())
    }

    /// Read a file's content as text (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path.as_ref())
            .and_then(|b| String::from_utf8(b.clone()).ok())
    }

    /// Store raw bytes, creating parents (testing helper).
    pub fn insert_bytes(&self, path: impl AsRef<Path>, bytes: &[u8]) -> ForgeResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        self.write()?.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    /// Store text, creating parents (testing helper).
    pub fn insert_file(&self, path: impl AsRef<Path>, content: &str) -> ForgeResult<()> {
        self.insert_bytes(path, content.as_bytes())
    }

    /// Make every later write to `path` fail.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_writes.insert(path.into());
        }
    }

    /// Permissions applied to `path`, if any were set.
    pub fn permissions_of(&self, path: impl AsRef<Path>) -> Option<Permissions> {
        let inner = self.inner.read().ok()?;
        inner.permissions.get(path.as_ref()).copied()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// List all directories, sorted.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
            inner.permissions.clear();
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.write()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist"));
            }
        }
        if inner.files.contains_key(path) {
            return Err(fs_error(path, "A file exists at this path"));
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.write()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let mut inner = self.write()?;

        if inner.failing_writes.contains(path) {
            return Err(fs_error(path, "Injected write failure"));
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist"));
            }
        }

        inner
            .files
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ForgeResult<Vec<u8>> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file"))
    }

    fn set_permissions(&self, path: &Path, permissions: Permissions) -> ForgeResult<()> {
        let mut inner = self.write()?;
        if !inner.files.contains_key(path) {
            return Err(fs_error(path, "No such file"));
        }
        inner.permissions.insert(path.to_path_buf(), permissions);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_dir(&self, path: &Path) -> ForgeResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "No such directory"));
        }
        let mut children: Vec<PathBuf> = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        children.sort();
        Ok(children)
    }

    fn walk_files(&self, root: &Path) -> ForgeResult<Vec<PathBuf>> {
        let inner = self.read()?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }

    fn remove_file(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.write()?;
        inner
            .files
            .remove(path)
            .ok_or_else(|| fs_error(path, "No such file"))?;
        inner.permissions.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.write()?;

        if !inner.directories.contains(path) {
            return Err(fs_error(path, "No such directory"));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.permissions.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

fn fs_error(path: &Path, reason: &str) -> ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn lock_error() -> ForgeError {
    ForgeError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());
        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.contents("/a/b.txt").as_deref(), Some("x"));
    }

    #[test]
    fn read_dir_lists_direct_children_only() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/r/a/deep.go", "").unwrap();
        fs.insert_file("/r/top.go", "").unwrap();

        let children = fs.read_dir(Path::new("/r")).unwrap();
        assert_eq!(children, vec![PathBuf::from("/r/a"), PathBuf::from("/r/top.go")]);
        assert!(!fs.is_empty_or_absent(Path::new("/r")).unwrap());
        assert!(fs.is_empty_or_absent(Path::new("/nope")).unwrap());
    }

    #[test]
    fn remove_dir_all_drops_subtree() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/r/pkg/redis/service.go", "").unwrap();
        fs.remove_dir_all(Path::new("/r/pkg")).unwrap();
        assert!(!fs.exists(Path::new("/r/pkg/redis")));
        assert!(fs.exists(Path::new("/r")));
        assert!(fs.list_files().is_empty());
    }

    #[test]
    fn injected_write_failure() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/r")).unwrap();
        fs.fail_writes_to("/r/x");
        assert!(fs.write_file(Path::new("/r/x"), "").is_err());
    }
}
