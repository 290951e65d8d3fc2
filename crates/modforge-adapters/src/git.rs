//! Repository cloning through libgit2.

use std::path::Path;

use git2::build::RepoBuilder;
use modforge_core::{
    application::{ApplicationError, ports::RepositoryCloner},
    error::ForgeResult,
};
use tracing::{debug, instrument};

/// Clones over HTTPS, SSH or `file://` with libgit2.
///
/// History is discarded later by the installer when it removes `.git`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCloner;

impl GitCloner {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryCloner for GitCloner {
    #[instrument(skip(self), fields(into = %into.display()))]
    fn fetch_into(&self, url: &str, into: &Path) -> ForgeResult<()> {
        debug!("Cloning repository '{}'.", url);

        RepoBuilder::new().clone(url, into).map(|_| ()).map_err(|e| {
            ApplicationError::Template {
                reason: format!("failed to clone {url}: {}", e.message()),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    fn seed_repo(dir: &Path) {
        let repo = Repository::init(dir).unwrap();
        std::fs::write(dir.join("go.mod"), "module github.com/acme/tmpl\n\ngo 1.20\n").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("go.mod")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("dev", "dev@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[]).unwrap();
    }

    #[test]
    fn clones_local_repository() {
        let source = TempDir::new().unwrap();
        seed_repo(source.path());
        let target = TempDir::new().unwrap();
        let into = target.path().join("svc");

        let url = format!("file://{}", source.path().display());
        GitCloner::new().fetch_into(&url, &into).unwrap();

        let manifest = std::fs::read_to_string(into.join("go.mod")).unwrap();
        assert!(manifest.starts_with("module github.com/acme/tmpl"));
        assert!(into.join(".git").exists());
    }

    #[test]
    fn unknown_repository_is_template_error() {
        let target = TempDir::new().unwrap();
        let err = GitCloner::new()
            .fetch_into("file:///definitely/not/here", &target.path().join("x"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to clone"));
    }
}
