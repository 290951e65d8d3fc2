//! Template mode: clone an existing repository and give it a new identity.
//!
//! Steps: clone, drop `.git`, rewrite `go.mod` (module and go lines), apply
//! the template's setup actions, then replace the module path the clone
//! declared with the new module everywhere else in the tree. A failure clears
//! whatever the run put into the target directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, NoopProgress, ProgressReporter, RepositoryCloner},
        services::generator::{GenerationReport, RunLedger, prepare_target, rollback_error},
    },
    domain::{
        GenerationStage, Registry, RenderContext, RepoTemplate, SetupAction, Settings,
        manifest::{self, MANIFEST},
    },
    error::ForgeResult,
};

/// Which repository to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A template registered in the registry, by import path.
    Registered(String),
    /// Any repository URL; no setup actions run.
    Custom(String),
}

impl TemplateSource {
    /// Resolve to a concrete template.
    ///
    /// An unknown registered name is a template error, a malformed custom URL
    /// is a validation error.
    pub fn resolve(&self, registry: &Registry) -> ForgeResult<RepoTemplate> {
        match self {
            Self::Registered(name) => registry.template(name).cloned().map_err(|e| {
                ApplicationError::Template {
                    reason: e.to_string(),
                }
                .into()
            }),
            Self::Custom(url) => Ok(RepoTemplate::custom(url)?),
        }
    }
}

pub struct TemplateInstaller {
    registry: Registry,
    filesystem: Box<dyn Filesystem>,
    cloner: Box<dyn RepositoryCloner>,
    progress: Box<dyn ProgressReporter>,
}

impl TemplateInstaller {
    pub fn new(
        registry: Registry,
        filesystem: Box<dyn Filesystem>,
        cloner: Box<dyn RepositoryCloner>,
    ) -> Self {
        Self {
            registry,
            filesystem,
            cloner,
            progress: Box::new(NoopProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[instrument(
        skip_all,
        fields(
            module = %settings.module(),
            path = %settings.path().display(),
            source = ?source
        )
    )]
    pub fn install(
        &self,
        settings: &Settings,
        source: &TemplateSource,
    ) -> ForgeResult<GenerationReport> {
        let template = source.resolve(&self.registry)?;
        info!(template = %template.name(), "Template resolved");

        let mut ledger = prepare_target(self.filesystem.as_ref(), settings.path())?;

        match self.run(settings, &template, &mut ledger) {
            Ok(()) => {
                ledger.stage = GenerationStage::Done;
                self.progress.stage_completed(GenerationStage::Done, "Done!");
                info!(files = ledger.files.len(), "Template installed");
                Ok(GenerationReport {
                    stage: ledger.stage,
                    directories: ledger.directories,
                    files: ledger.files,
                })
            }
            Err(e) => {
                warn!(error = %e, stage = %ledger.stage, "Template install failed, cleaning up");
                match self.clear(&ledger) {
                    Ok(()) => {
                        self.progress
                            .stage_completed(GenerationStage::RolledBack, "Rolled back");
                        Err(e)
                    }
                    Err(rollback_err) => {
                        warn!(original = %e, "Cleanup stopped early");
                        Err(rollback_err)
                    }
                }
            }
        }
    }

    fn run(
        &self,
        settings: &Settings,
        template: &RepoTemplate,
        ledger: &mut RunLedger,
    ) -> ForgeResult<()> {
        let root = settings.path();
        let fs = self.filesystem.as_ref();

        let url = template.clone_url();
        self.progress.step_started(&format!("Cloning {url}"));
        self.cloner.fetch_into(&url, root)?;
        let git_dir = root.join(".git");
        if fs.exists(&git_dir) {
            fs.remove_dir_all(&git_dir)?;
        }
        self.advance(ledger, GenerationStage::TemplateCloned, &format!("Cloned {}", template.name()));

        let manifest_path = root.join(MANIFEST);
        if !fs.exists(&manifest_path) {
            return Err(ApplicationError::Template {
                reason: format!("{} has no {MANIFEST} at its root", template.name()),
            }
            .into());
        }
        let content = fs.read_to_string(&manifest_path)?;
        // Vanity and /vN modules declare a path that differs from the URL.
        let original = manifest::declared_module(&content)
            .filter(|m| !m.is_empty())
            .unwrap_or(template.import_path())
            .to_string();
        debug!(%original, "Template module path");
        let rewritten =
            manifest::rewrite_manifest(&content, settings.go_version(), Some(settings.module()));
        fs.write_file(&manifest_path, &rewritten)?;
        self.advance(
            ledger,
            GenerationStage::ModuleManifestCreated,
            &format!(
                "Set module version to {} and module name to {}",
                settings.go_version(),
                settings.module()
            ),
        );

        self.apply_setup(root, template, settings)?;
        self.advance(ledger, GenerationStage::TemplateConfigured, "Setup template");

        let rewritten = self.replace_imports(root, &original, settings.module())?;
        ledger.files = rewritten;
        self.advance(ledger, GenerationStage::ImportsRewritten, "Updated imports");

        Ok(())
    }

    fn advance(&self, ledger: &mut RunLedger, stage: GenerationStage, message: &str) {
        ledger.stage = stage;
        info!(%stage, "{message}");
        self.progress.stage_completed(stage, message);
    }

    fn apply_setup(
        &self,
        root: &Path,
        template: &RepoTemplate,
        settings: &Settings,
    ) -> ForgeResult<()> {
        let fs = self.filesystem.as_ref();
        let ctx = RenderContext::for_settings(settings);

        for action in template.setup() {
            match action {
                SetupAction::Remove(rel) => {
                    let path = root.join(rel.as_path());
                    if fs.is_dir(&path) {
                        fs.remove_dir_all(&path)?;
                    } else if fs.exists(&path) {
                        fs.remove_file(&path)?;
                    }
                    debug!(path = %rel, "removed");
                }
                SetupAction::Write { path, content } => {
                    let full = root.join(path.as_path());
                    if let Some(parent) = full.parent() {
                        fs.create_dir_all(parent)?;
                    }
                    fs.write_file(&full, &ctx.render(content))?;
                    debug!(path = %path, "written");
                }
            }
        }
        Ok(())
    }

    /// Literal replacement of `old` with `new` in every UTF-8 file below `root`.
    ///
    /// Returns the files that changed. Binary files and the root manifest,
    /// whose module line is already final, are skipped.
    fn replace_imports(&self, root: &Path, old: &str, new: &str) -> ForgeResult<Vec<PathBuf>> {
        let fs = self.filesystem.as_ref();
        let manifest_path = root.join(MANIFEST);
        let mut changed = Vec::new();

        if old == new {
            return Ok(changed);
        }

        for path in fs.walk_files(root)? {
            if path == manifest_path {
                continue;
            }
            let Ok(text) = String::from_utf8(fs.read_file(&path)?) else {
                debug!(path = %path.display(), "skipping binary file");
                continue;
            };
            if text.contains(old) {
                fs.write_file(&path, &text.replace(old, new))?;
                changed.push(path);
            }
        }

        info!(files = changed.len(), from = old, to = new, "Imports rewritten");
        Ok(changed)
    }

    /// Empty the target again; remove it entirely if this run created it.
    fn clear(&self, ledger: &RunLedger) -> ForgeResult<()> {
        let fs = self.filesystem.as_ref();
        if !fs.exists(&ledger.root) {
            return Ok(());
        }
        if ledger.created_root {
            return fs
                .remove_dir_all(&ledger.root)
                .map_err(|e| rollback_error(&ledger.root, &e));
        }
        for entry in fs.read_dir(&ledger.root)? {
            let result = if fs.is_dir(&entry) {
                fs.remove_dir_all(&entry)
            } else {
                fs.remove_file(&entry)
            };
            result.map_err(|e| rollback_error(&entry, &e))?;
        }
        Ok(())
    }
}
