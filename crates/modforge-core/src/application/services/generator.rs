//! Generator - scaffold mode orchestrator.
//!
//! This service coordinates a scaffold run:
//! 1. Validate the target directory (empty or absent)
//! 2. Render every file from the enabled descriptors (no I/O yet)
//! 3. `go mod init`, then pin the Go version in `go.mod`
//! 4. Create the directory plan
//! 5. Write logger, main, app, config and descriptor files
//! 6. `go mod tidy`
//!
//! Any failure after the target has been touched triggers a best-effort
//! rollback of everything this run created.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{
            CommandRunner, Filesystem, NoopProgress, ProgressReporter, ProjectRenderer,
        },
        services::toolchain,
    },
    domain::{
        DirectoryPlan, DomainError, FileRole, GenerationStage, ProjectStructure, Registry,
        Settings,
        manifest::{self, MANIFEST},
    },
    error::{ForgeError, ForgeResult},
};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Last stage reached; `Done` on success.
    pub stage: GenerationStage,
    /// Directories this run created, in creation order.
    pub directories: Vec<PathBuf>,
    /// Files this run wrote, in write order.
    pub files: Vec<PathBuf>,
}

/// Bookkeeping for one run, consulted by rollback.
#[derive(Debug)]
pub(crate) struct RunLedger {
    pub(crate) root: PathBuf,
    pub(crate) created_root: bool,
    pub(crate) directories: Vec<PathBuf>,
    pub(crate) files: Vec<PathBuf>,
    pub(crate) stage: GenerationStage,
}

impl RunLedger {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            created_root: false,
            directories: Vec::new(),
            files: Vec::new(),
            stage: GenerationStage::Init,
        }
    }

    fn into_report(self) -> GenerationReport {
        GenerationReport {
            stage: self.stage,
            directories: self.directories,
            files: self.files,
        }
    }
}

/// Reject a target that is a file or a non-empty directory; create it if absent.
///
/// Nothing is written when this fails.
pub(crate) fn prepare_target(fs: &dyn Filesystem, root: &Path) -> ForgeResult<RunLedger> {
    let mut ledger = RunLedger::new(root);

    if fs.exists(root) && !fs.is_dir(root) {
        return Err(DomainError::TargetNotDirectory {
            path: root.to_path_buf(),
        }
        .into());
    }
    if !fs.is_empty_or_absent(root)? {
        return Err(DomainError::TargetNotEmpty {
            path: root.to_path_buf(),
        }
        .into());
    }
    if !fs.exists(root) {
        fs.create_dir_all(root)?;
        ledger.created_root = true;
    }
    Ok(ledger)
}

/// Main scaffolding service.
pub struct Generator {
    registry: Registry,
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    renderer: Box<dyn ProjectRenderer>,
    progress: Box<dyn ProgressReporter>,
}

impl Generator {
    /// Create a generator over an explicit registry and the given adapters.
    pub fn new(
        registry: Registry,
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        renderer: Box<dyn ProjectRenderer>,
    ) -> Self {
        Self {
            registry,
            filesystem,
            runner,
            renderer,
            progress: Box::new(NoopProgress),
        }
    }

    /// Report stage transitions to `progress`.
    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render every file without touching the filesystem.
    pub fn render(&self, settings: &Settings) -> ForgeResult<ProjectStructure> {
        let modules = self.registry.enabled(settings)?;
        let structure = self.renderer.render(settings, &modules)?;
        structure.validate()?;
        Ok(structure)
    }

    /// Scaffold a new project into `settings.path()`.
    #[instrument(
        skip_all,
        fields(
            module = %settings.module(),
            path = %settings.path().display(),
            go = %settings.go_version()
        )
    )]
    pub fn generate(&self, settings: &Settings) -> ForgeResult<GenerationReport> {
        info!("Generating project {settings}");

        // Everything that can be checked without side effects goes first.
        let modules = self.registry.enabled(settings)?;
        let plan = DirectoryPlan::for_modules(&modules);
        let structure = self.render(settings)?;

        let mut ledger = prepare_target(self.filesystem.as_ref(), settings.path())?;

        match self.run(settings, &plan, &structure, &mut ledger) {
            Ok(()) => {
                ledger.stage = GenerationStage::Done;
                self.progress.stage_completed(GenerationStage::Done, "Done!");
                info!(
                    directories = ledger.directories.len(),
                    files = ledger.files.len(),
                    "Generation completed successfully"
                );
                Ok(ledger.into_report())
            }
            Err(e) => {
                warn!(error = %e, stage = %ledger.stage, "Generation failed, rolling back");
                match self.rollback(&ledger) {
                    Ok(()) => {
                        self.progress
                            .stage_completed(GenerationStage::RolledBack, "Rolled back");
                        Err(e)
                    }
                    Err(rollback_err) => {
                        warn!(original = %e, "Rollback stopped early");
                        Err(rollback_err)
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    fn run(
        &self,
        settings: &Settings,
        plan: &DirectoryPlan,
        structure: &ProjectStructure,
        ledger: &mut RunLedger,
    ) -> ForgeResult<()> {
        let root = settings.path();

        self.progress
            .step_started(&format!("go mod init {}", settings.module()));
        toolchain::mod_init(self.runner.as_ref(), root, settings.module())?;
        ledger.files.push(root.join(MANIFEST));
        self.pin_go_version(root, settings.go_version())?;
        self.advance(
            ledger,
            GenerationStage::ModuleManifestCreated,
            &format!(
                "Executed `go mod init {}` and set Go version to {}",
                settings.module(),
                settings.go_version()
            ),
        );

        for dir in plan.paths() {
            self.ensure_dir(ledger, &root.join(dir))?;
        }
        self.advance(
            ledger,
            GenerationStage::FolderStructureCreated,
            "Generated folder structure",
        );

        let steps = [
            (
                FileRole::Logger,
                GenerationStage::LoggerInstalled,
                format!("Using logger: {}", settings.logger()),
            ),
            (
                FileRole::Main,
                GenerationStage::MainFileWritten,
                "Generated main.go file".to_string(),
            ),
            (
                FileRole::App,
                GenerationStage::AppFileWritten,
                "Generated app.go file".to_string(),
            ),
            (
                FileRole::Config,
                GenerationStage::ConfigFilesWritten,
                "Generated config files".to_string(),
            ),
            (
                FileRole::Service,
                GenerationStage::DescriptorFilesCopied,
                "Copied adapter and service files".to_string(),
            ),
        ];
        for (role, stage, message) in steps {
            self.write_role(structure, role, ledger)?;
            self.advance(ledger, stage, &message);
        }

        self.progress.step_started("go mod tidy");
        toolchain::mod_tidy(self.runner.as_ref(), root)?;
        self.advance(
            ledger,
            GenerationStage::DependenciesResolved,
            "Executed `go mod tidy`",
        );

        Ok(())
    }

    fn advance(&self, ledger: &mut RunLedger, stage: GenerationStage, message: &str) {
        ledger.stage = stage;
        info!(%stage, "{message}");
        self.progress.stage_completed(stage, message);
    }

    fn pin_go_version(&self, root: &Path, version: &str) -> ForgeResult<()> {
        let path = root.join(MANIFEST);
        let content = self.filesystem.read_to_string(&path)?;
        let rewritten = manifest::rewrite_manifest(&content, version, None);
        self.filesystem.write_file(&path, &rewritten)
    }

    /// Create `dir` and any missing ancestors below the root, recording each.
    ///
    /// Existing directories are left alone but their missing children are
    /// still created.
    fn ensure_dir(&self, ledger: &mut RunLedger, dir: &Path) -> ForgeResult<()> {
        let mut missing = Vec::new();
        let mut cursor = Some(dir);
        while let Some(p) = cursor {
            if p == ledger.root || self.filesystem.exists(p) {
                break;
            }
            missing.push(p.to_path_buf());
            cursor = p.parent();
        }

        for p in missing.into_iter().rev() {
            self.filesystem.create_dir(&p)?;
            ledger.directories.push(p);
        }
        Ok(())
    }

    fn write_role(
        &self,
        structure: &ProjectStructure,
        role: FileRole,
        ledger: &mut RunLedger,
    ) -> ForgeResult<()> {
        for file in structure.files_with_role(role) {
            let path = ledger.root.join(file.path.as_path());
            if let Some(parent) = path.parent() {
                self.ensure_dir(ledger, parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
            if !file.permissions.is_default() {
                self.filesystem.set_permissions(&path, file.permissions)?;
            }
            ledger.files.push(path);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Rollback
    // -------------------------------------------------------------------------

    /// Remove what this run created: recorded directories newest first, then
    /// the module manifest and checksums. Stops at the first failure.
    fn rollback(&self, ledger: &RunLedger) -> ForgeResult<()> {
        let fs = self.filesystem.as_ref();

        for dir in ledger.directories.iter().rev() {
            if fs.exists(dir) {
                fs.remove_dir_all(dir).map_err(|e| rollback_error(dir, &e))?;
            }
        }

        for name in [manifest::MANIFEST, manifest::CHECKSUMS] {
            let path = ledger.root.join(name);
            if fs.exists(&path) {
                fs.remove_file(&path).map_err(|e| rollback_error(&path, &e))?;
            }
        }

        if ledger.created_root && fs.exists(&ledger.root) {
            fs.remove_dir_all(&ledger.root)
                .map_err(|e| rollback_error(&ledger.root, &e))?;
        }

        info!(
            directories = ledger.directories.len(),
            "Rollback successful"
        );
        Ok(())
    }
}

pub(crate) fn rollback_error(path: &Path, cause: &ForgeError) -> ForgeError {
    ApplicationError::RollbackFailed {
        path: path.to_path_buf(),
        reason: cause.to_string(),
    }
    .into()
}
