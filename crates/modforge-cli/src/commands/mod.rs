//! Command handlers.
//!
//! Each handler translates parsed arguments into core calls and renders the
//! result. Wiring of the production adapters lives here so every command
//! builds the generator the same way.

pub mod completions;
pub mod config;
pub mod generate;
pub mod list;
pub mod template;
pub mod version;
pub mod wizard;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use modforge_adapters::{GitCloner, GoRenderer, LocalFilesystem, ProcessRunner, builtin};
use modforge_core::{
    application::{GenerationReport, Generator, TemplateInstaller, toolchain},
    domain::{GenerationStage, Registry},
};

use crate::{
    cli::ProjectArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

/// Used when neither a flag, the config, nor the local toolchain names a version.
pub const FALLBACK_GO_VERSION: &str = "1.21";

// ── wiring ────────────────────────────────────────────────────────────────────

pub(crate) fn registry() -> Registry {
    builtin::registry()
}

pub(crate) fn generator(registry: Registry, output: &OutputManager) -> Generator {
    Generator::new(
        registry,
        Box::new(LocalFilesystem::new()),
        Box::new(ProcessRunner::new()),
        Box::new(GoRenderer::new()),
    )
    .with_progress(Box::new(output.progress()))
}

pub(crate) fn installer(registry: Registry, output: &OutputManager) -> TemplateInstaller {
    TemplateInstaller::new(
        registry,
        Box::new(LocalFilesystem::new()),
        Box::new(GitCloner::new()),
    )
    .with_progress(Box::new(output.progress()))
}

// ── project identity ──────────────────────────────────────────────────────────

/// Module, path and Go version after flags, config, prompts and detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Project {
    pub module: String,
    pub path: PathBuf,
    pub go_version: String,
}

/// Fill in whatever the flags leave open.
///
/// Module: flag, then `defaults.module`, then a prompt. Path: flag, then
/// `defaults.path`, then the current directory. Go version: flag, then
/// `defaults.go_version`, then `go env GOVERSION`, then
/// [`FALLBACK_GO_VERSION`].
pub(crate) fn resolve_project(
    args: &ProjectArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<Project> {
    let module = match args.module.clone().or_else(|| config.defaults.module.clone()) {
        Some(module) => module,
        None if prompt::available() => {
            prompt::text("What is your desired module name?", Some(prompt::DEFAULT_MODULE))?
        }
        None => return Err(CliError::invalid("missing --module")),
    };

    let path = args
        .path
        .clone()
        .or_else(|| config.defaults.path.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let go_version = match args
        .go_version
        .clone()
        .or_else(|| config.defaults.go_version.clone())
    {
        Some(version) => version,
        None => local_go_version(output),
    };

    Ok(Project {
        module,
        path,
        go_version,
    })
}

/// Version of the installed toolchain, or [`FALLBACK_GO_VERSION`] with a warning.
pub(crate) fn local_go_version(output: &OutputManager) -> String {
    match toolchain::detect_go_version(&ProcessRunner::new(), Path::new(".")) {
        Ok(version) => {
            debug!(%version, "Detected local Go version");
            version
        }
        Err(e) => {
            warn!(error = %e, "Could not detect the local Go version");
            let _ = output.warning(&format!(
                "Could not detect the local Go version, using {FALLBACK_GO_VERSION}"
            ));
            FALLBACK_GO_VERSION.to_string()
        }
    }
}

// ── reporting ─────────────────────────────────────────────────────────────────

/// JSON shape of a finished run.
#[derive(Debug, Serialize)]
struct ReportView<'a> {
    module: &'a str,
    path: &'a Path,
    stage: GenerationStage,
    directories: &'a [PathBuf],
    files: &'a [PathBuf],
}

/// Print the outcome of a successful run plus next steps.
pub(crate) fn print_report(
    output: &OutputManager,
    module: &str,
    path: &Path,
    report: &GenerationReport,
) -> CliResult<()> {
    if output.is_json() {
        return output.json(&ReportView {
            module,
            path,
            stage: report.stage,
            directories: &report.directories,
            files: &report.files,
        });
    }

    output.success(&format!("Module '{module}' ready at {}", path.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", path.display()))?;
    output.print("  go run ./cmd/app")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn flags_win_over_config() {
        let mut config = AppConfig::default();
        config.defaults.module = Some("example.com/from-config".into());
        config.defaults.path = Some(PathBuf::from("/srv/config"));
        config.defaults.go_version = Some("1.20".into());

        let args = ProjectArgs {
            module: Some("example.com/flag".into()),
            path: None,
            go_version: Some("1.22".into()),
        };
        let project = resolve_project(&args, &config, &quiet_output()).unwrap();
        assert_eq!(project.module, "example.com/flag");
        assert_eq!(project.path, PathBuf::from("/srv/config"));
        assert_eq!(project.go_version, "1.22");
    }

    #[test]
    fn config_fills_missing_flags() {
        let mut config = AppConfig::default();
        config.defaults.module = Some("example.com/from-config".into());
        config.defaults.go_version = Some("1.20".into());

        let project =
            resolve_project(&ProjectArgs::default(), &config, &quiet_output()).unwrap();
        assert_eq!(project.module, "example.com/from-config");
        assert_eq!(project.path, PathBuf::from("."));
        assert_eq!(project.go_version, "1.20");
    }
}
