//! Implementation of the `modforge generate` command.
//!
//! Responsibility: translate CLI arguments into `Settings`, call the core
//! generator, and display results. No generation logic lives here.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use modforge_core::{
    application::TemplateSource,
    domain::{DirectoryPlan, Registry, Settings},
    error::ForgeError,
};

use super::{Project, print_report, resolve_project};
use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `modforge generate` command.
///
/// With `--template` the run switches to template mode; with `--dry-run`
/// nothing is written.
#[instrument(skip_all, fields(module = ?args.project.module, dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = super::registry();
    let project = resolve_project(&args.project, &config, &output)?;

    if let Some(name) = args.template.clone() {
        let source = TemplateSource::Registered(name);
        return super::template::install(registry, &project, &source, args.dry_run, &output);
    }

    let settings = build_settings(&args, &config, &project, &registry)?;
    debug!(%settings, "Settings resolved");

    if args.dry_run {
        return dry_run(registry, &settings, &output);
    }

    output.header(&format!("Generating {}...", settings.module()))?;
    info!(path = %settings.path().display(), "Generation started");

    let report = super::generator(registry, &output).generate(&settings)?;
    print_report(&output, settings.module(), settings.path(), &report)
}

/// Validate every name against the registry.
fn build_settings(
    args: &GenerateArgs,
    config: &AppConfig,
    project: &Project,
    registry: &Registry,
) -> CliResult<Settings> {
    let mut builder = Settings::builder()
        .module(project.module.as_str())
        .go_version(project.go_version.as_str())
        .path(project.path.clone())
        .logger(args.logger.as_deref().unwrap_or(&config.defaults.logger))
        .adapters(args.adapters.iter().map(String::as_str));

    for service in &args.services {
        builder = builder.service(service.name.as_str(), service.flavor.clone());
    }

    Ok(builder.build(registry).map_err(ForgeError::from)?)
}

// ── dry run ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PlannedFile {
    path: PathBuf,
    bytes: usize,
}

#[derive(Debug, Serialize)]
struct DryRunView<'a> {
    module: &'a str,
    go_version: &'a str,
    path: &'a std::path::Path,
    directories: Vec<PathBuf>,
    files: Vec<PlannedFile>,
}

/// Render every file in memory and list what would be created.
fn dry_run(registry: Registry, settings: &Settings, output: &OutputManager) -> CliResult<()> {
    let modules = registry.enabled(settings).map_err(ForgeError::from)?;
    let directories = DirectoryPlan::for_modules(&modules).paths();
    let structure = super::generator(registry, output).render(settings)?;

    let files: Vec<PlannedFile> = structure
        .files()
        .map(|f| PlannedFile {
            path: f.path.as_path().to_path_buf(),
            bytes: f.size(),
        })
        .collect();

    if output.is_json() {
        return output.json(&DryRunView {
            module: settings.module(),
            go_version: settings.go_version(),
            path: settings.path(),
            directories,
            files,
        });
    }

    output.info(&format!(
        "Dry run: would generate {} (go {}) in {}",
        settings.module(),
        settings.go_version(),
        settings.path().display()
    ))?;
    output.print("  go.mod")?;
    for dir in &directories {
        output.print(&format!("  {}/", dir.display()))?;
    }
    for file in &files {
        output.print(&format!("  {} ({} bytes)", file.path.display(), file.bytes))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ProjectArgs, ServiceSpec};

    fn args(adapters: &[&str], services: &[&str]) -> GenerateArgs {
        GenerateArgs {
            project: ProjectArgs::default(),
            adapters: adapters.iter().map(|s| s.to_string()).collect(),
            services: services.iter().map(|s| s.parse().unwrap()).collect(),
            logger: None,
            template: None,
            dry_run: false,
        }
    }

    fn project() -> Project {
        Project {
            module: "example.com/foo".into(),
            path: PathBuf::from("/tmp/foo"),
            go_version: "go1.22".into(),
        }
    }

    #[test]
    fn settings_from_flags() {
        let registry = super::super::registry();
        let settings = build_settings(
            &args(&["Redis", "mariadb"], &["rest=gin"]),
            &AppConfig::default(),
            &project(),
            &registry,
        )
        .unwrap();

        assert_eq!(settings.go_version(), "1.22");
        assert_eq!(settings.logger(), "zap");
        assert!(settings.is_adapter_enabled("redis"));
        assert!(settings.is_adapter_enabled("mariadb"));
        assert_eq!(settings.flavor_of("rest"), Some("gin"));
    }

    #[test]
    fn unknown_adapter_is_a_core_validation_error() {
        let registry = super::super::registry();
        let err = build_settings(
            &args(&["postgresql"], &[]),
            &AppConfig::default(),
            &project(),
            &registry,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(matches!(
            err,
            crate::error::CliError::Core(ForgeError::Domain(_))
        ));
    }

    #[test]
    fn service_without_flavor_uses_default() {
        let registry = super::super::registry();
        let mut generate = args(&[], &[]);
        generate.services = vec![ServiceSpec {
            name: "gql".into(),
            flavor: None,
        }];
        let settings =
            build_settings(&generate, &AppConfig::default(), &project(), &registry).unwrap();
        assert_eq!(settings.flavor_of("gql"), Some("gqlgen"));
    }
}
