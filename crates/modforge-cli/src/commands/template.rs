//! Implementation of the `modforge template` command.

use serde::Serialize;
use tracing::{info, instrument};

use modforge_core::{
    application::TemplateSource,
    domain::{Registry, Settings},
    error::ForgeError,
};

use super::{Project, print_report, resolve_project};
use crate::{
    cli::TemplateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::{self, Choice},
};

/// Execute the `modforge template` command.
#[instrument(skip_all, fields(custom = args.custom))]
pub fn execute(args: TemplateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = super::registry();
    let project = resolve_project(&args.project, &config, &output)?;
    let source = resolve_source(&args, &registry)?;
    install(registry, &project, &source, false, &output)
}

/// Pick the template from flags, or ask when interactive.
fn resolve_source(args: &TemplateArgs, registry: &Registry) -> CliResult<TemplateSource> {
    if args.custom {
        let url = match (&args.url, &args.name) {
            (Some(url), _) | (None, Some(url)) => url.clone(),
            (None, None) if prompt::available() => {
                prompt::text("Enter the URL of your custom template repository:", None)?
            }
            (None, None) => return Err(CliError::invalid("--custom needs --url <URL>")),
        };
        return Ok(TemplateSource::Custom(url));
    }

    let name = match &args.name {
        Some(name) => name.clone(),
        None if prompt::available() => ask_template(registry)?,
        None => {
            return Err(CliError::invalid(
                "missing template name (see: modforge list templates)",
            ));
        }
    };
    Ok(TemplateSource::Registered(name))
}

pub(crate) fn ask_template(registry: &Registry) -> CliResult<String> {
    let choices: Vec<Choice> = registry
        .templates()
        .map(|t| Choice::new(t.name(), t.description()))
        .collect();
    prompt::fuzzy_select("Select a template:", &choices)
}

#[derive(Debug, Serialize)]
struct PlannedClone<'a> {
    template: &'a str,
    url: String,
    module: &'a str,
    go_version: &'a str,
    path: &'a std::path::Path,
}

/// Clone `source` into the project directory and give it the project's identity.
pub(crate) fn install(
    registry: Registry,
    project: &Project,
    source: &TemplateSource,
    dry_run: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let settings = Settings::builder()
        .module(project.module.as_str())
        .go_version(project.go_version.as_str())
        .path(project.path.clone())
        .build(&registry)
        .map_err(ForgeError::from)?;

    if dry_run {
        let template = source.resolve(&registry)?;
        let plan = PlannedClone {
            template: template.name(),
            url: template.clone_url(),
            module: settings.module(),
            go_version: settings.go_version(),
            path: settings.path(),
        };
        if output.is_json() {
            return output.json(&plan);
        }
        output.info(&format!(
            "Dry run: would clone {} into {} as {} (go {})",
            plan.url,
            plan.path.display(),
            plan.module,
            plan.go_version
        ))?;
        return Ok(());
    }

    output.header(&format!("Installing template as {}...", settings.module()))?;
    info!(path = %settings.path().display(), "Template install started");

    let report = super::installer(registry, output).install(&settings, source)?;
    print_report(output, settings.module(), settings.path(), &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProjectArgs;

    fn args(name: Option<&str>, custom: bool, url: Option<&str>) -> TemplateArgs {
        TemplateArgs {
            name: name.map(str::to_string),
            custom,
            url: url.map(str::to_string),
            project: ProjectArgs::default(),
        }
    }

    #[test]
    fn registered_name_from_positional() {
        let registry = super::super::registry();
        let source = resolve_source(
            &args(Some("github.com/bxcodec/go-clean-arch"), false, None),
            &registry,
        )
        .unwrap();
        assert_eq!(
            source,
            TemplateSource::Registered("github.com/bxcodec/go-clean-arch".into())
        );
    }

    #[test]
    fn custom_url_from_flag() {
        let registry = super::super::registry();
        let source = resolve_source(
            &args(None, true, Some("https://github.com/acme/go-template.git")),
            &registry,
        )
        .unwrap();
        assert_eq!(
            source,
            TemplateSource::Custom("https://github.com/acme/go-template.git".into())
        );
    }

    #[test]
    fn custom_accepts_positional_url() {
        let registry = super::super::registry();
        let source =
            resolve_source(&args(Some("https://x.io/a/b"), true, None), &registry).unwrap();
        assert!(matches!(source, TemplateSource::Custom(_)));
    }
}
