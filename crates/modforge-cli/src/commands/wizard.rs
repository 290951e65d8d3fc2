//! The interactive wizard run when `modforge` gets no subcommand.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use modforge_core::{
    domain::{Descriptor, Registry, Settings},
    error::ForgeError,
};

use super::{local_go_version, print_report};
use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::{self, Choice},
};

/// Ask for every setting, confirm, then generate.
#[instrument(skip_all)]
pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    if !cfg!(feature = "interactive") {
        return Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        });
    }
    if !prompt::available() {
        return Err(CliError::invalid(
            "the wizard needs an interactive terminal; use `modforge generate` instead",
        ));
    }

    let registry = super::registry();
    let settings = ask(&registry, &config, &output)?;
    debug!(%settings, "Wizard answers collected");

    summarize(&settings, &output)?;
    if !prompt::confirm("Generate this project?", true)? {
        return Err(CliError::Cancelled);
    }

    info!(path = %settings.path().display(), "Generation started");
    let report = super::generator(registry, &output).generate(&settings)?;
    print_report(&output, settings.module(), settings.path(), &report)
}

fn ask(registry: &Registry, config: &AppConfig, output: &OutputManager) -> CliResult<Settings> {
    let module = prompt::text(
        "What is your desired module name?",
        Some(
            config
                .defaults
                .module
                .as_deref()
                .unwrap_or(prompt::DEFAULT_MODULE),
        ),
    )?;

    let detected = match &config.defaults.go_version {
        Some(version) => version.clone(),
        None => local_go_version(output),
    };
    let go_version = prompt::text("Which Go version should go.mod declare?", Some(&detected))?;

    let default_path = config
        .defaults
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "./".to_string());
    let path = prompt::text("Where should the module be created?", Some(&default_path))?;

    let adapters = prompt::multi_select(
        "Select adapters (space to toggle, enter to accept):",
        &choices(registry.adapters()),
    )?;

    let services = prompt::multi_select(
        "Select services (space to toggle, enter to accept):",
        &choices(registry.services()),
    )?;

    let mut builder = Settings::builder()
        .module(module)
        .go_version(go_version)
        .path(PathBuf::from(path))
        .adapters(adapters);

    for name in services {
        let flavor = match registry.service(&name) {
            Some(descriptor) if descriptor.flavors.len() > 1 => {
                let flavors: Vec<Choice> = descriptor
                    .flavors
                    .iter()
                    .map(|f| Choice::new(f.name, f.description))
                    .collect();
                Some(prompt::select(
                    &format!("Which {} flavor?", descriptor.display_name),
                    &flavors,
                )?)
            }
            _ => None,
        };
        builder = builder.service(name, flavor);
    }

    let loggers = choices(registry.loggers());
    let logger = match loggers.as_slice() {
        [] => config.defaults.logger.clone(),
        [only] => only.value.clone(),
        _ => prompt::select("Select a logger:", &loggers)?,
    };

    Ok(builder.logger(logger).build(registry).map_err(ForgeError::from)?)
}

fn choices<'r>(descriptors: impl Iterator<Item = &'r Descriptor>) -> Vec<Choice> {
    descriptors
        .map(|d| Choice::new(d.name, d.display_name))
        .collect()
}

fn summarize(settings: &Settings, output: &OutputManager) -> CliResult<()> {
    let list = |names: Vec<String>| {
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    };

    output.header("Project summary:")?;
    output.row("Module", 10, settings.module())?;
    output.row("Go", 10, settings.go_version())?;
    output.row("Path", 10, &settings.path().display().to_string())?;
    output.row("Logger", 10, settings.logger())?;
    output.row(
        "Adapters",
        10,
        &list(settings.adapters().iter().cloned().collect()),
    )?;
    output.row(
        "Services",
        10,
        &list(
            settings
                .services()
                .iter()
                .map(|(name, flavor)| format!("{name} ({flavor})"))
                .collect(),
        ),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_choices_are_sorted() {
        let registry = super::super::registry();
        let values: Vec<String> = choices(registry.adapters())
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(values, vec!["mariadb", "mongodb", "postgres", "redis"]);
    }

    #[test]
    fn choice_labels_show_display_names() {
        let registry = super::super::registry();
        let services = choices(registry.services());
        assert!(services.iter().any(|c| c.value == "rest" && c.label.starts_with("rest  (")));
    }
}
