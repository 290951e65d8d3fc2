//! `modforge config`: read and write configuration values.

use std::path::Path;

use tracing::info;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `explicit` is the `--config` path; reads show the effective merged
/// configuration, writes only touch that one file.
pub fn execute(
    cmd: ConfigCommands,
    explicit: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            if output.is_json() {
                return output.json(&serde_json::json!({ "key": key, "value": value }));
            }
            println!("{value}");
        }

        ConfigCommands::Set { key, value } => {
            let path = AppConfig::config_path(explicit);
            set_in_file(&path, &key, &value)?;
            info!(%key, path = %path.display(), "Config value saved");
            output.success(&format!("{key} = {value:?} saved to {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                return output.json(&config);
            }
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.header("Current Configuration:")?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path(explicit).display());
        }
    }

    Ok(())
}

/// Read `path`, change one key, write it back.
fn set_in_file(path: &Path, key: &str, value: &str) -> CliResult<()> {
    let mut stored = AppConfig::read_file(path)?;
    stored.set(key, value)?;
    stored.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_creates_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        set_in_file(&path, "defaults.module", "github.com/acme/svc").unwrap();
        set_in_file(&path, "defaults.logger", "zap").unwrap();

        let stored = AppConfig::read_file(&path).unwrap();
        assert_eq!(stored.defaults.module.as_deref(), Some("github.com/acme/svc"));
        assert_eq!(stored.defaults.logger, "zap");
    }

    #[test]
    fn unknown_key_leaves_file_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let err = set_in_file(&path, "defaults.lang", "rust").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert!(!path.exists());
    }
}
