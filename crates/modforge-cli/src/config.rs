//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `MODFORGE_*` environment variables, `__` between sections
//!    (`MODFORGE_DEFAULTS__MODULE=github.com/acme/svc`)
//! 3. The file given with `--config` / `MODFORGE_CONFIG`
//! 4. `config.toml` in the platform config directory
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult, IntoCli};

/// Prefix of environment overrides.
const ENV_PREFIX: &str = "MODFORGE";

/// Every key `config get` / `config set` understands.
pub const KEYS: [&str; 6] = [
    "defaults.module",
    "defaults.go_version",
    "defaults.logger",
    "defaults.path",
    "output.color",
    "output.format",
];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Module offered by the wizard and used when `--module` is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Go version used when `--go-version` is omitted; detected when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_version: Option<String>,
    pub logger: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            module: None,
            go_version: None,
            logger: modforge_core::domain::DEFAULT_LOGGER.into(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from every source in priority order.
    ///
    /// `explicit` is the path passed via `--config`. A missing file reads as
    /// empty so `config set` can create it.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            File::from(Self::config_path(None))
                .format(FileFormat::Toml)
                .required(false),
        );

        if let Some(path) = explicit {
            builder =
                builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Path of the file `config set` writes to.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.modforge.toml` in the current directory.
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        directories::ProjectDirs::from("com", "modforge", "modforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".modforge.toml"))
    }

    /// Read only the given file, without defaults from other sources.
    ///
    /// A missing file yields the built-in defaults.
    pub fn read_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
        toml::from_str(&text).map_err(|e| CliError::ConfigError {
            message: format!("Failed to parse '{}'", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_cli_context(|| {
                format!("Failed to create config directory '{}'", parent.display())
            })?;
        }
        std::fs::write(path, text)
            .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
    }

    /// Value of a dotted key; unset optional values print as an empty string.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let value = match key {
            "defaults.module" => self.defaults.module.clone().unwrap_or_default(),
            "defaults.go_version" => self.defaults.go_version.clone().unwrap_or_default(),
            "defaults.logger" => self.defaults.logger.clone(),
            "defaults.path" => self
                .defaults
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "output.color" => self.output.color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a dotted key. An empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> CliResult<()> {
        let value = value.trim();
        let optional = || (!value.is_empty()).then(|| value.to_string());
        match key {
            "defaults.module" => self.defaults.module = optional(),
            "defaults.go_version" => self.defaults.go_version = optional(),
            "defaults.logger" => self.defaults.logger = value.to_ascii_lowercase(),
            "defaults.path" => self.defaults.path = optional().map(PathBuf::from),
            "output.color" => {
                self.output.color = value.parse().map_err(|_| CliError::ConfigError {
                    message: format!("'{key}' expects true or false, got '{value}'"),
                    source: None,
                })?;
            }
            "output.format" => match value.to_ascii_lowercase().as_str() {
                format @ ("auto" | "human" | "plain" | "json") => {
                    self.output.format = format.to_string();
                }
                _ => {
                    return Err(CliError::ConfigError {
                        message: format!(
                            "'{key}' expects one of auto, human, plain, json; got '{value}'"
                        ),
                        source: None,
                    });
                }
            },
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}' (known: {})", KEYS.join(", ")),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.logger, "zap");
        assert!(cfg.defaults.module.is_none());
        assert!(cfg.output.color);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn every_key_is_readable() {
        let cfg = AppConfig::default();
        for key in KEYS {
            assert!(cfg.get(key).is_ok(), "{key}");
        }
        assert!(matches!(
            cfg.get("does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = AppConfig::default();
        cfg.set("defaults.module", "github.com/acme/svc").unwrap();
        cfg.set("output.format", "JSON").unwrap();
        assert_eq!(cfg.get("defaults.module").unwrap(), "github.com/acme/svc");
        assert_eq!(cfg.output.format, "json");

        assert!(cfg.set("output.color", "maybe").is_err());
        assert!(cfg.set("output.format", "yaml").is_err());

        cfg.set("defaults.module", "").unwrap();
        assert!(cfg.defaults.module.is_none());
    }

    #[test]
    fn save_then_read_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        let mut cfg = AppConfig::default();
        cfg.set("defaults.go_version", "1.22").unwrap();
        cfg.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("go_version = \"1.22\""));
        assert!(!text.contains("module"));
        assert_eq!(AppConfig::read_file(&path).unwrap(), cfg);
    }

    #[test]
    fn load_merges_explicit_file_over_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("modforge.toml");
        std::fs::write(&path, "[defaults]\nmodule = \"example.com/foo\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.module.as_deref(), Some("example.com/foo"));
        assert_eq!(cfg.defaults.logger, "zap");
    }

    #[test]
    fn load_tolerates_missing_explicit_file() {
        let tmp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&tmp.path().join("missing.toml"))).is_ok());
    }

    #[test]
    fn load_rejects_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        std::fs::write(&path, "[defaults\nmodule = ").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn missing_file_reads_as_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = AppConfig::read_file(&tmp.path().join("none.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
