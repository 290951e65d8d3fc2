//! The `Settings` record and its validating builder.
//!
//! `Settings` is the validated description of one generation run. It is only
//! produced by [`SettingsBuilder::build`], which checks every name against a
//! [`Registry`]; once a `Settings` exists it is read-only.
//!
//! # Domain purity
//!
//! The target-directory emptiness check needs the filesystem and is performed
//! by the generator through its port, before any mutation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{entities::registry::Registry, error::DomainError};

/// Logger used when none is requested.
pub const DEFAULT_LOGGER: &str = "zap";

// ── Record ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    path: PathBuf,
    module: String,
    go_version: String,
    logger: String,
    adapters: BTreeSet<String>,
    services: BTreeMap<String, String>,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// Target directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Go module import path, e.g. `github.com/acme/billing`.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Go toolchain version written to `go.mod`, without the `go` prefix.
    pub fn go_version(&self) -> &str {
        &self.go_version
    }

    pub fn logger(&self) -> &str {
        &self.logger
    }

    /// Enabled adapter keys, sorted.
    pub fn adapters(&self) -> &BTreeSet<String> {
        &self.adapters
    }

    /// Enabled services, service key to flavor key, sorted by service.
    pub fn services(&self) -> &BTreeMap<String, String> {
        &self.services
    }

    pub fn is_adapter_enabled(&self, name: &str) -> bool {
        self.adapters.contains(&name.to_ascii_lowercase())
    }

    pub fn flavor_of(&self, service: &str) -> Option<&str> {
        self.services
            .get(&service.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// True when at least one adapter or service is enabled.
    pub fn has_modules(&self) -> bool {
        !self.adapters.is_empty() || !self.services.is_empty()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (go {})", self.module, self.go_version)?;
        if !self.adapters.is_empty() {
            let names: Vec<_> = self.adapters.iter().map(String::as_str).collect();
            write!(f, " adapters=[{}]", names.join(","))?;
        }
        if !self.services.is_empty() {
            let names: Vec<_> = self
                .services
                .iter()
                .map(|(s, fl)| format!("{s}={fl}"))
                .collect();
            write!(f, " services=[{}]", names.join(","))?;
        }
        Ok(())
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Collects raw user input. Nothing is checked until [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    path: Option<PathBuf>,
    module: String,
    go_version: String,
    logger: Option<String>,
    adapters: Vec<String>,
    services: Vec<(String, Option<String>)>,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn go_version(mut self, version: impl Into<String>) -> Self {
        self.go_version = version.into();
        self
    }

    pub fn logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    pub fn adapter(mut self, name: impl Into<String>) -> Self {
        self.adapters.push(name.into());
        self
    }

    pub fn adapters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adapters.extend(names.into_iter().map(Into::into));
        self
    }

    /// Enable a service. `None` picks the service's default flavor.
    pub fn service(mut self, name: impl Into<String>, flavor: Option<String>) -> Self {
        self.services.push((name.into(), flavor));
        self
    }

    /// Validate against `registry` and produce the immutable record.
    ///
    /// Names are matched case-insensitively and stored in their canonical
    /// (registry) spelling.
    pub fn build(self, registry: &Registry) -> Result<Settings, DomainError> {
        let module = self.module.trim().to_string();
        if module.is_empty() {
            return Err(DomainError::EmptyModule);
        }

        let go_version = normalize_go_version(&self.go_version);
        if go_version.is_empty() {
            return Err(DomainError::EmptyGoVersion);
        }

        let logger_name = self.logger.as_deref().unwrap_or(DEFAULT_LOGGER);
        let logger = registry
            .logger(logger_name)
            .ok_or_else(|| DomainError::UnknownLogger {
                name: logger_name.to_string(),
            })?
            .name
            .to_string();

        let mut adapters = BTreeSet::new();
        for raw in &self.adapters {
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            let descriptor = registry
                .adapter(name)
                .ok_or_else(|| DomainError::UnknownAdapter {
                    name: name.to_string(),
                })?;
            adapters.insert(descriptor.name.to_string());
        }

        let mut services = BTreeMap::new();
        for (raw, flavor) in &self.services {
            let name = raw.trim();
            let descriptor = registry
                .service(name)
                .ok_or_else(|| DomainError::UnknownService {
                    name: name.to_string(),
                })?;

            let chosen = match flavor.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
                Some(flavor) => descriptor.flavor(flavor).ok_or_else(|| {
                    DomainError::UnknownFlavor {
                        service: descriptor.name.to_string(),
                        flavor: flavor.to_string(),
                    }
                })?,
                None => descriptor
                    .default_flavor()
                    .ok_or_else(|| DomainError::UnknownFlavor {
                        service: descriptor.name.to_string(),
                        flavor: String::new(),
                    })?,
            };
            services.insert(descriptor.name.to_string(), chosen.name.to_string());
        }

        Ok(Settings {
            path: self.path.unwrap_or_else(|| PathBuf::from(".")),
            module,
            go_version,
            logger,
            adapters,
            services,
        })
    }
}

/// `" go1.22.1\n"` → `"1.22.1"`.
pub fn normalize_go_version(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("go")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
