//! Module descriptors: the pluggable building blocks of a generated project.
//!
//! A descriptor is one tagged record with a shared capability set (config
//! fragments, init/shutdown fragments, a standalone service file) and optional
//! extensions expressed as absent fields (select branch, flavor table). The
//! generator treats every enabled descriptor the same way; only services carry
//! flavors, and for those the chosen flavor supplies the fragments.
//!
//! Fragment text is opaque Go source. It may contain `{{MODULE}}`, which is
//! substituted with the settings' module path at render time.

use std::fmt;

// ── Kind ──────────────────────────────────────────────────────────────────────

/// Which table of the registry a descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DescriptorKind {
    Adapter,
    Logger,
    Service,
}

impl DescriptorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adapter => "adapter",
            Self::Logger => "logger",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Config fragments ──────────────────────────────────────────────────────────

/// A scalar in a YAML config block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValue {
    Str(&'static str),
    Int(i64),
}

/// One top-level YAML map contributed by a descriptor, e.g. `redis: {host, port}`.
///
/// Entries keep their declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigBlock {
    pub key: &'static str,
    pub entries: &'static [(&'static str, ConfigValue)],
}

impl ConfigBlock {
    pub const fn new(key: &'static str, entries: &'static [(&'static str, ConfigValue)]) -> Self {
        Self { key, entries }
    }

    pub fn get(&self, name: &str) -> Option<ConfigValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }
}

/// The standalone implementation file a descriptor ships in `pkg/<package>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceFile {
    pub file_name: &'static str,
    /// Complete Go source, `{{MODULE}}` placeholders allowed.
    pub template: &'static str,
}

// ── Fragments ─────────────────────────────────────────────────────────────────

/// Everything a descriptor contributes to the generated project.
///
/// Every field is optional; a descriptor that has nothing to say about a
/// section leaves it empty and the renderer skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fragments {
    /// YAML document merged into `config/config.yaml` and `config/config.dev.yaml`.
    pub config_yaml: Option<ConfigBlock>,
    /// Field group added to the `Config` struct in `config/config.go`.
    pub config_go: Option<&'static str>,
    /// Statements run at startup (inside `app.Run`, or `main` for loggers).
    pub init: Option<&'static str>,
    /// A `case` branch of the run loop's `select`.
    pub select: Option<&'static str>,
    /// Statements run after `cancel()` on shutdown.
    pub shutdown: Option<&'static str>,
    /// Imports the init/select/shutdown fragments need. `"alias path"` form allowed.
    pub imports: &'static [&'static str],
    pub service: Option<ServiceFile>,
}

impl Fragments {
    pub const fn empty() -> Self {
        Self {
            config_yaml: None,
            config_go: None,
            init: None,
            select: None,
            shutdown: None,
            imports: &[],
            service: None,
        }
    }
}

// ── Flavor ────────────────────────────────────────────────────────────────────

/// One concrete implementation of a service, e.g. `gin` for `rest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flavor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub fragments: Fragments,
}

// ── Descriptor ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Registry key, lowercase.
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: DescriptorKind,
    /// Directory under `pkg/` holding the service file.
    pub package: &'static str,
    pub description: &'static str,
    pub fragments: Fragments,
    /// Non-empty only for services. Sorted by name.
    pub flavors: &'static [Flavor],
}

impl Descriptor {
    pub const fn adapter(
        name: &'static str,
        display_name: &'static str,
        description: &'static str,
        fragments: Fragments,
    ) -> Self {
        Self {
            name,
            display_name,
            kind: DescriptorKind::Adapter,
            package: name,
            description,
            fragments,
            flavors: &[],
        }
    }

    pub const fn logger(
        name: &'static str,
        display_name: &'static str,
        description: &'static str,
        fragments: Fragments,
    ) -> Self {
        Self {
            name,
            display_name,
            kind: DescriptorKind::Logger,
            package: "logger",
            description,
            fragments,
            flavors: &[],
        }
    }

    pub const fn service(
        name: &'static str,
        display_name: &'static str,
        description: &'static str,
        flavors: &'static [Flavor],
    ) -> Self {
        Self {
            name,
            display_name,
            kind: DescriptorKind::Service,
            package: name,
            description,
            fragments: Fragments::empty(),
            flavors,
        }
    }

    /// Case-insensitive flavor lookup.
    pub fn flavor(&self, name: &str) -> Option<&Flavor> {
        self.flavors
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Flavor used when the caller picks none: the first by name.
    pub fn default_flavor(&self) -> Option<&Flavor> {
        self.flavors.iter().min_by_key(|f| f.name)
    }
}

/// A descriptor resolved against a concrete `Settings`.
#[derive(Debug, Clone, Copy)]
pub struct EnabledModule<'r> {
    pub descriptor: &'r Descriptor,
    pub flavor: Option<&'r Flavor>,
}

impl<'r> EnabledModule<'r> {
    pub fn name(&self) -> &'r str {
        self.descriptor.name
    }

    pub fn kind(&self) -> DescriptorKind {
        self.descriptor.kind
    }

    /// The fragments that apply: the flavor's for services, the descriptor's otherwise.
    pub fn fragments(&self) -> &'r Fragments {
        match self.flavor {
            Some(flavor) => &flavor.fragments,
            None => &self.descriptor.fragments,
        }
    }
}
