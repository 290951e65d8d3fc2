//! The descriptor registry.
//!
//! An explicit value handed to the generator at construction. There is no
//! global table: tests build small registries of their own, the CLI uses the
//! built-in one from `modforge_adapters::builtin`.
//!
//! All tables are `BTreeMap`s so iteration is always sorted by key and the
//! generated sources never depend on insertion order.

use std::collections::BTreeMap;

use crate::domain::{
    entities::{
        descriptor::{Descriptor, DescriptorKind, EnabledModule},
        repo_template::RepoTemplate,
        settings::Settings,
    },
    error::DomainError,
};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    adapters: BTreeMap<&'static str, Descriptor>,
    loggers: BTreeMap<&'static str, Descriptor>,
    services: BTreeMap<&'static str, Descriptor>,
    templates: BTreeMap<String, RepoTemplate>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor in the table matching its kind.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, descriptor: Descriptor) -> &mut Self {
        let table = match descriptor.kind {
            DescriptorKind::Adapter => &mut self.adapters,
            DescriptorKind::Logger => &mut self.loggers,
            DescriptorKind::Service => &mut self.services,
        };
        table.insert(descriptor.name, descriptor);
        self
    }

    pub fn register_template(&mut self, template: RepoTemplate) -> &mut Self {
        self.templates.insert(template.name().to_string(), template);
        self
    }

    /// Consuming variant of [`Registry::register`].
    pub fn with(mut self, descriptor: Descriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Consuming variant of [`Registry::register_template`].
    pub fn with_template(mut self, template: RepoTemplate) -> Self {
        self.register_template(template);
        self
    }

    // ── Lookups (case-insensitive) ───────────────────────────────────────────

    pub fn adapter(&self, name: &str) -> Option<&Descriptor> {
        lookup(&self.adapters, name)
    }

    pub fn logger(&self, name: &str) -> Option<&Descriptor> {
        lookup(&self.loggers, name)
    }

    pub fn service(&self, name: &str) -> Option<&Descriptor> {
        lookup(&self.services, name)
    }

    pub fn template(&self, name: &str) -> Result<&RepoTemplate, DomainError> {
        let wanted = name.trim().trim_end_matches('/');
        self.templates
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(wanted))
            .map(|(_, t)| t)
            .ok_or_else(|| DomainError::UnknownTemplate {
                name: name.to_string(),
            })
    }

    // ── Listings (sorted) ────────────────────────────────────────────────────

    pub fn adapters(&self) -> impl Iterator<Item = &Descriptor> {
        self.adapters.values()
    }

    pub fn loggers(&self) -> impl Iterator<Item = &Descriptor> {
        self.loggers.values()
    }

    pub fn services(&self) -> impl Iterator<Item = &Descriptor> {
        self.services.values()
    }

    pub fn templates(&self) -> impl Iterator<Item = &RepoTemplate> {
        self.templates.values()
    }

    /// Resolve the descriptors a `Settings` enables.
    ///
    /// Order: the logger, then adapters by key, then services by key. Fails if
    /// the settings were validated against a different registry.
    pub fn enabled(&self, settings: &Settings) -> Result<Vec<EnabledModule<'_>>, DomainError> {
        let mut modules = Vec::with_capacity(1 + settings.adapters().len() + settings.services().len());

        let logger = self
            .logger(settings.logger())
            .ok_or_else(|| DomainError::UnknownLogger {
                name: settings.logger().to_string(),
            })?;
        modules.push(EnabledModule {
            descriptor: logger,
            flavor: None,
        });

        for name in settings.adapters() {
            let descriptor = self
                .adapter(name)
                .ok_or_else(|| DomainError::UnknownAdapter { name: name.clone() })?;
            modules.push(EnabledModule {
                descriptor,
                flavor: None,
            });
        }

        for (name, flavor) in settings.services() {
            let descriptor = self
                .service(name)
                .ok_or_else(|| DomainError::UnknownService { name: name.clone() })?;
            let flavor = descriptor
                .flavor(flavor)
                .ok_or_else(|| DomainError::UnknownFlavor {
                    service: name.clone(),
                    flavor: flavor.clone(),
                })?;
            modules.push(EnabledModule {
                descriptor,
                flavor: Some(flavor),
            });
        }

        Ok(modules)
    }
}

fn lookup<'a>(table: &'a BTreeMap<&'static str, Descriptor>, name: &str) -> Option<&'a Descriptor> {
    let wanted = name.trim();
    table
        .get(wanted)
        .or_else(|| table.values().find(|d| d.name.eq_ignore_ascii_case(wanted)))
}
