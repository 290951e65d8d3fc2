//! The built-in descriptor set.
//!
//! Descriptors are `const` tables; the registry is assembled on demand so
//! callers own it and tests can extend it freely.

pub mod adapters;
pub mod loggers;
pub mod services;
pub mod templates;

use modforge_core::domain::Registry;

/// Every built-in adapter, logger, service and template.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    for descriptor in adapters::ALL
        .into_iter()
        .chain(loggers::ALL)
        .chain(services::ALL)
    {
        registry.register(descriptor);
    }
    for template in templates::all() {
        registry.register_template(template);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use modforge_core::domain::{ConfigValue, DescriptorKind, SetupAction};

    #[test]
    fn registry_lists_sorted_keys() {
        let registry = registry();
        let adapters: Vec<_> = registry.adapters().map(|d| d.name).collect();
        assert_eq!(adapters, ["mariadb", "mongodb", "postgres", "redis"]);
        let services: Vec<_> = registry.services().map(|d| d.name).collect();
        assert_eq!(services, ["gql", "rest"]);
        assert!(registry.logger("ZAP").is_some());
        assert_eq!(registry.templates().count(), 4);
    }

    #[test]
    fn rest_flavors_default_to_first_key() {
        let registry = registry();
        let rest = registry.service("rest").unwrap();
        let flavors: Vec<_> = rest.flavors.iter().map(|f| f.name).collect();
        assert_eq!(flavors, ["beego", "fasthttp", "fiber", "gin"]);
        assert_eq!(rest.default_flavor().map(|f| f.name), Some("beego"));
        assert_eq!(rest.kind, DescriptorKind::Service);
    }

    #[test]
    fn redis_config_defaults() {
        let block = adapters::REDIS.fragments.config_yaml.unwrap();
        assert_eq!(block.key, "redis");
        assert_eq!(block.get("host"), Some(ConfigValue::Str("localhost")));
        assert_eq!(block.get("port"), Some(ConfigValue::Int(6379)));
        assert_eq!(block.get("password"), Some(ConfigValue::Str("password123")));
    }

    #[test]
    fn every_adapter_has_config_and_lifecycle() {
        for adapter in adapters::ALL {
            let fragments = adapter.fragments;
            assert!(fragments.config_yaml.is_some(), "{}", adapter.name);
            assert!(fragments.config_go.is_some(), "{}", adapter.name);
            assert!(fragments.init.is_some(), "{}", adapter.name);
            assert!(fragments.shutdown.is_some(), "{}", adapter.name);
            let service = fragments.service.unwrap();
            assert!(
                service.template.starts_with(&format!("package {}", adapter.package)),
                "{}",
                adapter.name
            );
        }
    }

    #[test]
    fn evrone_template_drops_ci() {
        let registry = registry();
        let template = registry.template("github.com/evrone/go-clean-template").unwrap();
        assert!(matches!(template.setup(), [SetupAction::Remove(p)] if p.to_string() == ".github"));
    }
}
