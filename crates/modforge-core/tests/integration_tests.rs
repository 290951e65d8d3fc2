//! Integration tests for the public API of modforge-core.

use std::path::PathBuf;

use modforge_core::{
    application::TemplateSource,
    domain::{
        ConfigBlock, ConfigValue, Descriptor, DirectoryPlan, Flavor, Fragments, Registry,
        RepoTemplate, Settings, manifest,
    },
    error::ErrorCategory,
};

const NATS: Descriptor = Descriptor::adapter(
    "nats",
    "NATS",
    "message bus",
    Fragments {
        config_yaml: Some(ConfigBlock::new("nats", &[("url", ConfigValue::Str("nats://localhost:4222"))])),
        ..Fragments::empty()
    },
);

const SLOG: Descriptor = Descriptor::logger("slog", "slog", "stdlib logger", Fragments::empty());
const ZAP: Descriptor = Descriptor::logger("zap", "Zap", "zap", Fragments::empty());

const CHI: Flavor = Flavor {
    name: "chi",
    display_name: "go-chi/chi",
    description: "router",
    fragments: Fragments::empty(),
};

const HTTP: Descriptor = Descriptor::service("http", "HTTP", "http api", &[CHI]);

fn registry() -> Registry {
    Registry::new()
        .with(NATS)
        .with(SLOG)
        .with(ZAP)
        .with(HTTP)
        .with_template(RepoTemplate::new("github.com/acme/starter", "starter"))
}

#[test]
fn custom_registry_drives_settings_and_plan() {
    let registry = registry();
    let settings = Settings::builder()
        .module("example.com/bus")
        .go_version("go1.23.0")
        .path("./bus")
        .logger("SLOG")
        .adapter("NATS")
        .service("http", None)
        .build(&registry)
        .unwrap();

    assert_eq!(settings.logger(), "slog");
    assert_eq!(settings.go_version(), "1.23.0");
    assert_eq!(settings.flavor_of("http"), Some("chi"));

    let modules = registry.enabled(&settings).unwrap();
    let names: Vec<_> = modules.iter().map(|m| m.name()).collect();
    assert_eq!(names, ["slog", "nats", "http"]);

    let plan = DirectoryPlan::for_modules(&modules);
    assert_eq!(
        plan.subfolders("pkg").unwrap(),
        ["logger".to_string(), "nats".into(), "http".into()]
    );
    assert!(plan.paths().contains(&PathBuf::from("internal/domain")));
}

#[test]
fn unknown_names_are_rejected() {
    let registry = registry();
    let err = Settings::builder()
        .module("example.com/bus")
        .go_version("1.22")
        .service("http", Some("gin".into()))
        .build(&registry)
        .unwrap_err();
    assert!(err.to_string().contains("gin"));

    let err = Settings::builder()
        .module("  ")
        .go_version("1.22")
        .build(&registry)
        .unwrap_err();
    assert_eq!(err, modforge_core::domain::DomainError::EmptyModule);
}

#[test]
fn template_sources_resolve() {
    let registry = registry();

    let registered = TemplateSource::Registered("github.com/acme/starter".into())
        .resolve(&registry)
        .unwrap();
    assert_eq!(registered.clone_url(), "https://github.com/acme/starter.git");

    let custom = TemplateSource::Custom("gitlab.com/team/base/".into())
        .resolve(&registry)
        .unwrap();
    assert_eq!(custom.import_path(), "gitlab.com/team/base");

    let err = TemplateSource::Registered("github.com/acme/missing".into())
        .resolve(&registry)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Template);
}

#[test]
fn manifest_rewrite_keeps_requirements() {
    let original = "module github.com/acme/starter\n\ngo 1.19\n\nrequire (\n\tgithub.com/spf13/viper v1.16.0\n)\n";
    let rewritten = manifest::rewrite_manifest(original, "1.22", Some("example.com/bus"));

    assert_eq!(manifest::declared_module(&rewritten), Some("example.com/bus"));
    assert!(rewritten.contains("\ngo 1.22\n"));
    assert!(rewritten.ends_with("github.com/spf13/viper v1.16.0\n)\n"));
}
