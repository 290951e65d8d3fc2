//! Repository templates for template mode.

use modforge_core::domain::{RelativePath, RepoTemplate, SetupAction};

pub fn all() -> Vec<RepoTemplate> {
    vec![
        RepoTemplate::new(
            "github.com/amitshekhariitbhu/go-backend-clean-architecture",
            "A Go (Golang) Backend Clean Architecture project with Gin, MongoDB, JWT Authentication Middleware, Test, and Docker.",
        ),
        RepoTemplate::new(
            "github.com/bxcodec/go-clean-arch",
            "Go (Golang) Clean Architecture based on Reading Uncle Bob's Clean Architecture",
        ),
        without_ci(RepoTemplate::new(
            "github.com/evrone/go-clean-template",
            "Clean Architecture template for Golang services",
        )),
        without_ci(RepoTemplate::new(
            "github.com/thangchung/go-coffeeshop",
            "A practical event-driven microservices demo built with Golang. Nomad, Consul Connect, Vault, and Terraform for deployment",
        )),
    ]
}

/// Upstream CI workflows publish to the original project's registries.
fn without_ci(template: RepoTemplate) -> RepoTemplate {
    match RelativePath::try_new(".github") {
        Ok(path) => template.with_setup(SetupAction::Remove(path)),
        Err(_) => template,
    }
}
