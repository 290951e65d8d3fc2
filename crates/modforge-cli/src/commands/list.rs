//! Implementation of the `modforge list` command.

use serde::Serialize;

use modforge_core::domain::{Descriptor, Registry};

use crate::{
    cli::{ListArgs, ListSection},
    error::CliResult,
    output::OutputManager,
};

/// One row of `modforge list --format json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct Entry {
    kind: &'static str,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flavors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let registry = super::registry();
    let sections = match args.section {
        Some(section) => vec![section],
        None => vec![
            ListSection::Adapters,
            ListSection::Services,
            ListSection::Loggers,
            ListSection::Templates,
        ],
    };

    if output.is_json() {
        let entries: Vec<Entry> = sections
            .iter()
            .flat_map(|s| entries(&registry, *s))
            .collect();
        return output.json(&entries);
    }

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            output.print("")?;
        }
        print_section(&registry, *section, &output)?;
    }
    Ok(())
}

fn entries(registry: &Registry, section: ListSection) -> Vec<Entry> {
    let descriptor = |kind: &'static str, d: &Descriptor| Entry {
        kind,
        name: d.name.to_string(),
        display_name: Some(d.display_name.to_string()),
        description: d.description.to_string(),
        flavors: d.flavors.iter().map(|f| f.name.to_string()).collect(),
        url: None,
    };

    match section {
        ListSection::Adapters => registry
            .adapters()
            .map(|d| descriptor("adapter", d))
            .collect(),
        ListSection::Services => registry
            .services()
            .map(|d| descriptor("service", d))
            .collect(),
        ListSection::Loggers => registry
            .loggers()
            .map(|d| descriptor("logger", d))
            .collect(),
        ListSection::Templates => registry
            .templates()
            .map(|t| Entry {
                kind: "template",
                name: t.name().to_string(),
                display_name: None,
                description: t.description().to_string(),
                flavors: Vec::new(),
                url: Some(t.clone_url()),
            })
            .collect(),
    }
}

fn print_section(
    registry: &Registry,
    section: ListSection,
    output: &OutputManager,
) -> CliResult<()> {
    let rows = entries(registry, section);
    let title = match section {
        ListSection::Adapters => "Adapters:",
        ListSection::Services => "Services:",
        ListSection::Loggers => "Loggers:",
        ListSection::Templates => "Templates:",
    };
    output.header(title)?;

    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for row in &rows {
        output.row(&row.name, width, &row.description)?;
        if section == ListSection::Services {
            if let Some(descriptor) = registry.service(&row.name) {
                let flavor_width = descriptor
                    .flavors
                    .iter()
                    .map(|f| f.name.len())
                    .max()
                    .unwrap_or(0);
                for flavor in descriptor.flavors {
                    output.row(
                        &format!("  {}", flavor.name),
                        flavor_width + 2,
                        flavor.description,
                    )?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_carry_their_flavors() {
        let registry = super::super::registry();
        let services = entries(&registry, ListSection::Services);
        let rest = services.iter().find(|e| e.name == "rest").unwrap();
        assert_eq!(rest.flavors, vec!["beego", "fasthttp", "fiber", "gin"]);
        let gql = services.iter().find(|e| e.name == "gql").unwrap();
        assert_eq!(gql.flavors, vec!["gqlgen"]);
    }

    #[test]
    fn adapters_are_sorted() {
        let registry = super::super::registry();
        let names: Vec<String> = entries(&registry, ListSection::Adapters)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["mariadb", "mongodb", "postgres", "redis"]);
    }

    #[test]
    fn templates_have_clone_urls() {
        let registry = super::super::registry();
        let templates = entries(&registry, ListSection::Templates);
        assert_eq!(templates.len(), 4);
        assert!(
            templates
                .iter()
                .all(|t| t.url.as_deref().is_some_and(|u| u.starts_with("https://")))
        );
    }

    #[test]
    fn json_omits_empty_flavors() {
        let registry = super::super::registry();
        let loggers = entries(&registry, ListSection::Loggers);
        let json = serde_json::to_string(&loggers).unwrap();
        assert!(json.contains("\"name\":\"zap\""));
        assert!(!json.contains("flavors"));
    }
}
