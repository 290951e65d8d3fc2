//! Placeholder substitution for descriptor fragments.

use std::collections::BTreeMap;

use crate::domain::entities::settings::Settings;

/// Context for fragment rendering.
///
/// A value object holding the variables a fragment may reference.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `MODULE` | "github.com/acme/billing" |
/// | `MODULE_NAME` | "billing" |
/// | `GO_VERSION` | "1.22" |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(module: impl Into<String>, go_version: impl Into<String>) -> Self {
        let module = module.into();
        let mut vars = BTreeMap::new();

        let short = module
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        vars.insert("MODULE_NAME".to_string(), short);
        vars.insert("MODULE".to_string(), module);
        vars.insert("GO_VERSION".to_string(), go_version.into());

        Self { variables: vars }
    }

    pub fn for_settings(settings: &Settings) -> Self {
        Self::new(settings.module(), settings.go_version())
    }

    /// Add a custom variable, consuming self and returning a new context.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace `{{VARIABLE}}` placeholders.
    ///
    /// `{{UNKNOWN}}` is left as literal text.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();

        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_module_variables() {
        let ctx = RenderContext::new("example.com/foo", "1.22");
        assert_eq!(
            ctx.render("import \"{{MODULE}}/pkg/redis\" // {{MODULE_NAME}} go{{GO_VERSION}}"),
            "import \"example.com/foo/pkg/redis\" // foo go1.22"
        );
    }

    #[test]
    fn unknown_placeholders_survive() {
        let ctx = RenderContext::new("m", "1").with_variable("X", "y");
        assert_eq!(ctx.render("{{X}}{{NOPE}}"), "y{{NOPE}}");
    }
}
