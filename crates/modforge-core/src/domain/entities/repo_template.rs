//! Whole-repository templates used by template mode.
//!
//! A template is identified by its Go import path (`github.com/org/repo`),
//! which is also the string rewritten to the new module path after cloning.

use url::Url;

use crate::domain::{
    entities::common::RelativePath,
    error::DomainError,
};

/// A post-clone step a template asks for.
///
/// Setup hooks are data; the installer executes them. `{{MODULE}}` in
/// written content is substituted like any other fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAction {
    /// Delete a file or directory the template ships but the new project should not.
    Remove(RelativePath),
    /// Create or overwrite a file.
    Write { path: RelativePath, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTemplate {
    name: String,
    description: String,
    setup: Vec<SetupAction>,
}

impl RepoTemplate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            setup: Vec::new(),
        }
    }

    /// Add a setup step, consuming self.
    pub fn with_setup(mut self, action: SetupAction) -> Self {
        self.setup.push(action);
        self
    }

    /// Build an ad-hoc template from an arbitrary repository URL.
    ///
    /// `https://github.com/acme/svc.git` becomes `github.com/acme/svc`.
    /// A scheme-less `github.com/acme/svc` is accepted too.
    pub fn custom(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        let url = Url::parse(&with_scheme).map_err(|e| DomainError::InvalidTemplateUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        let host = url.host_str().ok_or_else(|| DomainError::InvalidTemplateUrl {
            url: raw.to_string(),
            reason: "missing host".into(),
        })?;

        let path = url.path().trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        if path.trim_matches('/').is_empty() {
            return Err(DomainError::InvalidTemplateUrl {
                url: raw.to_string(),
                reason: "missing repository path".into(),
            });
        }

        Ok(Self::new(format!("{host}{path}"), "Custom template"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn setup(&self) -> &[SetupAction] {
        &self.setup
    }

    /// The import path rewritten to the new module after cloning.
    pub fn import_path(&self) -> &str {
        &self.name
    }

    /// Clone URL derived from the import path.
    pub fn clone_url(&self) -> String {
        format!("https://{}.git", self.name)
    }
}
