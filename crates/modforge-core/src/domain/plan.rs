//! Directory plan for scaffold mode.
//!
//! A fixed skeleton (`cmd/app`, `config`, `internal/{app,domain}`, `pkg/logger`)
//! plus one `pkg/<package>` folder per enabled adapter and service.

use std::path::PathBuf;

use crate::domain::entities::descriptor::{DescriptorKind, EnabledModule};

const SKELETON: &[(&str, &[&str])] = &[
    ("cmd", &["app"]),
    ("config", &[]),
    ("internal", &["app", "domain"]),
    ("pkg", &["logger"]),
];

/// Top-level folder to required subfolders, in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPlan {
    entries: Vec<(String, Vec<String>)>,
}

impl DirectoryPlan {
    /// The skeleton alone.
    pub fn skeleton() -> Self {
        Self {
            entries: SKELETON
                .iter()
                .map(|(top, subs)| {
                    (
                        (*top).to_string(),
                        subs.iter().map(|s| (*s).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Skeleton plus a `pkg/` folder for every enabled adapter and service.
    pub fn for_modules(modules: &[EnabledModule<'_>]) -> Self {
        let mut plan = Self::skeleton();
        for module in modules {
            if matches!(module.kind(), DescriptorKind::Adapter | DescriptorKind::Service) {
                plan.add("pkg", module.descriptor.package);
            }
        }
        plan
    }

    /// Add a subfolder under `top`; duplicates are ignored.
    pub fn add(&mut self, top: &str, sub: &str) {
        match self.entries.iter_mut().find(|(t, _)| t == top) {
            Some((_, subs)) => {
                if !subs.iter().any(|s| s == sub) {
                    subs.push(sub.to_string());
                }
            }
            None => self.entries.push((top.to_string(), vec![sub.to_string()])),
        }
    }

    pub fn subfolders(&self, top: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(t, _)| t == top)
            .map(|(_, subs)| subs.as_slice())
    }

    /// Every directory, parents before children, relative to the target.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        for (top, subs) in &self.entries {
            let parent = PathBuf::from(top);
            out.push(parent.clone());
            out.extend(subs.iter().map(|s| parent.join(s)));
        }
        out
    }
}
