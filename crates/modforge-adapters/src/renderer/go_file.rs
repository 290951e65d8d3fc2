//! Minimal Go source file assembly.

use std::collections::BTreeSet;

use modforge_core::domain::GoImport;

/// A Go file under construction: package clause, imports, body.
///
/// Imports are deduplicated and emitted in two gofmt groups, standard
/// library first.
#[derive(Debug, Clone)]
pub(crate) struct GoFile {
    package: String,
    imports: BTreeSet<GoImport>,
    body: String,
}

impl GoFile {
    pub(crate) fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: BTreeSet::new(),
            body: String::new(),
        }
    }

    pub(crate) fn import(&mut self, import: GoImport) -> &mut Self {
        self.imports.insert(import);
        self
    }

    pub(crate) fn import_path(&mut self, path: &str) -> &mut Self {
        self.import(GoImport::new(path))
    }

    /// Append one line to the body.
    pub(crate) fn line(&mut self, text: &str) -> &mut Self {
        self.body.push_str(text);
        self.body.push('\n');
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.body.push('\n');
        self
    }

    /// Append a multi-line fragment, indented by `depth` tabs.
    pub(crate) fn block(&mut self, fragment: &str, depth: usize) -> &mut Self {
        self.body.push_str(&indent(fragment, depth));
        self
    }

    pub(crate) fn finish(self) -> String {
        let mut out = format!("package {}\n\n", self.package);

        let (std, third): (Vec<&GoImport>, Vec<&GoImport>) =
            self.imports.iter().partition(|i| i.is_std());
        match (std.len(), third.len()) {
            (0, 0) => {}
            (1, 0) => out.push_str(&format!("import {}\n\n", std[0])),
            (0, 1) => out.push_str(&format!("import {}\n\n", third[0])),
            _ => {
                out.push_str("import (\n");
                for import in &std {
                    out.push_str(&format!("\t{import}\n"));
                }
                if !std.is_empty() && !third.is_empty() {
                    out.push('\n');
                }
                for import in &third {
                    out.push_str(&format!("\t{import}\n"));
                }
                out.push_str(")\n\n");
            }
        }

        out.push_str(&self.body);
        out
    }
}

/// Indent every non-empty line of `text` by `depth` tabs; always ends with a newline.
pub(crate) fn indent(text: &str, depth: usize) -> String {
    let prefix = "\t".repeat(depth);
    let mut out = String::with_capacity(text.len() + depth * 8);
    for line in text.trim_end_matches('\n').lines() {
        if !line.trim().is_empty() {
            out.push_str(&prefix);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}
