//! `go.mod` rewriting.
//!
//! Line-oriented prefix matching, not a `go.mod` parser: a line starting
//! with `module ` is replaced by the new module directive and a line starting
//! with `go ` by the new version directive. Everything else is kept as is.

/// File name of the Go module manifest.
pub const MANIFEST: &str = "go.mod";
/// Checksum file written next to the manifest by `go mod tidy`.
pub const CHECKSUMS: &str = "go.sum";

/// Rewrite the `go` line and, when `module` is given, the `module` line.
pub fn rewrite_manifest(content: &str, go_version: &str, module: Option<&str>) -> String {
    let mut out = String::with_capacity(content.len() + 16);
    for line in content.split_inclusive('\n') {
        let body = line.strip_suffix('\n').unwrap_or(line);
        let body = body.strip_suffix('\r').unwrap_or(body);
        let newline = &line[body.len()..];

        if body.starts_with("go ") {
            out.push_str("go ");
            out.push_str(go_version);
        } else if let (Some(module), true) = (module, body.starts_with("module ")) {
            out.push_str("module ");
            out.push_str(module);
        } else {
            out.push_str(body);
        }
        out.push_str(newline);
    }
    out
}

/// The module path declared in a manifest, if any.
pub fn declared_module(content: &str) -> Option<&str> {
    content
        .lines()
        .find_map(|l| l.strip_prefix("module "))
        .map(|m| m.trim().trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_MOD: &str = "module github.com/evrone/go-clean-template\n\ngo 1.19\n\nrequire (\n\tgithub.com/gin-gonic/gin v1.9.0\n)\n";

    #[test]
    fn rewrites_version_only_in_scaffold_mode() {
        let out = rewrite_manifest(GO_MOD, "1.22", None);
        assert!(out.contains("module github.com/evrone/go-clean-template\n"));
        assert!(out.contains("\ngo 1.22\n"));
        assert!(out.contains("\tgithub.com/gin-gonic/gin v1.9.0\n"));
    }

    #[test]
    fn rewrites_module_and_version_in_template_mode() {
        let out = rewrite_manifest(GO_MOD, "1.21", Some("example.com/foo"));
        assert_eq!(declared_module(&out), Some("example.com/foo"));
        assert!(out.contains("go 1.21"));
        assert!(out.ends_with(")\n"));
    }

    #[test]
    fn preserves_crlf_and_missing_trailing_newline() {
        let out = rewrite_manifest("module a\r\ngo 1.18", "1.22", Some("b"));
        assert_eq!(out, "module b\r\ngo 1.22");
    }

    #[test]
    fn keeps_crlf_on_every_rewritten_line() {
        let out = rewrite_manifest("module a\r\n\r\ngo 1.18\r\n", "1.22", None);
        assert_eq!(out, "module a\r\n\r\ngo 1.22\r\n");
    }

    #[test]
    fn leaves_indented_directives_alone() {
        let out = rewrite_manifest("module a\n\tgo 1.0\n", "1.22", None);
        assert_eq!(out, "module a\n\tgo 1.0\n");
    }
}
