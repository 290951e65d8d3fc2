//! Implementation of the `modforge version` command.

use serde::Serialize;

use crate::{error::CliResult, output::OutputManager};

#[derive(Debug, Serialize)]
struct VersionView {
    name: &'static str,
    version: &'static str,
}

/// Print the version. Shown even with `--quiet`, since it is the whole output.
pub fn execute(output: OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(&VersionView {
            name: "modforge",
            version: env!("CARGO_PKG_VERSION"),
        });
    }
    println!("{}", line());
    Ok(())
}

fn line() -> String {
    format!("modforge v{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_line_has_prefix() {
        assert!(line().starts_with("modforge v"));
        assert!(line().ends_with(env!("CARGO_PKG_VERSION")));
    }
}
