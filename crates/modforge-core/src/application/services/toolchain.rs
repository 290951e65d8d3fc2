//! Go toolchain invocations over the `CommandRunner` port.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::CommandRunner},
    domain::normalize_go_version,
    error::ForgeResult,
};

const GO: &str = "go";

/// Run `program args...` in `dir`; a non-zero exit becomes `Tooling`.
pub fn run_checked(
    runner: &dyn CommandRunner,
    dir: &Path,
    program: &str,
    args: &[&str],
) -> ForgeResult<String> {
    let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
    let command = std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");

    debug!(%command, dir = %dir.display(), "running command");
    let out = runner.run(dir, program, &args)?;
    if out.success {
        Ok(out.output)
    } else {
        Err(ApplicationError::Tooling {
            command,
            output: out.output.trim().to_string(),
        }
        .into())
    }
}

/// `go mod init <module>`.
#[instrument(skip(runner))]
pub fn mod_init(runner: &dyn CommandRunner, dir: &Path, module: &str) -> ForgeResult<()> {
    run_checked(runner, dir, GO, &["mod", "init", module]).map(|_| ())
}

/// `go mod tidy`.
#[instrument(skip(runner))]
pub fn mod_tidy(runner: &dyn CommandRunner, dir: &Path) -> ForgeResult<()> {
    run_checked(runner, dir, GO, &["mod", "tidy"]).map(|_| ())
}

/// The locally installed Go version, without the `go` prefix (`1.22.1`).
pub fn detect_go_version(runner: &dyn CommandRunner, dir: &Path) -> ForgeResult<String> {
    let raw = run_checked(runner, dir, GO, &["env", "GOVERSION"])?;
    let version = normalize_go_version(raw.lines().next().unwrap_or_default());
    if version.is_empty() {
        return Err(ApplicationError::Tooling {
            command: "go env GOVERSION".into(),
            output: "empty output".into(),
        }
        .into());
    }
    Ok(version)
}
