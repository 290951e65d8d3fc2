//! External command execution via `std::process`.

use std::path::Path;
use std::process::{Command, Stdio};

use modforge_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    error::ForgeResult,
};
use tracing::{debug, instrument};

/// Runs programs from `PATH`, capturing stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> ForgeResult<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::ToolingUnavailable {
                command: program.to_string(),
                reason: e.to_string(),
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(status = ?output.status.code(), "command finished");
        Ok(CommandOutput {
            success: output.status.success(),
            output: combined,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let err = ProcessRunner::new()
            .run(tmp.path(), "modforge-definitely-not-a-program", &[])
            .unwrap_err();
        assert!(err.to_string().contains("modforge-definitely-not-a-program"));
    }

    #[cfg(unix)]
    #[test]
    fn captures_output_and_status() {
        let tmp = TempDir::new().unwrap();
        let runner = ProcessRunner::new();

        let ok = runner
            .run(tmp.path(), "sh", &["-c".into(), "echo out; echo err >&2".into()])
            .unwrap();
        assert!(ok.success);
        assert!(ok.output.contains("out"));
        assert!(ok.output.contains("err"));

        let failed = runner.run(tmp.path(), "sh", &["-c".into(), "exit 3".into()]).unwrap();
        assert!(!failed.success);
    }
}
