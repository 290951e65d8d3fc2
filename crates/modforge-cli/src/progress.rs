//! Stage reporting for long-running commands.

use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use modforge_core::{application::ProgressReporter, domain::GenerationStage};

enum Mode {
    /// Spinner on stderr while a step runs; completed stages print above it.
    Spinner(ProgressBar),
    /// One line per completed stage on stdout.
    Lines(Term),
    Hidden,
}

/// [`ProgressReporter`] backed by `indicatif`.
pub struct CliProgress {
    mode: Mode,
    no_color: bool,
}

impl CliProgress {
    pub fn spinner(no_color: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            mode: Mode::Spinner(bar),
            no_color,
        }
    }

    pub fn lines() -> Self {
        Self {
            mode: Mode::Lines(Term::stdout()),
            no_color: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            mode: Mode::Hidden,
            no_color: true,
        }
    }

    fn line(&self, stage: GenerationStage, message: &str) -> String {
        let (symbol, failed) = match stage {
            GenerationStage::RolledBack => ("\u{21ba}", true), // ↺
            _ => ("\u{2713}", false),                          // ✓
        };
        match (self.no_color, failed) {
            (true, _) => format!("{symbol} {message}"),
            (false, false) => format!("{} {message}", symbol.green().bold()),
            (false, true) => format!("{} {}", symbol.yellow().bold(), message.yellow()),
        }
    }
}

impl ProgressReporter for CliProgress {
    fn step_started(&self, message: &str) {
        if let Mode::Spinner(bar) = &self.mode {
            bar.set_message(message.to_string());
        }
    }

    fn stage_completed(&self, stage: GenerationStage, message: &str) {
        let line = self.line(stage, message);
        match &self.mode {
            Mode::Spinner(bar) => {
                bar.println(line);
                bar.set_message(String::new());
                if matches!(stage, GenerationStage::Done | GenerationStage::RolledBack) {
                    bar.finish_and_clear();
                }
            }
            Mode::Lines(term) => {
                // Progress lines are best effort; a closed stdout must not fail the run.
                let _ = term.write_line(&line);
            }
            Mode::Hidden => {}
        }
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if let Mode::Spinner(bar) = &self.mode {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_have_no_ansi() {
        let progress = CliProgress::lines();
        let line = progress.line(GenerationStage::ModuleManifestCreated, "Initialized go.mod");
        assert_eq!(line, "\u{2713} Initialized go.mod");
    }

    #[test]
    fn rollback_uses_its_own_symbol() {
        let progress = CliProgress::hidden();
        let line = progress.line(GenerationStage::RolledBack, "Rolled back");
        assert!(line.starts_with('\u{21ba}'));
    }

    #[test]
    fn hidden_reporter_accepts_every_call() {
        let progress = CliProgress::hidden();
        progress.step_started("go mod tidy");
        progress.stage_completed(GenerationStage::Done, "Done!");
    }
}
