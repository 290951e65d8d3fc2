//! Interactive prompts.
//!
//! Built on `dialoguer` behind the `interactive` feature. Without it every
//! prompt fails with [`CliError::FeatureNotAvailable`] and [`available`]
//! returns `false`, so callers fall back to flags.

use std::io::IsTerminal as _;

use crate::error::CliResult;

/// Module offered when neither a flag nor the config names one.
pub const DEFAULT_MODULE: &str = "github.com/example/service";

/// True when this build can prompt and stdin is a terminal.
pub fn available() -> bool {
    cfg!(feature = "interactive") && std::io::stdin().is_terminal()
}

/// One selectable entry: the value returned and the label shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, description: &str) -> Self {
        let value = value.into();
        let label = if description.is_empty() {
            value.clone()
        } else {
            format!("{value}  ({description})")
        };
        Self { value, label }
    }
}

#[cfg(feature = "interactive")]
mod imp {
    use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, Select, theme::ColorfulTheme};

    use super::Choice;
    use crate::error::{CliError, CliResult};

    fn failed(e: dialoguer::Error) -> CliError {
        CliError::IoError {
            message: "prompt failed".into(),
            source: std::io::Error::other(e),
        }
    }

    pub fn text(prompt: &str, default: Option<&str>) -> CliResult<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .validate_with(|value: &String| -> Result<(), &'static str> {
                if value.trim().is_empty() {
                    Err("a value is required")
                } else {
                    Ok(())
                }
            });
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input
            .interact_text()
            .map(|v| v.trim().to_string())
            .map_err(failed)
    }

    pub fn select(prompt: &str, choices: &[Choice], fuzzy: bool) -> CliResult<String> {
        let theme = ColorfulTheme::default();
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        let picked = if fuzzy {
            FuzzySelect::with_theme(&theme)
                .with_prompt(prompt)
                .items(&labels)
                .default(0)
                .interact_opt()
        } else {
            Select::with_theme(&theme)
                .with_prompt(prompt)
                .items(&labels)
                .default(0)
                .interact_opt()
        };
        let picked = picked.map_err(failed)?;

        picked
            .and_then(|i| choices.get(i))
            .map(|c| c.value.clone())
            .ok_or(CliError::Cancelled)
    }

    pub fn multi_select(prompt: &str, choices: &[Choice]) -> CliResult<Vec<String>> {
        let theme = ColorfulTheme::default();
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        let picked = MultiSelect::with_theme(&theme)
            .with_prompt(prompt)
            .items(&labels)
            .interact_opt()
            .map_err(failed)?
            .ok_or(CliError::Cancelled)?;

        Ok(picked
            .into_iter()
            .filter_map(|i| choices.get(i))
            .map(|c| c.value.clone())
            .collect())
    }

    pub fn confirm(prompt: &str, default: bool) -> CliResult<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(failed)
    }
}

#[cfg(not(feature = "interactive"))]
mod imp {
    use super::Choice;
    use crate::error::{CliError, CliResult};

    const FEATURE: CliError = CliError::FeatureNotAvailable {
        feature: "interactive",
    };

    pub fn text(_prompt: &str, _default: Option<&str>) -> CliResult<String> {
        Err(FEATURE)
    }

    pub fn select(_prompt: &str, _choices: &[Choice], _fuzzy: bool) -> CliResult<String> {
        Err(FEATURE)
    }

    pub fn multi_select(_prompt: &str, _choices: &[Choice]) -> CliResult<Vec<String>> {
        Err(FEATURE)
    }

    pub fn confirm(_prompt: &str, _default: bool) -> CliResult<bool> {
        Err(FEATURE)
    }
}

/// Free-text answer; empty input is re-asked.
pub fn text(prompt: &str, default: Option<&str>) -> CliResult<String> {
    imp::text(prompt, default)
}

/// One of `choices`; Esc cancels.
pub fn select(prompt: &str, choices: &[Choice]) -> CliResult<String> {
    imp::select(prompt, choices, false)
}

/// Like [`select`] with type-to-filter, for long lists.
pub fn fuzzy_select(prompt: &str, choices: &[Choice]) -> CliResult<String> {
    imp::select(prompt, choices, true)
}

/// Any subset of `choices`, in list order.
pub fn multi_select(prompt: &str, choices: &[Choice]) -> CliResult<Vec<String>> {
    imp::multi_select(prompt, choices)
}

pub fn confirm(prompt: &str, default: bool) -> CliResult<bool> {
    imp::confirm(prompt, default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_label_includes_description() {
        let choice = Choice::new("redis", "Redis client");
        assert_eq!(choice.value, "redis");
        assert_eq!(choice.label, "redis  (Redis client)");
        assert_eq!(Choice::new("zap", "").label, "zap");
    }
}
