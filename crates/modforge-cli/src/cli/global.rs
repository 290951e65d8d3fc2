//! Flags accepted by every `modforge` invocation.
//!
//! Flattened into [`super::Cli`] with `global = true`, so they may appear
//! before or after the subcommand.

use std::path::PathBuf;

use clap::{Args, builder::FalseyValueParser};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Logging verbosity; see `long_help`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)",
        long_help = "Log level written to stderr:
    (none)  - warnings and errors
    -v      - each generation stage
    -vv     - every command and file
    -vvv    - everything

MODFORGE_LOG takes an EnvFilter directive and overrides this flag."
    )]
    pub verbose: u8,

    /// Only errors and JSON documents are printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Any non-empty `NO_COLOR` other than a falsey literal disables colour
    /// (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML file read after the platform config file; also the file
    /// `config set` writes.
    #[arg(
        long = "config",
        global = true,
        env = "MODFORGE_CONFIG",
        value_name = "FILE",
        help = "Use this config file"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub format: OutputFormat,
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from the config, else human on a terminal and plain otherwise.
    #[default]
    Auto,
    /// Colors and symbols.
    Human,
    /// No ANSI codes; stable for scripts.
    Plain,
    /// One JSON document per command.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value; unknown values mean `Auto`.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "human" => Self::Human,
            "plain" => Self::Plain,
            "json" => Self::Json,
            _ => Self::Auto,
        }
    }
}
