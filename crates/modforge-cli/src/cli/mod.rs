//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "modforge",
    bin_name = "modforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Go backend project generator",
    long_about = "Modforge scaffolds Go backend projects from pluggable adapters, \
                  services and loggers, or installs a ready-made template repository \
                  under a new module path.\n\n\
                  Run without a subcommand to start the interactive wizard.",
    after_help = "EXAMPLES:\n\
        \x20 modforge\n\
        \x20 modforge generate -m github.com/acme/billing -p ./billing -a redis,mariadb -s rest=gin\n\
        \x20 modforge template github.com/evrone/go-clean-template -m github.com/acme/shop -p ./shop\n\
        \x20 modforge template --custom --url https://github.com/acme/go-template -m example.com/x\n\
        \x20 modforge list adapters",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; none starts the wizard.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project from adapters, services and a logger.
    #[command(
        visible_alias = "g",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 modforge generate -m github.com/acme/billing -p ./billing\n\
            \x20 modforge generate -m example.com/foo -a redis -a postgres --go-version 1.22\n\
            \x20 modforge generate -m example.com/api -s rest=fiber -s gql --dry-run"
    )]
    Generate(GenerateArgs),

    /// Install a template repository under a new module path.
    #[command(
        visible_alias = "t",
        about = "Use a predefined or custom template",
        after_help = "EXAMPLES:\n\
            \x20 modforge template github.com/bxcodec/go-clean-arch -m example.com/foo -p ./foo\n\
            \x20 modforge template --custom --url https://github.com/acme/go-template -m example.com/foo"
    )]
    Template(TemplateArgs),

    /// List registered descriptors and templates.
    #[command(
        visible_alias = "ls",
        about = "List adapters, services, loggers and templates",
        after_help = "EXAMPLES:\n\
            \x20 modforge list\n\
            \x20 modforge list services\n\
            \x20 modforge list templates --format json"
    )]
    List(ListArgs),

    /// Print the version.
    #[command(about = "Print the version number of modforge")]
    Version,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 modforge completions bash > ~/.local/share/bash-completion/completions/modforge\n\
            \x20 modforge completions zsh  > ~/.zfunc/_modforge\n\
            \x20 modforge completions fish > ~/.config/fish/completions/modforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Modforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 modforge config get defaults.module\n\
            \x20 modforge config set defaults.module github.com/acme/service\n\
            \x20 modforge config list"
    )]
    Config(ConfigCommands),
}

// ── shared project flags ──────────────────────────────────────────────────────

/// Identity of the project being created, shared by `generate` and `template`.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectArgs {
    /// Go module import path.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        help = "Module import path, e.g. github.com/acme/billing"
    )]
    pub module: Option<String>,

    /// Target directory; must be empty or absent.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Target directory (default: config value or current directory)"
    )]
    pub path: Option<PathBuf>,

    /// Go version written to `go.mod`.
    #[arg(
        long = "go-version",
        value_name = "VERSION",
        help = "Go version for go.mod (default: detected from the local toolchain)"
    )]
    pub go_version: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `modforge generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Adapters to include.
    #[arg(
        short = 'a',
        long = "adapter",
        value_name = "NAME",
        value_delimiter = ',',
        help = "Adapter to include (repeatable, comma-separated)"
    )]
    pub adapters: Vec<String>,

    /// Services to include, optionally with a flavor.
    #[arg(
        short = 's',
        long = "service",
        value_name = "NAME[=FLAVOR]",
        help = "Service to include, e.g. rest=gin (repeatable)"
    )]
    pub services: Vec<ServiceSpec>,

    /// Logger to install.
    #[arg(long = "logger", value_name = "NAME", help = "Logger to install")]
    pub logger: Option<String>,

    /// Install a registered template instead of generating.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        conflicts_with_all = ["adapters", "services", "logger"],
        help = "Registered template to install instead of generating"
    )]
    pub template: Option<String>,

    /// Render everything and list the files without writing.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

/// `name` or `name=flavor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    pub name: String,
    pub flavor: Option<String>,
}

impl FromStr for ServiceSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, flavor) = match s.split_once('=') {
            Some((name, flavor)) => (name.trim(), Some(flavor.trim())),
            None => (s.trim(), None),
        };
        if name.is_empty() {
            return Err(format!("missing service name in '{s}'"));
        }
        if flavor.is_some_and(str::is_empty) {
            return Err(format!("missing flavor after '=' in '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            flavor: flavor.map(str::to_string),
        })
    }
}

// ── template ──────────────────────────────────────────────────────────────────

/// Arguments for `modforge template`.
#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Registered template (its import path).
    #[arg(value_name = "TEMPLATE", conflicts_with = "url")]
    pub name: Option<String>,

    /// Use an arbitrary repository; no template-specific setup runs.
    #[arg(
        short = 'c',
        long = "custom",
        help = "Use a custom template repository (no extra setup is applied)"
    )]
    pub custom: bool,

    /// Repository URL for `--custom`.
    #[arg(
        long = "url",
        value_name = "URL",
        requires = "custom",
        help = "Repository URL, e.g. https://github.com/acme/go-template"
    )]
    pub url: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `modforge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only list this section.
    #[arg(value_enum, value_name = "SECTION")]
    pub section: Option<ListSection>,
}

/// Sections of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListSection {
    Adapters,
    Services,
    Loggers,
    Templates,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `modforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `modforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.module`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
