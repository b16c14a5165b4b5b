//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use modula_core::domain::{ModuleKind, ProductKind};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "modula",
    bin_name = "modula",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Declarative module manifest generator",
    long_about = "Modula turns short module.toml descriptors into complete \
                  project manifests: targets, dependencies, build settings \
                  and schemes.",
    after_help = "EXAMPLES:\n\
        \x20 modula init Login --with interface,unit-tests,demo\n\
        \x20 modula check Modules/\n\
        \x20 modula generate Modules/Login\n\
        \x20 modula generate Modules/ --output Manifests --force",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble and render manifests.
    #[command(
        visible_alias = "gen",
        about = "Generate manifests from module descriptors",
        after_help = "EXAMPLES:\n\
            \x20 modula generate Modules/Login/module.toml\n\
            \x20 modula generate Modules/ --format summary\n\
            \x20 modula generate Modules/ --output Manifests --dry-run"
    )]
    Generate(GenerateArgs),

    /// Validate descriptors without producing output.
    #[command(
        about = "Validate module descriptors",
        after_help = "EXAMPLES:\n\
            \x20 modula check Modules/\n\
            \x20 modula check Modules/Login --output-format json"
    )]
    Check(CheckArgs),

    /// Write a starter `module.toml`.
    #[command(
        about = "Create a starter module descriptor",
        after_help = "EXAMPLES:\n\
            \x20 modula init Login\n\
            \x20 modula init Payments --product static-framework --with interface,testing\n\
            \x20 modula init Login --dir Modules --force"
    )]
    Init(InitArgs),

    /// Print the resolved environment context.
    #[command(
        about = "Show the environment every module is assembled against",
        after_help = "EXAMPLES:\n\
            \x20 modula env\n\
            \x20 IS_CI=1 modula env --output-format json"
    )]
    Env,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 modula completions bash > ~/.local/share/bash-completion/completions/modula\n\
            \x20 modula completions zsh  > ~/.zfunc/_modula\n\
            \x20 modula completions fish > ~/.config/fish/completions/modula.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Modula configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 modula config get environment.organization\n\
            \x20 modula config list\n\
            \x20 modula config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `modula generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// A `module.toml`, a module directory, or a tree of modules.
    #[arg(value_name = "PATH", help = "Descriptor file or directory")]
    pub path: PathBuf,

    /// Manifest format. Defaults to `output.format` from the config.
    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        value_enum,
        help = "Manifest format"
    )]
    pub format: Option<ManifestFormat>,

    /// Write `<Name>.manifest.<ext>` files here instead of printing.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: print to stdout)"
    )]
    pub output: Option<PathBuf>,

    /// Overwrite existing manifest files.
    #[arg(long = "force", help = "Overwrite existing manifests")]
    pub force: bool,

    /// Report what would be written without touching the disk.
    #[arg(
        long = "dry-run",
        requires = "output",
        help = "Show what would be written without writing"
    )]
    pub dry_run: bool,
}

/// Renderers selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    /// Machine-readable JSON.
    #[default]
    Json,
    /// Indented text tree.
    Summary,
}

impl std::fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `modula check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// A `module.toml`, a module directory, or a tree of modules.
    #[arg(value_name = "PATH", help = "Descriptor file or directory")]
    pub path: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `modula init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Module name; also the directory created under `--dir`.
    #[arg(value_name = "NAME", help = "Module name")]
    pub name: String,

    /// Product of the main target.
    #[arg(
        short = 'p',
        long = "product",
        value_name = "PRODUCT",
        value_parser = ProductKind::from_str,
        help = "Main target product (default: framework)"
    )]
    pub product: Option<ProductKind>,

    /// Optional targets to request.
    #[arg(
        short = 'w',
        long = "with",
        value_name = "KIND",
        value_parser = ModuleKind::from_str,
        value_delimiter = ',',
        help = "Optional targets: interface, testing, unit-tests, ui-tests, demo"
    )]
    pub with: Vec<ModuleKind>,

    /// Parent directory of the new module.
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory to create the module in"
    )]
    pub dir: PathBuf,

    /// Overwrite an existing descriptor.
    #[arg(long = "force", help = "Overwrite an existing module.toml")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `modula completions`.
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

/// Subcommands for `modula config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `environment.organization`.
        key: String,
    },
    /// Print the fully resolved configuration.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
