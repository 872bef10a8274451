//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, LogFormat, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "hexgen",
    bin_name = "hexgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Hexagonal Spring Boot services from OpenAPI specs",
    long_about = "hexgen reads one OpenAPI document per service and writes a \
                  complete Spring WebFlux project in hexagonal layout: DTOs, \
                  domain model, ports, services, persistence adapters, REST \
                  controllers, tests and build files.",
    after_help = "EXAMPLES:\n\
        \x20 hexgen init\n\
        \x20 hexgen generate --specs ./specs --output ./projects\n\
        \x20 hexgen entities --output-format json\n\
        \x20 hexgen completions bash > /usr/share/bash-completion/completions/hexgen",
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
    /// Generate the project from the spec directory.
    #[command(
        visible_alias = "gen",
        about = "Generate the service project",
        after_help = "EXAMPLES:\n\
            \x20 hexgen generate\n\
            \x20 hexgen generate --specs ./specs --base-package com.acme.users\n\
            \x20 hexgen generate --dry-run"
    )]
    Generate(GenerateArgs),

    /// List the entities the specs produce.
    #[command(
        visible_alias = "ls",
        about = "List extracted entities",
        after_help = "EXAMPLES:\n\
            \x20 hexgen entities\n\
            \x20 hexgen entities --paths\n\
            \x20 hexgen entities --output-format json"
    )]
    Entities(EntitiesArgs),

    /// Write a default generation manifest.
    #[command(
        about = "Create hexgen.toml",
        after_help = "EXAMPLES:\n\
            \x20 hexgen init\n\
            \x20 hexgen init --path config/hexgen.toml --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hexgen completions bash > ~/.local/share/bash-completion/completions/hexgen\n\
            \x20 hexgen completions zsh  > ~/.zfunc/_hexgen\n\
            \x20 hexgen completions fish > ~/.config/fish/completions/hexgen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared overrides ──────────────────────────────────────────────────────────

/// Manifest overrides accepted by every command that reads specs.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Directory with one spec document per service.
    #[arg(short = 's', long = "specs", value_name = "DIR", help = "Spec directory")]
    pub specs: Option<PathBuf>,

    /// Base Java package for the generated project.
    #[arg(
        short = 'p',
        long = "base-package",
        value_name = "PACKAGE",
        help = "Base package, e.g. com.example.users"
    )]
    pub base_package: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `hexgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Parent directory of the generated project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (project lands in <DIR>/<project name>)"
    )]
    pub output: Option<PathBuf>,

    /// Directory with `<name>.j2` files replacing embedded templates.
    #[arg(long = "templates", value_name = "DIR", help = "Template override directory")]
    pub templates: Option<PathBuf>,

    /// Preview the entity plan without writing any files.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,
}

// ── entities ──────────────────────────────────────────────────────────────────

/// Arguments for `hexgen entities`.
#[derive(Debug, Args)]
pub struct EntitiesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Also print the path of every per-entity artifact.
    #[arg(long = "paths", help = "Show artifact paths")]
    pub paths: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `hexgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the manifest.
    #[arg(
        long = "path",
        value_name = "FILE",
        default_value = "hexgen.toml",
        help = "Manifest path"
    )]
    pub path: PathBuf,

    /// Overwrite an existing manifest.
    #[arg(short = 'f', long = "force", help = "Overwrite existing manifest")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hexgen completions`.
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

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_overrides() {
        let cli = Cli::parse_from([
            "hexgen",
            "generate",
            "--specs",
            "api",
            "-o",
            "out",
            "--base-package",
            "com.acme.users",
            "--dry-run",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.source.specs, Some(PathBuf::from("api")));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(args.source.base_package.as_deref(), Some("com.acme.users"));
        assert!(args.dry_run);
    }

    #[test]
    fn gen_alias() {
        let cli = Cli::parse_from(["hexgen", "gen"]);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn init_defaults_to_local_manifest() {
        let cli = Cli::parse_from(["hexgen", "init"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.path, PathBuf::from("hexgen.toml"));
        assert!(!args.force);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["hexgen", "entities", "-vv", "--output-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["hexgen", "--quiet", "--verbose", "entities"]);
        assert!(result.is_err());
    }
}
