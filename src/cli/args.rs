//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// chatbot-cli - Add ready-made chatbot components to a React project.
#[derive(Debug, Parser)]
#[command(name = "chatbot-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write chatbot-cli.json for this project
    Init(InitArgs),

    /// Fetch a component and install it into the project
    Add(AddArgs),

    /// List available components
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Directory for components (default: src/components)
    #[arg(long, value_name = "DIR")]
    pub components_path: Option<String>,

    /// Directory for hooks (default: src/hooks)
    #[arg(long, value_name = "DIR")]
    pub hooks_path: Option<String>,

    /// Directory for providers (default: src/providers)
    #[arg(long, value_name = "DIR")]
    pub providers_path: Option<String>,

    /// Keep TypeScript sources
    #[arg(long, conflicts_with = "javascript")]
    pub typescript: bool,

    /// Convert sources to JavaScript
    #[arg(long)]
    pub javascript: bool,

    /// Use defaults, no prompts
    #[arg(long)]
    pub non_interactive: bool,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Language chosen on the command line, if any.
    pub fn typescript_flag(&self) -> Option<bool> {
        match (self.typescript, self.javascript) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Component to add (prompted for when omitted)
    pub component: Option<String>,

    /// Repository owner to fetch from (overrides GITHUB_OWNER)
    #[arg(long, value_name = "NAME")]
    pub owner: Option<String>,

    /// Fail instead of guessing when type stripping is ambiguous
    #[arg(long)]
    pub strict: bool,

    /// Show what would be written without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite files that already exist
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
