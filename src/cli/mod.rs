//! Command-line interface for chatbot-cli.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AddArgs, Cli, Commands, CompletionsArgs, InitArgs, ListArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
