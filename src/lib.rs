//! chatbot-cli - scaffold chatbot components into React projects.
//!
//! Components live in public repositories. `chatbot-cli add` resolves a
//! component through the built-in registry, fetches its files through the
//! repository contents API, optionally strips TypeScript syntax, and writes
//! the result into the directories named in `chatbot-cli.json`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Project configuration and `package.json` inspection
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Writing assembled templates to disk
//! - [`registry`] - Built-in component registry
//! - [`remote`] - HTTP retrieval and repository content fetching
//! - [`template`] - Template assembly and file classification
//! - [`transform`] - TypeScript to JavaScript downgrade
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use chatbot_cli::registry::Registry;
//! use chatbot_cli::transform::rename_extension;
//!
//! let registry = Registry::builtin().unwrap();
//! let openai = registry.lookup("openai").unwrap();
//! assert_eq!(rename_extension(&openai.paths.component, false), "components/Chatbot.jsx");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod registry;
pub mod remote;
pub mod template;
pub mod transform;
pub mod ui;

pub use error::{Result, ScaffoldError};
