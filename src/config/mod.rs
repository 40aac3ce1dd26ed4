//! Project configuration and host project metadata.
//!
//! - [`project`] - the `chatbot-cli.json` written by `init`
//! - [`manifest`] - the host project's `package.json`
//!
//! # Example
//!
//! ```
//! use chatbot_cli::config::ProjectConfig;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! ProjectConfig::default().save(temp.path()).unwrap();
//!
//! let config = ProjectConfig::load(temp.path()).unwrap();
//! assert_eq!(config.components_path, "src/components");
//! ```

pub mod manifest;
pub mod project;

pub use manifest::{PackageManifest, MANIFEST_FILE};
pub use project::{
    ProjectConfig, CONFIG_FILE, DEFAULT_COMPONENTS_PATH, DEFAULT_HOOKS_PATH,
    DEFAULT_PROVIDERS_PATH,
};
