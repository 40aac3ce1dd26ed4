//! Project configuration (`chatbot-cli.json`).

use crate::error::{Result, ScaffoldError};
use crate::registry::Role;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name, relative to the project root.
pub const CONFIG_FILE: &str = "chatbot-cli.json";

pub const DEFAULT_COMPONENTS_PATH: &str = "src/components";
pub const DEFAULT_HOOKS_PATH: &str = "src/hooks";
pub const DEFAULT_PROVIDERS_PATH: &str = "src/providers";

fn default_components_path() -> String {
    DEFAULT_COMPONENTS_PATH.to_string()
}

fn default_hooks_path() -> String {
    DEFAULT_HOOKS_PATH.to_string()
}

fn default_providers_path() -> String {
    DEFAULT_PROVIDERS_PATH.to_string()
}

fn default_typescript() -> bool {
    true
}

/// Where installed files go and which language they are written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default = "default_components_path")]
    pub components_path: String,

    #[serde(default = "default_hooks_path")]
    pub hooks_path: String,

    #[serde(default = "default_providers_path")]
    pub providers_path: String,

    /// Keep TypeScript sources instead of downgrading to JavaScript.
    #[serde(default = "default_typescript")]
    pub typescript: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            components_path: default_components_path(),
            hooks_path: default_hooks_path(),
            providers_path: default_providers_path(),
            typescript: default_typescript(),
        }
    }
}

impl ProjectConfig {
    /// Defaults for `project_root`: TypeScript iff `tsconfig.json` exists.
    pub fn detect(project_root: &Path) -> Self {
        Self {
            typescript: project_root.join("tsconfig.json").exists(),
            ..Self::default()
        }
    }

    /// Path of the config file under `project_root`.
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }

    /// Whether a config file exists under `project_root`.
    pub fn exists(project_root: &Path) -> bool {
        Self::path(project_root).exists()
    }

    /// Load the config from `project_root`.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path(project_root);
        if !path.exists() {
            return Err(ScaffoldError::ConfigNotFound { path });
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| ScaffoldError::ConfigParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Write the config to `project_root`, returning the written path.
    pub fn save(&self, project_root: &Path) -> Result<PathBuf> {
        let path = Self::path(project_root);
        let json = serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?;
        fs::write(&path, format!("{}\n", json))?;
        Ok(path)
    }

    /// Configured base directory for `role`, relative to the project root.
    pub fn base_dir(&self, role: Role) -> &str {
        match role {
            Role::Component => &self.components_path,
            Role::Hook => &self.hooks_path,
            Role::Provider => &self.providers_path,
        }
    }
}
