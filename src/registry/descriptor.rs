//! Component descriptor types.

use serde::{Deserialize, Serialize};

/// Destination category for an installed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// UI components (`componentsPath`).
    Component,
    /// React hooks (`hooksPath`).
    Hook,
    /// Context providers (`providersPath`).
    Provider,
}

impl Role {
    /// Lowercase name as used in config and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Hook => "hook",
            Self::Provider => "provider",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Repository paths of a component, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePaths {
    /// Component code; always present.
    pub component: String,
    /// Hook code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    /// Provider code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl SourcePaths {
    /// Declared paths in fetch order: component, hook, provider.
    pub fn groups(&self) -> Vec<(Role, &str)> {
        let mut groups = vec![(Role::Component, self.component.as_str())];
        if let Some(hook) = &self.hook {
            groups.push((Role::Hook, hook.as_str()));
        }
        if let Some(provider) = &self.provider {
            groups.push((Role::Provider, provider.as_str()));
        }
        groups
    }
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_folder() -> String {
    "Chatbot".to_string()
}

/// A registered component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Identifier used on the command line.
    pub name: String,
    /// Pinned repository owner; wins over every override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Folder the files are installed under, inside each category directory.
    #[serde(default = "default_folder")]
    pub folder: String,
    pub paths: SourcePaths,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub env_vars: Vec<String>,
    #[serde(default)]
    pub description: String,
}
