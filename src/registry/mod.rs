//! Component registry.
//!
//! The registry maps component identifiers to [`ComponentDescriptor`]s.
//! The built-in set is embedded in the binary from `templates/registry.yml`
//! and is read-only for the life of the process.
//!
//! # Example
//!
//! ```
//! use chatbot_cli::registry::Registry;
//!
//! let registry = Registry::builtin().unwrap();
//! let openai = registry.lookup("openai").unwrap();
//! assert_eq!(openai.repo, "react-chatbot-openai");
//! ```

pub mod builtin;
pub mod descriptor;

pub use descriptor::{ComponentDescriptor, Role, SourcePaths};

use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

/// On-disk shape of a registry document.
#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[allow(dead_code)]
    #[serde(default)]
    version: u32,
    #[serde(default)]
    components: Vec<ComponentDescriptor>,
}

/// Immutable mapping from identifier to component descriptor.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    components: BTreeMap<String, ComponentDescriptor>,
}

impl Registry {
    /// Load the registry embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(builtin::registry_source()?)
    }

    /// Parse and validate a registry document.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let document: RegistryDocument =
            serde_yaml::from_str(source).map_err(|e| ScaffoldError::ConfigParseError {
                path: builtin::REGISTRY_FILE.into(),
                message: e.to_string(),
            })?;

        Self::from_descriptors(document.components)
    }

    /// Build a registry from descriptors, rejecting inconsistent entries.
    pub fn from_descriptors(descriptors: Vec<ComponentDescriptor>) -> Result<Self> {
        let mut components = BTreeMap::new();

        for descriptor in descriptors {
            validate(&descriptor)?;
            if components.contains_key(&descriptor.name) {
                return Err(ScaffoldError::InvalidRegistry {
                    message: format!("duplicate component \"{}\"", descriptor.name),
                });
            }
            components.insert(descriptor.name.clone(), descriptor);
        }

        Ok(Self { components })
    }

    /// Descriptor for `id`, or `None` if unregistered.
    pub fn lookup(&self, id: &str) -> Option<&ComponentDescriptor> {
        self.components.get(id)
    }

    /// Every descriptor, sorted by name.
    pub fn list_all(&self) -> Vec<&ComponentDescriptor> {
        self.components.values().collect()
    }

}

fn validate(descriptor: &ComponentDescriptor) -> Result<()> {
    let invalid = |what: &str| ScaffoldError::InvalidRegistry {
        message: format!("component \"{}\": {}", descriptor.name, what),
    };

    if descriptor.name.trim().is_empty() {
        return Err(ScaffoldError::InvalidRegistry {
            message: "component with empty name".to_string(),
        });
    }
    if descriptor.repo.trim().is_empty() {
        return Err(invalid("empty repo"));
    }
    if descriptor.paths.component.trim().is_empty() {
        return Err(invalid("empty component path"));
    }

    let mut seen = HashSet::new();
    for (role, path) in descriptor.paths.groups() {
        if !seen.insert(path) {
            return Err(invalid(&format!("{} path \"{}\" repeats another role", role, path)));
        }
    }

    Ok(())
}
