//! Host project `package.json`.

use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` we read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(MANIFEST_FILE)
    }

    /// Read `package.json` from `project_root`.
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

    /// Whether `name` is a dependency or dev dependency.
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    /// Names from `wanted` not yet declared, in the given order.
    pub fn missing_dependencies(&self, wanted: &[String]) -> Vec<String> {
        wanted
            .iter()
            .filter(|name| !self.has_dependency(name))
            .cloned()
            .collect()
    }
}
