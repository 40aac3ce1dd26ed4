//! Installable templates.
//!
//! A [`Template`] is the output of [`Assembler::assemble`]: the files to
//! write (each tagged with its destination [`Role`]), the npm packages the
//! component needs, the environment variables it reads, and a usage example.

pub mod assembler;
pub mod classify;
pub mod usage;

pub use assembler::{resolve_owner, Assembler, DEFAULT_OWNER, OWNER_ENV_VAR};
pub use classify::classify_path;
pub use usage::render_usage;

use crate::registry::Role;

/// One file ready for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the role's base directory, folder-prefixed.
    pub path: String,
    pub content: String,
    pub role: Role,
}

/// A fully assembled component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Component identifier.
    pub name: String,
    pub files: Vec<TemplateFile>,
    pub dependencies: Vec<String>,
    pub env_vars: Vec<String>,
    pub usage: String,
}

impl Template {
    /// Files destined for `role`, in assembly order.
    pub fn files_for(&self, role: Role) -> impl Iterator<Item = &TemplateFile> {
        self.files.iter().filter(move |f| f.role == role)
    }
}
