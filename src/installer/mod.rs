//! Writes assembled templates into a project.
//!
//! Each [`TemplateFile`] lands under the base directory configured for its
//! role (`componentsPath`, `hooksPath`, `providersPath`), joined with the
//! file's folder-prefixed relative path.

use crate::config::{PackageManifest, ProjectConfig};
use crate::error::Result;
use crate::template::{Template, TemplateFile};
use anyhow::anyhow;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// One planned write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Absolute destination.
    pub destination: PathBuf,
    /// Whether something already exists there.
    pub exists: bool,
}

/// Outcome of [`Installer::install`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub written: Vec<PathBuf>,
    /// Existing files left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Installs templates under a project root.
pub struct Installer {
    project_root: PathBuf,
    config: ProjectConfig,
}

impl Installer {
    pub fn new(project_root: &Path, config: &ProjectConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.clone(),
        }
    }

    /// Absolute destination of `file`.
    pub fn destination(&self, file: &TemplateFile) -> Result<PathBuf> {
        let relative = Path::new(&file.path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if file.path.is_empty() || escapes {
            return Err(anyhow!("Refusing to install outside the project: {}", file.path).into());
        }

        Ok(self
            .project_root
            .join(self.config.base_dir(file.role))
            .join(relative))
    }

    /// Where every file of `template` would go.
    pub fn plan(&self, template: &Template) -> Result<Vec<PlannedFile>> {
        template
            .files
            .iter()
            .map(|file| {
                let destination = self.destination(file)?;
                Ok(PlannedFile {
                    exists: destination.exists(),
                    destination,
                })
            })
            .collect()
    }

    /// Write `template`, creating directories as needed.
    ///
    /// Every destination is validated before the first write. Existing
    /// files are skipped unless `overwrite`.
    pub fn install(&self, template: &Template, overwrite: bool) -> Result<InstallReport> {
        let plan = self.plan(template)?;
        let mut report = InstallReport::default();

        for (file, PlannedFile { destination, exists }) in template.files.iter().zip(plan) {
            if exists && !overwrite {
                tracing::info!("Skipping existing {}", destination.display());
                report.skipped.push(destination);
                continue;
            }

            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&destination, &file.content)?;
            tracing::debug!("Wrote {}", destination.display());
            report.written.push(destination);
        }

        Ok(report)
    }

    /// Dependencies of `template` not declared in `package.json`.
    ///
    /// Without a readable manifest every dependency is reported.
    pub fn missing_dependencies(&self, template: &Template) -> Vec<String> {
        match PackageManifest::load(&self.project_root) {
            Ok(manifest) => manifest.missing_dependencies(&template.dependencies),
            Err(e) => {
                tracing::debug!("No usable package.json: {}", e);
                template.dependencies.clone()
            }
        }
    }

    /// Path relative to the project root, for display.
    pub fn display_path<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.project_root).unwrap_or(path)
    }
}
