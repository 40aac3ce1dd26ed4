//! Init command implementation.
//!
//! The `chatbot-cli init` command writes `chatbot-cli.json`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{PackageManifest, ProjectConfig, CONFIG_FILE};
use crate::error::{Result, ScaffoldError};
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Resolve every setting from flags, prompts, then detected defaults.
    fn gather(&self, ui: &mut dyn UserInterface) -> Result<ProjectConfig> {
        let detected = ProjectConfig::detect(&self.project_root);
        let ask = !self.args.non_interactive;

        let components_path = match &self.args.components_path {
            Some(path) => path.clone(),
            None if ask => ui
                .prompt(&Prompt::input(
                    "components_path",
                    "Where should components be installed?",
                    &detected.components_path,
                ))?
                .as_string(),
            None => detected.components_path.clone(),
        };

        let typescript = match self.args.typescript_flag() {
            Some(ts) => ts,
            None if ask => ui
                .prompt(&Prompt::confirm(
                    "typescript",
                    "Use TypeScript?",
                    detected.typescript,
                ))?
                .as_bool(),
            None => detected.typescript,
        };

        Ok(ProjectConfig {
            components_path,
            hooks_path: self
                .args
                .hooks_path
                .clone()
                .unwrap_or(detected.hooks_path),
            providers_path: self
                .args
                .providers_path
                .clone()
                .unwrap_or(detected.providers_path),
            typescript,
        })
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if ProjectConfig::exists(&self.project_root) && !self.args.force {
            if self.args.non_interactive || !ui.is_interactive() {
                ui.warning(&format!("{} already exists.", CONFIG_FILE));
                ui.show_hint("Use --force to overwrite it.");
                return Ok(CommandResult::failure(1));
            }

            let overwrite = ui
                .prompt(&Prompt::confirm(
                    "overwrite",
                    &format!("{} already exists. Overwrite?", CONFIG_FILE),
                    false,
                ))?
                .as_bool();
            if !overwrite {
                ui.message("Initialization cancelled.");
                return Ok(CommandResult::success());
            }
        }

        let manifest = match PackageManifest::load(&self.project_root) {
            Ok(m) => m,
            Err(ScaffoldError::ConfigNotFound { .. }) => {
                ui.error("No package.json found. Run this command in your React project root.");
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if !manifest.has_dependency("react") {
            ui.warning("React is not listed in package.json dependencies.");
        }

        ui.show_header("chatbot-cli init");
        let config = self.gather(ui)?;

        config.save(&self.project_root)?;
        fs::create_dir_all(self.project_root.join(&config.components_path))?;
        tracing::debug!("Saved {:?}", config);

        ui.success(&format!("Created {}", CONFIG_FILE));
        ui.message(&format!("  Components: {}", config.components_path));
        ui.message(&format!("  Hooks:      {}", config.hooks_path));
        ui.message(&format!("  Providers:  {}", config.providers_path));
        ui.message(&format!(
            "  Language:   {}",
            if config.typescript {
                "TypeScript"
            } else {
                "JavaScript"
            }
        ));
        ui.show_hint("Next: chatbot-cli add openai");

        Ok(CommandResult::success())
    }
}
