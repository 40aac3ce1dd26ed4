//! Add command implementation.
//!
//! The `chatbot-cli add <component>` command fetches a component, converts
//! it to the project's language and installs it.

use std::path::{Path, PathBuf};

use crate::cli::args::AddArgs;
use crate::config::{ProjectConfig, CONFIG_FILE};
use crate::error::{Result, ScaffoldError};
use crate::installer::Installer;
use crate::registry::Registry;
use crate::remote::ContentFetcher;
use crate::template::{Assembler, Template};
use crate::transform::{DowngradeMode, TextualDowngrade};
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::list::print_components;

/// The add command implementation.
pub struct AddCommand {
    project_root: PathBuf,
    args: AddArgs,
    fetcher: Option<ContentFetcher>,
}

impl AddCommand {
    pub fn new(project_root: &Path, args: AddArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            fetcher: None,
        }
    }

    /// Use a preconfigured fetcher instead of one built from the environment.
    pub fn with_fetcher(mut self, fetcher: ContentFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Component named on the command line, or chosen from a prompt.
    fn choose_component(
        &self,
        registry: &Registry,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<String>> {
        if let Some(id) = &self.args.component {
            return Ok(Some(id.clone()));
        }
        if self.args.non_interactive || !ui.is_interactive() {
            return Ok(None);
        }

        let options = registry
            .list_all()
            .into_iter()
            .map(|c| PromptOption {
                label: format!("{} - {}", c.name, c.description),
                value: c.name.clone(),
            })
            .collect();
        let answer = ui.prompt(&Prompt {
            key: "component".to_string(),
            question: "Which component do you want to add?".to_string(),
            prompt_type: PromptType::Select { options },
            default: None,
        })?;

        Ok(Some(answer.as_string()))
    }

    fn report(&self, ui: &mut dyn UserInterface, installer: &Installer, template: &Template) {
        let missing = installer.missing_dependencies(template);
        if !missing.is_empty() {
            ui.message("");
            ui.message("Install the missing dependencies:");
            ui.show_hint(&format!("npm install {}", missing.join(" ")));
        }

        if !template.env_vars.is_empty() {
            ui.message("");
            ui.message("Set one of these environment variables:");
            for var in &template.env_vars {
                ui.message(&format!("  {}", var));
            }
        }

        ui.message("");
        ui.message("Usage:");
        ui.message(&template.usage);
    }

    fn install(
        &self,
        ui: &mut dyn UserInterface,
        installer: &Installer,
        template: &Template,
    ) -> Result<()> {
        if self.args.dry_run {
            ui.message("Dry run, nothing written:");
            for planned in installer.plan(template)? {
                let path = installer.display_path(&planned.destination).display();
                if planned.exists && !self.args.force {
                    ui.message(&format!("  skip   {} (exists)", path));
                } else {
                    ui.message(&format!("  write  {}", path));
                }
            }
            return Ok(());
        }

        let report = installer.install(template, self.args.force)?;
        for path in &report.written {
            ui.success(&format!("Created {}", installer.display_path(path).display()));
        }
        for path in &report.skipped {
            ui.warning(&format!(
                "Skipped {} (already exists)",
                installer.display_path(path).display()
            ));
        }
        if !report.skipped.is_empty() {
            ui.show_hint("Use --force to overwrite existing files.");
        }

        Ok(())
    }
}

impl Command for AddCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = Registry::builtin()?;

        let id = match self.choose_component(&registry, ui)? {
            Some(id) => id,
            None => {
                ui.error("No component given.");
                ui.message("Available components:");
                print_components(ui, &registry.list_all());
                return Ok(CommandResult::failure(1));
            }
        };

        if registry.lookup(&id).is_none() {
            ui.error(&ScaffoldError::UnknownComponent { id }.to_string());
            ui.message("Available components:");
            print_components(ui, &registry.list_all());
            return Ok(CommandResult::failure(1));
        }

        let config = match ProjectConfig::load(&self.project_root) {
            Ok(c) => c,
            Err(ScaffoldError::ConfigNotFound { .. }) => {
                ui.error(&format!("{} not found.", CONFIG_FILE));
                ui.show_hint("Run 'chatbot-cli init' first.");
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let env_fetcher;
        let fetcher = match &self.fetcher {
            Some(f) => f,
            None => {
                env_fetcher = ContentFetcher::from_env()?;
                &env_fetcher
            }
        };

        let mode = if self.args.strict {
            DowngradeMode::Strict
        } else {
            DowngradeMode::Lenient
        };
        let assembler = Assembler::new(&registry, fetcher)
            .with_owner(self.args.owner.clone())
            .with_downgrade(Box::new(TextualDowngrade::new(mode)));

        let mut spinner = ui.start_spinner(&format!("Fetching {}...", id));
        let template = match assembler.assemble(&id, config.typescript) {
            Ok(t) => {
                spinner.finish_success(&format!("Fetched {}", id));
                t
            }
            Err(e) => {
                spinner.finish_error(&format!("Could not add {}", id));
                ui.error(&e.to_string());
                if matches!(e, ScaffoldError::AmbiguousSyntax { .. }) {
                    ui.show_hint("Re-run without --strict, or set \"typescript\": true.");
                } else if e.is_fetch_failure() {
                    ui.show_hint("Check --owner / GITHUB_OWNER and your network connection.");
                }
                return Ok(CommandResult::failure(1));
            }
        };

        if ui.output_mode().shows_details() {
            for file in &template.files {
                ui.message(&format!("  {:<9} {}", file.role, file.path));
            }
        }

        let installer = Installer::new(&self.project_root, &config);
        self.install(ui, &installer, &template)?;
        self.report(ui, &installer, &template);

        Ok(CommandResult::success())
    }
}
