//! List command implementation.
//!
//! The `chatbot-cli list` command prints the registered components.

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::registry::{ComponentDescriptor, Registry};
use crate::ui::{should_use_colors, ChatbotTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }
}

/// Print one line per component, names aligned.
pub(crate) fn print_components(ui: &mut dyn UserInterface, components: &[&ComponentDescriptor]) {
    let theme = if should_use_colors() {
        ChatbotTheme::new()
    } else {
        ChatbotTheme::plain()
    };
    let width = components.iter().map(|c| c.name.len()).max().unwrap_or(0);

    for component in components {
        ui.message(&format!(
            "  {:<width$}  {}",
            component.name,
            theme.dim.apply_to(&component.description),
            width = width
        ));
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = Registry::builtin()?;
        let components = registry.list_all();

        if self.args.json {
            let json = serde_json::to_string_pretty(&components).map_err(anyhow::Error::from)?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.message("Available components:");
        print_components(ui, &components);

        Ok(CommandResult::success())
    }
}
