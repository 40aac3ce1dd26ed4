//! Built-in registry data embedded at compile time.

use include_dir::{include_dir, Dir};

use crate::error::{Result, ScaffoldError};

/// Embedded `templates/` directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Path of the registry document inside the embedded directory.
pub const REGISTRY_FILE: &str = "registry.yml";

/// Raw text of an embedded file.
fn embedded_text(path: &str) -> Option<&'static str> {
    TEMPLATES_DIR.get_file(path).and_then(|f| f.contents_utf8())
}

/// The embedded registry document.
pub fn registry_source() -> Result<&'static str> {
    let file = TEMPLATES_DIR
        .get_file(REGISTRY_FILE)
        .ok_or_else(|| ScaffoldError::ConfigNotFound {
            path: format!("templates/{}", REGISTRY_FILE).into(),
        })?;

    file.contents_utf8()
        .ok_or_else(|| ScaffoldError::ConfigParseError {
            path: format!("templates/{}", REGISTRY_FILE).into(),
            message: "Invalid UTF-8".to_string(),
        })
}

/// Usage snippet for a component, if one is embedded.
pub fn usage_snippet(name: &str) -> Option<&'static str> {
    embedded_text(&format!("usage/{}.txt", name))
}

/// Fallback usage snippet.
pub fn default_usage_snippet() -> &'static str {
    embedded_text("usage/default.txt").unwrap_or_default()
}
