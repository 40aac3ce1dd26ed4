//! Usage snippet rendering.

use crate::registry::builtin;

/// Placeholder replaced with the output extension.
const EXT_PLACEHOLDER: &str = "{{ext}}";

/// Usage example for `name`, falling back to the generic snippet.
pub fn render_usage(name: &str, typescript: bool) -> String {
    let snippet = builtin::usage_snippet(name).unwrap_or_else(builtin::default_usage_snippet);
    let ext = if typescript { "tsx" } else { "jsx" };
    snippet.replace(EXT_PLACEHOLDER, ext).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_usage_uses_extension() {
        let tsx = render_usage("openai", true);
        assert!(tsx.starts_with("// App.tsx"));
        assert!(!tsx.contains(EXT_PLACEHOLDER));

        let jsx = render_usage("openai", false);
        assert!(jsx.starts_with("// App.jsx"));
    }

    #[test]
    fn unknown_component_gets_default_snippet() {
        let usage = render_usage("something-else", true);
        assert!(usage.contains("<Chatbot />"));
    }
}
