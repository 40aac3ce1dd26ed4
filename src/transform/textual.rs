//! Regex-driven type stripping.
//!
//! This is a textual rewrite, not a parser. It handles the shapes that show
//! up in typical React components and hooks and can mangle unusual source
//! (nested generics, object literals that look like annotations). Use
//! [`TextualDowngrade::strict`] to refuse such input instead of guessing.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::SyntaxDowngrade;
use crate::error::{Result, ScaffoldError};

static INTERFACE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:export[ \t]+)?interface[ \t]+\w+(?:<[^>{}]*>)?(?:[ \t]+extends[ \t]+[\w., \t<>]+?)?\s*\{[^}]*\}[ \t]*;?",
    )
    .expect("INTERFACE_BLOCK must compile")
});

static TYPE_ALIAS_SIMPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:export[ \t]+)?type[ \t]+\w+(?:<[^>]*>)?[ \t]*=[^;{}]*;[ \t]*\n?")
        .expect("TYPE_ALIAS_SIMPLE must compile")
});

static TYPE_ALIAS_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:export[ \t]+)?type[ \t]+\w+(?:<[^>]*>)?[ \t]*=\s*\{[^{}]*\}[ \t]*;?[ \t]*\n?")
        .expect("TYPE_ALIAS_OBJECT must compile")
});

static IMPORT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import[ \t]+type[ \t][^;'"]*['"][^'"\n]*['"][ \t]*;?[ \t]*\n?"#)
        .expect("IMPORT_TYPE must compile")
});

static PARAM_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+|[}\]])\??:[ \t]*[\w<>\[\]|& \t]+?(\s*[,)])")
        .expect("PARAM_ANNOTATION must compile")
});

static RETURN_BEFORE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\):[ \t]*[\w<>\[\]|& \t]+?(\s*\{)").expect("RETURN_BEFORE_BLOCK must compile")
});

static RETURN_BEFORE_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\):[ \t]*[\w<>\[\]|& \t]+?(\s*=>)").expect("RETURN_BEFORE_ARROW must compile")
});

static GENERIC_ARGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w)<[\w\s,<>\[\]|&]+>").expect("GENERIC_ARGS must compile")
});

static AS_CAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]+as[ \t]+[\w<>\[\]|&]+(?:[ \t]*[|&][ \t]*[\w<>\[\]]+)*")
        .expect("AS_CAST must compile")
});

static IMPORT_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\b[^;'"]*?['"][^'"\n]*['"]"#).expect("IMPORT_SPAN must compile")
});

static EXPORT_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bexport[ \t]*(?:\*|\{[^}]*\})[^;'"\n]*(?:['"][^'"\n]*['"])?"#)
        .expect("EXPORT_SPAN must compile")
});

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").expect("BLANK_RUNS must compile"));

/// Constructs the textual pass cannot rewrite reliably, checked in strict mode.
static AMBIGUOUS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\w<[^<>\n]*<", "nested generic parameters"),
        (
            r"interface[ \t]+\w+[^{]*\{[^}]*\{",
            "interface body with nested braces",
        ),
        (
            r"type[ \t]+\w+(?:<[^>]*>)?[ \t]*=\s*\{[^}]*\{",
            "type alias with nested object type",
        ),
        (
            r"\([ \t]*\n[ \t]*\w+\??:[ \t]*[\w<\[{]",
            "parameter list with annotations spanning lines",
        ),
        (
            r"\w+:[ \t]*(?:\d|true\b|false\b|null\b|undefined\b)[\w.]*[ \t]*[,)]",
            "property value indistinguishable from a type annotation",
        ),
    ]
    .into_iter()
    .map(|(pattern, construct)| {
        (
            Regex::new(pattern).expect("ambiguity pattern must compile"),
            construct,
        )
    })
    .collect()
});

/// Whether ambiguous constructs are rewritten anyway or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DowngradeMode {
    /// Rewrite everything, best effort.
    #[default]
    Lenient,
    /// Fail with [`ScaffoldError::AmbiguousSyntax`] on risky input.
    Strict,
}

/// Textual TypeScript to JavaScript rewrite.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextualDowngrade {
    mode: DowngradeMode,
}

impl TextualDowngrade {
    pub fn new(mode: DowngradeMode) -> Self {
        Self { mode }
    }

    pub fn lenient() -> Self {
        Self::new(DowngradeMode::Lenient)
    }

    pub fn strict() -> Self {
        Self::new(DowngradeMode::Strict)
    }

    /// Run the rewrite without ambiguity checks.
    ///
    /// Passes repeat until the text stops changing. Every rewrite removes
    /// text, so this terminates.
    pub fn strip(content: &str) -> String {
        let mut current = single_pass(content);
        loop {
            let next = single_pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// First ambiguous construct in `content` as (line, description).
    pub fn find_ambiguity(content: &str) -> Option<(usize, &'static str)> {
        AMBIGUOUS
            .iter()
            .filter_map(|(re, construct)| re.find(content).map(|m| (m.start(), *construct)))
            .min_by_key(|(offset, _)| *offset)
            .map(|(offset, construct)| (line_of(content, offset), construct))
    }
}

impl SyntaxDowngrade for TextualDowngrade {
    fn downgrade(&self, path: &str, content: &str) -> Result<String> {
        if self.mode == DowngradeMode::Strict {
            if let Some((line, construct)) = Self::find_ambiguity(content) {
                return Err(ScaffoldError::AmbiguousSyntax {
                    path: path.to_string(),
                    line,
                    construct: construct.to_string(),
                });
            }
        }
        Ok(Self::strip(content))
    }
}

fn single_pass(content: &str) -> String {
    // (1) declarations
    let s = INTERFACE_BLOCK.replace_all(content, "");
    let s = TYPE_ALIAS_OBJECT.replace_all(&s, "");
    let s = TYPE_ALIAS_SIMPLE.replace_all(&s, "");
    let s = IMPORT_TYPE.replace_all(&s, "");
    // (2) parameter and field annotations
    let s = PARAM_ANNOTATION.replace_all(&s, "$1$2");
    // (3) return types
    let s = RETURN_BEFORE_BLOCK.replace_all(&s, ")$1");
    let s = RETURN_BEFORE_ARROW.replace_all(&s, ")$1");
    // (4) generic arguments
    let s = GENERIC_ARGS.replace_all(&s, "$1");
    // (5) casts
    let s = strip_casts(&s);
    // (6) blank line runs, (7) trim
    let s = BLANK_RUNS.replace_all(&s, "\n\n");
    s.trim().to_string()
}

/// Remove `as Type` casts outside import/export clauses.
fn strip_casts(src: &str) -> String {
    let protected: Vec<Range<usize>> = IMPORT_SPAN
        .find_iter(src)
        .chain(EXPORT_SPAN.find_iter(src))
        .map(|m| m.range())
        .collect();

    let mut out = String::with_capacity(src.len());
    let mut last = 0;
    for m in AS_CAST.find_iter(src) {
        if protected.iter().any(|r| r.contains(&m.start())) {
            continue;
        }
        out.push_str(&src[last..m.start()]);
        last = m.end();
    }
    out.push_str(&src[last..]);
    out
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
