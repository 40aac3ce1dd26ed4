//! TypeScript to JavaScript downgrade.
//!
//! The assembler only talks to the [`SyntaxDowngrade`] trait, so the
//! textual implementation in [`textual`] can be swapped for a parser-backed
//! one without touching assembly.

pub mod textual;

pub use textual::{DowngradeMode, TextualDowngrade};

use crate::error::Result;
use crate::remote::RemoteFile;

/// Strips type syntax from one file's content.
pub trait SyntaxDowngrade {
    /// Return `content` with type syntax removed.
    ///
    /// `path` is used for diagnostics only.
    fn downgrade(&self, path: &str, content: &str) -> Result<String>;
}

/// Whether `path` names typed source (`.ts` / `.tsx`).
pub fn is_typed_path(path: &str) -> bool {
    path.ends_with(".tsx") || path.ends_with(".ts")
}

/// Map a typed extension to its untyped counterpart.
///
/// `.tsx` becomes `.jsx`, `.ts` becomes `.js`; everything else, and every
/// path when `keep_types` is set, is returned unchanged.
pub fn rename_extension(path: &str, keep_types: bool) -> String {
    if keep_types {
        return path.to_string();
    }

    if let Some(stem) = path.strip_suffix(".tsx") {
        format!("{}.jsx", stem)
    } else if let Some(stem) = path.strip_suffix(".ts") {
        format!("{}.js", stem)
    } else {
        path.to_string()
    }
}

/// Produce the output form of a fetched file.
///
/// Typed files are downgraded and renamed unless `keep_types`; everything
/// else is passed through.
pub fn convert_file(
    downgrade: &dyn SyntaxDowngrade,
    file: &RemoteFile,
    keep_types: bool,
) -> Result<RemoteFile> {
    if keep_types || !is_typed_path(&file.path) {
        return Ok(file.clone());
    }

    Ok(RemoteFile {
        path: rename_extension(&file.path, false),
        content: downgrade.downgrade(&file.path, &file.content)?,
    })
}
