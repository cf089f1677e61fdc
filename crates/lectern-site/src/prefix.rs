//! Site-root prefix computation.

use std::path::Path;

/// Folder name whose documents are compiled as site-wide error pages.
const ERROR_FOLDER: &str = "error";

/// Relative path from a compiled page back to the site root.
///
/// `rel_path` is the source file's path relative to the source root. Error
/// pages can be served from any URL depth, so they get the absolute root
/// prefix instead of a depth-based one.
pub fn site_prefix(rel_path: &Path) -> String {
    let parent = rel_path.parent().unwrap_or_else(|| Path::new(""));
    if parent.file_name().is_some_and(|name| name == ERROR_FOLDER) {
        return "/".to_owned();
    }
    "../".repeat(parent.components().count())
}
