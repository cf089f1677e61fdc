//! Document rendering through pulldown-cmark.

use std::path::PathBuf;

use pulldown_cmark::{Options, Parser, html};

use crate::error::RenderError;
use crate::include::{IncludeExpander, ReadFileFn};
use crate::preprocess::preprocess;

/// Per-document rendering context.
pub struct RenderContext<'a> {
    /// Directory of the source file; include paths resolve against it.
    pub base_dir: PathBuf,
    /// Override for reading included files (tests, non-fs sources).
    pub read_file: Option<&'a ReadFileFn>,
}

impl RenderContext<'_> {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            read_file: None,
        }
    }
}

/// Rendered document.
#[derive(Debug)]
pub struct Rendered {
    /// HTML produced by the markdown engine, directive fragments included.
    pub html: String,
    /// Non-fatal notes collected along the way (degraded directives, etc.).
    pub warnings: Vec<String>,
}

/// Markdown engine options: GFM tables, strikethrough, and task lists.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render a source document to HTML.
///
/// Expands includes, preprocesses directive fences, then runs the markdown
/// engine over the result.
pub fn render_document(source: &str, ctx: &RenderContext<'_>) -> Result<Rendered, RenderError> {
    let expander = match ctx.read_file {
        Some(read_file) => IncludeExpander::new(&ctx.base_dir).with_read_file(read_file),
        None => IncludeExpander::new(&ctx.base_dir),
    };
    let expanded = expander.expand(source)?;
    let preprocessed = preprocess(&expanded);

    let parser = Parser::new_ext(&preprocessed.text, parser_options());
    let mut out = String::with_capacity(preprocessed.text.len() * 2);
    html::push_html(&mut out, parser);

    Ok(Rendered {
        html: out,
        warnings: preprocessed.warnings,
    })
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
