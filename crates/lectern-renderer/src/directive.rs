//! Fenced block directives.
//!
//! Each directive is one case of [`BlockDirective`]: a fence marker, a
//! parameter validator, and an open/close HTML rendering. The set is fixed
//! and matched exhaustively; there is no registration by name.

use crate::render::escape_html;

/// A custom fenced block type.
///
/// A directive opens on a line starting with its marker (the rest of the
/// line is the parameter string) and closes on a bare marker line at the
/// same nesting level. Fences whose parameters fail [`validate`](Self::validate)
/// are left in the document as ordinary text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockDirective {
    /// Quote-styled note with a title line.
    Warning,
    /// Quote-styled question with a title line.
    Question,
    /// Collapsible answer panel.
    Answer,
    /// Collapsible file listing panel. Requires a caption.
    File,
    /// Collapsible section panel. Requires a caption.
    Section,
    /// Labeled item with a marker column. Requires a caption.
    Item,
    /// Raw slide-timing strip.
    Times,
    /// Slide container.
    Slide,
}

impl BlockDirective {
    /// All directives, in match order.
    pub const ALL: [Self; 8] = [
        Self::Warning,
        Self::Question,
        Self::Answer,
        Self::File,
        Self::Section,
        Self::Item,
        Self::Times,
        Self::Slide,
    ];

    /// The fence token that opens and closes this block.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Warning => "!!!",
            Self::Question => "???",
            Self::Answer => ":::",
            Self::File => "´´´",
            Self::Section => ";;;",
            Self::Item => "|||",
            Self::Times => "///////",
            Self::Slide => "++++++++++++++",
        }
    }

    /// Whether the parameter string is acceptable for this directive.
    ///
    /// Directives that render a caption reject empty parameters; purely
    /// structural directives accept anything and default the title.
    pub fn validate(self, params: &str) -> bool {
        match self {
            Self::File | Self::Section | Self::Item => !params.trim().is_empty(),
            _ => true,
        }
    }

    /// HTML fragment emitted when the block opens.
    pub fn render_open(self, params: &str) -> String {
        let title = normalized_title(params);
        match self {
            Self::Warning => {
                let title = title.unwrap_or_else(|| "Aviso".to_owned());
                format!("<blockquote class=\"warning\">\n<p>{title}</p>\n")
            }
            Self::Question => {
                let title = title.unwrap_or_else(|| "Pergunta".to_owned());
                format!("<blockquote class=\"question\">\n<p>{title}</p>\n")
            }
            Self::Answer => {
                let title = title.unwrap_or_else(|| "Resposta".to_owned());
                format!("<details class=\"answer\">\n<summary>{title}</summary>\n")
            }
            Self::File => {
                let title = title.unwrap_or_default();
                format!("<details class=\"file\">\n<summary>{title}</summary>\n")
            }
            Self::Section => {
                let title = title.unwrap_or_default();
                format!("<details class=\"section\">\n<summary>{title}</summary>\n")
            }
            Self::Item => {
                let title = title.unwrap_or_default();
                format!(
                    "<div class=\"item\">\n<div class=\"item-marker\">\n{title}\n</div>\n<div class=\"item-content\">\n"
                )
            }
            Self::Times => "<pre class=\"times\">\n".to_owned(),
            Self::Slide => {
                let title = title.unwrap_or_default();
                format!(
                    "<div class=\"slide\">\n<div class=\"slide-container\">\n<div class=\"slide-header\">\n{title}\n</div>\n<div class=\"slide-main\">\n"
                )
            }
        }
    }

    /// HTML fragment emitted when the block closes.
    pub fn render_close(self) -> &'static str {
        match self {
            Self::Warning | Self::Question => "</blockquote>\n",
            Self::Answer | Self::File | Self::Section => "</details>\n",
            Self::Item => "</div>\n</div>\n",
            Self::Times => "</pre>\n",
            Self::Slide => "</div>\n</div>\n</div>\n",
        }
    }
}

/// Collapse parameter whitespace into single spaces and escape for HTML.
///
/// Returns `None` for a blank parameter string so callers can default.
fn normalized_title(params: &str) -> Option<String> {
    let trimmed = params.trim();
    if trimmed.is_empty() {
        return None;
    }
    let joined = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    Some(escape_html(&joined))
}
