//! Directive fence preprocessing.
//!
//! Turns directive fence lines into raw HTML fragments before the markdown
//! engine runs. The fragments are padded with blank lines so the engine
//! treats them as standalone HTML blocks and keeps processing the content
//! between them as markdown.

use crate::directive::BlockDirective;
use crate::fence::FenceTracker;

/// Result of the directive pass.
#[derive(Debug)]
pub struct Preprocessed {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Replace directive fences in `source` with their HTML fragments.
///
/// Maintains a stack of open directives so a bare marker line closes the
/// innermost matching block. A fence whose parameters fail validation is
/// left in place as ordinary text.
pub fn preprocess(source: &str) -> Preprocessed {
    let mut out = String::with_capacity(source.len());
    let mut warnings = Vec::new();
    let mut stack: Vec<BlockDirective> = Vec::new();
    let mut fences = FenceTracker::new();

    for (idx, line) in source.lines().enumerate() {
        fences.observe(line);
        if fences.in_fence() {
            out.push_str(line);
            out.push('\n');
            continue;
        }

        match match_fence(line, stack.last().copied()) {
            Some(FenceEvent::Open(directive, params)) => {
                if directive.validate(params) {
                    stack.push(directive);
                    out.push('\n');
                    out.push_str(&directive.render_open(params));
                    out.push('\n');
                } else {
                    tracing::warn!(
                        line = idx + 1,
                        marker = directive.marker(),
                        "directive requires a caption, leaving fence as text"
                    );
                    warnings.push(format!(
                        "line {}: {} directive requires a caption",
                        idx + 1,
                        directive.marker()
                    ));
                    out.push_str(line);
                    out.push('\n');
                }
            }
            Some(FenceEvent::Close(directive)) => {
                stack.pop();
                out.push('\n');
                out.push_str(directive.render_close());
                out.push('\n');
            }
            None => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    for directive in stack.drain(..).rev() {
        warnings.push(format!("unclosed {} directive", directive.marker()));
        out.push('\n');
        out.push_str(directive.render_close());
        out.push('\n');
    }

    Preprocessed { text: out, warnings }
}

enum FenceEvent<'a> {
    Open(BlockDirective, &'a str),
    Close(BlockDirective),
}

/// Match a line against the directive markers.
///
/// A bare marker line closes the block when that directive is open on top
/// of the stack, and opens a new one otherwise.
fn match_fence(line: &str, top: Option<BlockDirective>) -> Option<FenceEvent<'_>> {
    let trimmed = line.trim();
    for directive in BlockDirective::ALL {
        if let Some(rest) = trimmed.strip_prefix(directive.marker()) {
            let params = rest.trim();
            if params.is_empty() && top == Some(directive) {
                return Some(FenceEvent::Close(directive));
            }
            return Some(FenceEvent::Open(directive, params));
        }
    }
    None
}
