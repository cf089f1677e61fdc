//! Markdown stage for lectern documents.
//!
//! Turns annotated markdown into an HTML string in three steps:
//!
//! 1. **Include expansion** ([`IncludeExpander`]): `{{path}}` lines are
//!    spliced in from disk, recursively, with a depth limit.
//! 2. **Directive preprocessing** ([`preprocess`]): fenced block directives
//!    (`!!!`, `:::`, `++++++++++++++`, ...) become raw HTML fragments that
//!    ride through the markdown engine unchanged.
//! 3. **Rendering** ([`render_document`]): pulldown-cmark with GFM options
//!    produces the HTML string that the tree postprocessor consumes.
//!
//! The markdown engine itself is generic; everything document-specific
//! lives in the directive set ([`BlockDirective`]).

mod directive;
mod error;
mod fence;
mod include;
mod preprocess;
mod render;

pub use directive::BlockDirective;
pub use error::RenderError;
pub use fence::FenceTracker;
pub use include::{IncludeExpander, ReadFileFn};
pub use preprocess::{Preprocessed, preprocess};
pub use render::{RenderContext, Rendered, escape_html, render_document};
