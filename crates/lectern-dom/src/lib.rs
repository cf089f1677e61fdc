//! Rendered-tree handling for lectern documents.
//!
//! The markdown stage produces an HTML string; this crate parses it into an
//! owned [`TreeNode`], rewrites it into final semantic markup
//! ([`postprocess`]), enforces the required document shape ([`validate`]),
//! and serializes it back to HTML.
//!
//! The tree belongs to exactly one compile operation: it is mutated
//! destructively and discarded once the final string is extracted.

mod error;
mod parse;
mod postprocess;
mod serialize;
mod sigil;
mod tree;
mod validate;

pub use error::DomError;
pub use parse::parse_body;
pub use postprocess::{ListDirFn, PostprocessContext, postprocess};
pub use serialize::serialize_children;
pub use sigil::{Sigil, SigilMatch};
pub use tree::TreeNode;
pub use validate::{document_title, validate};
