//! Per-document compilation for lectern.
//!
//! [`Compiler`] orchestrates the whole pipeline for one source file:
//! markdown rendering (with directives and includes), tree postprocessing,
//! structural validation, title extraction, prefix computation, and the
//! final page template. Compiles are independent; a failure aborts only
//! the file at hand.

mod compile;
mod error;
mod prefix;
pub mod template;

pub use compile::{CompiledPage, Compiler};
pub use error::CompileError;
pub use prefix::site_prefix;
