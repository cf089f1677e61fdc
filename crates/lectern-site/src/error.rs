//! Compile error taxonomy.

use lectern_dom::DomError;
use lectern_renderer::RenderError;

/// Error aborting a single document's compile.
///
/// Structural violations and missing assets are fatal to the file at hand;
/// other documents in the same build are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Structure(#[from] DomError),
}
