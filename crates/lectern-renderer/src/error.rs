//! Render-stage error type.

use std::path::PathBuf;

/// Error produced while preparing or rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot include {path}: {source}")]
    Include {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("include depth limit ({0}) exceeded")]
    IncludeDepth(usize),
}
