//! Tree-stage error type.

/// Error produced while parsing, rewriting, or validating a rendered tree.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("rendered markup is not well formed: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("rendered markup is not valid UTF-8: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    #[error("rendered markup has no body")]
    EmptyDocument,

    #[error("document must have exactly one top-level heading, found {0}")]
    HeadingCount(usize),

    #[error("document must start with its heading or one plain paragraph before it")]
    LeadingContent,

    #[error("cannot list animation folder {folder}: {source}")]
    AssetListing {
        folder: String,
        source: std::io::Error,
    },
}
