//! Error types returned by the itemization pipeline.
//!
//! Most failure modes of the reference C API (invalid/destroyed context,
//! feature parse failure) have no runtime representation in Rust: ownership
//! rules rule out the former at compile time, and the latter is reported as
//! a plain `bool` from [`crate::Paragraph::add_feature`] rather than an error
//! variant, since it never aborts a pipeline.

use thiserror::Error;

/// Failure of [`crate::Paragraph::layout`].
#[derive(Debug, Error)]
pub enum LayoutError {
    /// `layout()` was called on a paragraph with no text.
    #[error("layout called on an empty paragraph")]
    EmptyParagraph,

    /// The Unicode Bidirectional Algorithm could not resolve a paragraph
    /// embedding for the given text.
    #[error("bidi resolution failed")]
    BidiResolutionFailed,

    /// A shape run's font could not be parsed, or shaping otherwise failed.
    #[error("shaping failed: {0}")]
    ShapingFailed(String),
}
