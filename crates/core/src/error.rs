//! Error types for loading and navigating slideshow documents.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a document or starting navigation.
///
/// Malformed document content is never an error: the normalizer absorbs it
/// with defaults. Only failures to obtain the document at all, or a document
/// with nothing to show, surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the document.
    #[error("Failed to read document: {0}")]
    IoError(#[from] std::io::Error),

    /// The document is not valid JSON.
    #[error("Invalid JSON document: {0}")]
    JsonError(#[from] serde_json::Error),

    /// No project has at least one slide.
    #[error("Document has no slides to show")]
    NoSlides,
}
