//! Error types for document operations.

use thiserror::Error;

/// Result type for document operations.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Errors that can occur in document operations.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// Slide not found in the document.
    #[error("Slide not found: {0}")]
    SlideNotFound(String),

    /// Element not found on any slide.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid operation on the document.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
