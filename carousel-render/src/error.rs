//! Renderer error types.

use thiserror::Error;

/// Result type for rendering and export operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering and export.
///
/// Visual-asset failures (a missing image, an unparseable color) are handled
/// inside the rasterizer with safe fallbacks and never surface here; these
/// variants are for failures the export cannot paper over.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Raster surface allocation failed.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Resource loading failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// Encoding a finished surface to an image format failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Paginated document assembly failed.
    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    /// Writing an export artifact to disk failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
