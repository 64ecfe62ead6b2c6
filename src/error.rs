//! Error types for part highlighting.
//!
//! Every failure that reaches the caller aborts processing of the whole
//! document. A search that finds no region for a matched token is not an
//! error; see [`crate::surface::RegionLookup`].

use std::path::PathBuf;

/// Result type alias for highlighting operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while highlighting a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input document does not exist
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input exists but cannot be opened as a document
    #[error("Cannot read {}: {reason}", path.display())]
    Unreadable {
        /// Path that failed to load
        path: PathBuf,
        /// Reason reported by the loader
        reason: String,
    },

    /// Page index outside the document
    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested page (0-indexed)
        page: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// Structural problem in a page
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// Color name missing from the color table
    #[error("Unknown color: {0}")]
    UnknownColor(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serializing or writing the output failed
    #[error("Failed to write output: {0}")]
    OutputWrite(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error raised by the PDF object layer
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}
