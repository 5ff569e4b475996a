//! Error types for outline extraction.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for outline operations.
pub type Result<T> = std::result::Result<T, OutlineError>;

#[derive(Error, Debug)]
pub enum OutlineError {
    /// The input document does not exist.
    #[error("input file {} does not exist", .0.display())]
    InputNotFound(PathBuf),

    /// lopdf could not load or walk the document.
    #[error("PDF parsing error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Text could not be pulled out of a page.
    #[error("text extraction error on page {page}: {message}")]
    TextExtract { page: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration values that cannot drive the classifier.
    #[error("invalid configuration: {0}")]
    Config(String),
}
