//! Error types for resultpage library.

use std::io;
use thiserror::Error;

/// Result type alias for resultpage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading input or configuring analysis.
///
/// The analysis itself never fails: empty documents, empty pages and
/// all-zero term counts all produce a well-formed report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input or output JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The layout hint was present but could not be understood.
    #[error("Invalid layout hint: {0}")]
    InvalidLayoutHint(String),

    /// A page number was zero. Page numbers are 1-based.
    #[error("Invalid page number {number} at input position {index} (page numbers start at 1)")]
    InvalidPageNumber {
        /// Position of the page in the input sequence
        index: usize,
        /// The offending page number
        number: u32,
    },

    /// An analysis option had an unusable value.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A lexicon pattern failed to compile.
    #[error("Invalid lexicon pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The fallback extractor failed to produce pages.
    #[error("Re-extraction failed: {0}")]
    Reextraction(String),
}
