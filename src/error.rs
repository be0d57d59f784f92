//! Error types for usfm2json.

use thiserror::Error;

/// Result type for usfm2json operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning USFM into records.
///
/// Structural problems inside a line are never errors; they are reported as
/// [`crate::Diagnostic`]s and parsing carries on.
#[derive(Error, Debug)]
pub enum Error {
    /// A line did not start with a backslash and the options reject such lines.
    #[error("Line {line} does not start with a marker")]
    MissingPrefix { line: usize },

    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error occurred while serializing records.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
