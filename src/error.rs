use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for conversion operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Error type returned by conversion functions.
///
/// A single enum shared across discovery, CSV reading and JSON output. Any of these aborts the
/// whole run; nothing is written once an error has been returned.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Underlying I/O error (e.g. permission denied, output path not writable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV open/read error, including rows that are not valid UTF-8.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Serializing the output document failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured file pattern is not a valid glob.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// An entry matched the file pattern but could not be inspected.
    #[error("failed to enumerate input: {0}")]
    Glob(#[from] glob::GlobError),

    /// A path (input directory or matched file name) is not valid UTF-8.
    #[error("path is not valid utf-8: {}", path.display())]
    InvalidPath { path: PathBuf },
}
