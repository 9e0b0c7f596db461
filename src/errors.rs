/*!
 * Error types for the engsub application.
 *
 * Extraction either fails because the input is missing or because some
 * other I/O step (read, UTF-8 decode, write) went wrong. Malformed dialogue
 * lines are not errors; they are filtered out.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting English dialogue
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The input file (or folder, in batch mode) does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Any other I/O or decoding failure, tagged with the file involved
    #[error("failed to process {}: {source}", path.display())]
    Processing {
        /// File being read or written when the failure happened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration values that cannot be used
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ExtractError {
    // @creates: Processing error bound to a path
    pub fn processing<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Processing { path: path.into(), source }
    }

    /// True when the failure is the missing-input case
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InputNotFound(_))
    }
}

/// Result alias used across the library
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
