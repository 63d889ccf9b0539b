//! Error types for unpaste library.

use std::io;
use thiserror::Error;

use crate::model::NodeKind;

/// Result type alias for unpaste operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while normalizing a paste.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed comma-separated text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A table would exceed the cell limit; tables are rejected, never truncated.
    #[error("Table has {cells} cells (limit is {limit})")]
    TooManyCells {
        /// Cell count of the rejected table
        cells: usize,
        /// Configured maximum
        limit: usize,
    },

    /// No `<table>` element was found in the HTML.
    #[error("No table found in HTML")]
    NoTable,

    /// The table had no rows left after dropping empty ones.
    #[error("Table is empty")]
    EmptyTable,

    /// The insertion point cannot hold the produced node type.
    #[error("Cannot insert {0} at the current position")]
    InsertionRejected(NodeKind),

    /// Temporary storage failed to store a pasted blob.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TooManyCells {
            cells: 2500,
            limit: 2000,
        };
        assert_eq!(err.to_string(), "Table has 2500 cells (limit is 2000)");

        let err = Error::InsertionRejected(NodeKind::Table);
        assert_eq!(
            err.to_string(),
            "Cannot insert table at the current position"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
