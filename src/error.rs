//! Error types for blog store access

use std::io;
use std::path::PathBuf;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Failures while talking to the blog store
///
/// Each variant marks the stage that failed; the driver's own message is
/// kept as the source.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The store file could not be opened
    #[error("failed to open store {path:?}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The `Post` table is missing or laid out differently
    #[error("unexpected store schema: {0}")]
    Schema(String),

    /// A statement could not be prepared
    #[error("failed to prepare statement")]
    Prepare(#[source] rusqlite::Error),

    /// A statement failed while executing
    #[error("failed to execute statement")]
    Execute(#[source] rusqlite::Error),

    /// Reading the next row failed
    #[error("failed while reading rows")]
    Iteration(#[source] rusqlite::Error),

    /// The connection did not close cleanly
    #[error("failed to close store")]
    Close(#[source] rusqlite::Error),

    /// Writing rows to the output failed
    #[error("failed to write output")]
    Output(#[from] io::Error),
}
