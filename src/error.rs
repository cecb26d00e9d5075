//! Error handling for csvjoin
//!
//! This module defines custom error types for the csvjoin application.
//! It provides a comprehensive error handling system that categorizes
//! different failure modes, supports error propagation, and supplies
//! helpful error messages to users.
//!
//! The module uses thiserror to minimize boilerplate code and create
//! a consistent error handling approach throughout the codebase.

use thiserror::Error;

/// CsvJoinError represents all possible errors that can occur in the csvjoin application
///
/// This enum provides a comprehensive set of error types that can occur during:
/// - File I/O operations (source files, query files)
/// - Database connection and statement execution
/// - Table loading and schema augmentation
/// - Query validation and execution
/// - Result rendering
///
/// Each variant carries the phase it belongs to, so the top level can map an
/// error to a single diagnostic line and exit code without inspecting message
/// text.
#[derive(Error, Debug)]
pub enum CsvJoinError {
    /// Error during file system operations (reading source or query files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error raised by the embedded SQL engine during load, DDL, or query execution
    #[error("database error: {0}")]
    DatabaseError(#[from] duckdb::Error),

    /// Error while writing CSV-formatted output
    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error while serializing JSON-formatted output
    #[error("JSON output error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error compiling one of the built-in validation patterns
    #[error("pattern error: {0}")]
    RegexError(#[from] regex::Error),

    /// Error for invalid [alias=]path table specifications
    #[error("invalid table specification: {0}")]
    InvalidTableSpec(String),

    /// A supplied query that does not look like a read statement
    ///
    /// This is a deliberate guard rail, not an engine error: the statement is
    /// refused before it ever reaches the database.
    #[error("not a read query (only select/with/values are accepted; use --adhoc for other statements): {0}")]
    QueryRejected(String),
}

/// Result type alias for operations that can produce a CsvJoinError
///
/// This type alias simplifies function signatures and error handling throughout the codebase.
/// It represents either a successful result of type `T` or a `CsvJoinError`.
pub type CsvJoinResult<T> = std::result::Result<T, CsvJoinError>;
