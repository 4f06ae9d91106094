/*!
 * Error types for the sanzang application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a translation table
#[derive(Error, Debug)]
pub enum TableError {
    /// A non-blank line whose field count does not match the table width
    #[error("Table error (line {line_number}): {line}")]
    Format {
        /// 1-based line number in the table text
        line_number: usize,
        /// The offending line, trimmed
        line: String,
    },

    /// A record whose source term is empty
    #[error("Table error (line {line_number}): empty source term: {line}")]
    EmptySourceTerm {
        /// 1-based line number in the table text
        line_number: usize,
        /// The offending line, trimmed
        line: String,
    },

    /// The table file could not be read
    #[error("Failed to read table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while translating a stream
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error reading input or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Column texts disagree on line count
    #[error("Column {column} has {found} lines, expected at least {expected}")]
    ColumnMismatch {
        column: usize,
        expected: usize,
        found: usize,
    },

    /// Processing was cancelled by the user
    #[error("Interrupted")]
    Interrupted,
}

impl EngineError {
    /// Whether the error is a write to a closed pipe
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}
