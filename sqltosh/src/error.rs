//! Error types for sqltosh
//!
//! The `Display` form of each user-facing variant is the exact diagnostic
//! line printed by the shell.

use thiserror::Error;

/// Result type alias for sqltosh operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for statement execution
#[derive(Error, Debug)]
pub enum SqlError {
    /// Leading verb is not a known statement
    #[error("ERROR 1064 (42000) at line 0: You have an error in your SQL syntax; (Hint): invalid statement: {0}")]
    InvalidStatement(String),

    /// `select` without a target directory
    #[error("ERROR 1064 (42000) at line 0: You have an error in your SQL syntax; (Hint): missing directory / path")]
    MissingPath,

    /// Column outside the fixed schema
    #[error("ERROR 1054 (42S22) at line 0: Unknown column '{0}' in 'field list'")]
    UnknownColumn(String),

    /// Target directory does not exist
    #[error("ERROR 1146 (42S02) at line 0: Directory {0} doesn't exist")]
    PathNotFound(String),

    /// Octal permission digit outside 0-7
    #[error("invalid permission digit: {0:?}")]
    InvalidPermissionDigit(char),

    /// IO error while reading a directory that does exist
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
