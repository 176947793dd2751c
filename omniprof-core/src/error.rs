//! Error types for omniprof.

use thiserror::Error;

/// Errors that can occur in omniprof operations.
///
/// iCal parsing and generation never fail: malformed event blocks are
/// dropped instead of being reported.
#[derive(Error, Debug)]
pub enum OmniprofError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("No iCal data supplied")]
    EmptyIcs,

    #[error("Class {0} not found")]
    UnknownClass(u64),

    #[error("Invalid date format '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for omniprof operations.
pub type OmniprofResult<T> = Result<T, OmniprofError>;
