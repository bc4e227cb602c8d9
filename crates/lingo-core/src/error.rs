use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures. Non-fatal findings (naming violations, parameter
/// mismatches, duplicate groups) are report data, not errors.
#[derive(Debug, Error)]
pub enum LingoError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("syntax error in {path}: {message}")]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("schema violation in {path}: {reason}")]
    Schema { path: PathBuf, reason: String },

    #[error("write failed for {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LingoError>;
