//! Error types for scopelog-core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopelogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),
}

pub type Result<T> = std::result::Result<T, ScopelogError>;
