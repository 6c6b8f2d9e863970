use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("empty key")]
    EmptyKey,

    #[error("invalid key: {0:?} (expected decimal digits)")]
    InvalidKey(String),

    #[error("key out of range: {0}")]
    KeyOverflow(String),
}
