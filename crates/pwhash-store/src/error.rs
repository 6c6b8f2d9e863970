use pwhash_types::HashKey;

/// Errors from hash store operations.
///
/// None of these are caused by user input. `NotAllocated` and
/// `AlreadyComplete` mean the caller broke the allocate-then-complete-once
/// contract.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// Completion was attempted for a key the store never issued.
    #[error("key {0} was never allocated")]
    NotAllocated(HashKey),

    /// Completion was attempted twice for the same key.
    #[error("key {0} is already complete")]
    AlreadyComplete(HashKey),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
