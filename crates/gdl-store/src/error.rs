/// Errors from keyed store construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record matched the lookup.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Two records in the source dataset share a key.
    #[error("duplicate key {key} ('{first}' and '{second}')")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
