use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("invalid type code: {0:?}")]
    InvalidTypeCode(String),

    #[error("type code {value} out of range (max {max})")]
    CodeOutOfRange { value: u64, max: u64 },
}
