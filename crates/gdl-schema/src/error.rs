use thiserror::Error;

use gdl_types::TypeError;

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("{record} #{index}: missing attribute '{attribute}'")]
    MissingAttribute {
        record: &'static str,
        index: usize,
        attribute: &'static str,
    },

    #[error("{record} '{name}': missing field <{field}>")]
    MissingField {
        record: &'static str,
        name: String,
        field: &'static str,
    },

    #[error("{record} '{name}': invalid value {value:?} for <{field}>")]
    InvalidValue {
        record: &'static str,
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("{record} '{name}': {source}")]
    InvalidCode {
        record: &'static str,
        name: String,
        #[source]
        source: TypeError,
    },
}

pub type DecodeResult<T> = Result<T, DecodeError>;
