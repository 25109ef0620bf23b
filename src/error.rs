use std::num::ParseIntError;

use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, ThisError, PartialEq, Clone)]
pub enum Error {
    #[error("failed to deserialize: {0}")]
    FailedDeserialization(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("key is already present: {0}")]
    DuplicateKey(String),

    #[error("malformed element: {0}")]
    MalformedElement(String),
}

impl From<serde_json::Error> for Error {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn from(error: serde_json::Error) -> Self {
        Error::FailedDeserialization(format!("{}", error))
    }
}

impl From<ParseIntError> for Error {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn from(error: ParseIntError) -> Self {
        Error::InvalidPosition(format!("{}", error))
    }
}
