use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("failed to decode plan JSON: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for TypeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Convenience alias for type results.
pub type TypeResult<T> = Result<T, TypeError>;
