//! Error types.

use thiserror::Error;

/// Error returned by a [`TreeLoader`](crate::loader::TreeLoader) when a load fails.
///
/// The engine never retries or swallows these; they are handed back to
/// whoever drove the load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    /// Error message
    pub message: String,
}

impl LoadError {
    /// Create a new load error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for LoadError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for LoadError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Crate error type.
#[derive(Debug, Error)]
pub enum TreeSelectError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid tree data: {0}")]
    InvalidData(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TreeSelectError>;
