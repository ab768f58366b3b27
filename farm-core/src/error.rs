//! Error types for farm-core

use thiserror::Error;

/// Domain operation errors
#[derive(Error, Debug)]
pub enum FarmError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for domain operations
pub type FarmResult<T> = Result<T, FarmError>;
