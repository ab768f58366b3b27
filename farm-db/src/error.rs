//! Database error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarmDbError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type FarmDbResult<T> = Result<T, FarmDbError>;
