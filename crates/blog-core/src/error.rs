//! Domain-level error types.

use thiserror::Error;

use crate::validation::FieldError;

/// Domain errors - business rule failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Malformed identifier: {0}")]
    MalformedId(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Entity not found: {entity_type}")]
    NotFound { entity_type: &'static str },

    #[error("Caller does not own this {entity_type}")]
    Forbidden { entity_type: &'static str },
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}
