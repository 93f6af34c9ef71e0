//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized,

    /// Writes are disabled until an operator configures the admin secret.
    #[error("Service misconfigured: no write secret is configured")]
    ServiceMisconfigured,

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl DomainError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "BlogPost",
            id: id.into(),
        }
    }
}

/// Store-level errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
