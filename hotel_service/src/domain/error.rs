//! Domain error taxonomy.

use model_response::ErrorDetails;
use thiserror::Error;

/// What can go wrong while executing a domain operation. The API layer maps
/// each variant onto a status code and envelope; `Internal` never carries
/// detail to the client.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The payload failed validation; always raised before any write.
    #[error("validation failed")]
    Validation(Vec<ErrorDetails>),

    /// The request is well-formed but unusable (empty update, bad target).
    #[error("{0}")]
    BadRequest(String),

    /// A server-side overlap/uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// The target row does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The principal is authenticated but lacks the required role.
    #[error("{0}")]
    Forbidden(String),

    /// Unclassified persistence or runtime failure.
    #[error("an unexpected error occurred")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DomainError>;
