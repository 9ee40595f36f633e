// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure taxonomy of the content domain.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Rejected by a value-object constructor or enum parse (blank title,
    /// non-positive id, unknown status string).
    #[error("validation error: {0}")]
    Validation(String),
    /// A uniqueness rule already holds the value, notably the live-slug
    /// index; the create path retries on this.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The id or slug does not resolve to a live (non-deleted) content row.
    #[error("not found: {0}")]
    NotFound(String),
    /// Unexpected storage failure surfaced by the repository layer.
    #[error("persistence error: {0}")]
    Persistence(String),
}
