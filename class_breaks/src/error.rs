//! Top-level error type for the class-break pipeline.

use crate::algorithms::ClassifyError;
use crate::db::RepositoryError;

/// Result type for pipeline operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Errors surfaced by [`crate::services::generate`] and its helpers.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Classification failed: {0}")]
    Classification(#[from] ClassifyError),
}

impl GeneratorError {
    /// Whether the request named a field the source does not have.
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_field_not_found())
    }
}
