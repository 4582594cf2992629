//! Error types for repository operations.

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Field '{field}' not found on layer '{layer}'")]
    FieldNotFound { layer: String, field: String },

    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RepositoryError {
    pub fn field_not_found(layer: impl Into<String>, field: impl Into<String>) -> Self {
        RepositoryError::FieldNotFound {
            layer: layer.into(),
            field: field.into(),
        }
    }

    /// Whether the error means a schema column does not exist.
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, RepositoryError::FieldNotFound { .. })
    }
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::InternalError(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::InternalError(s.to_string())
    }
}
