//! Read-only access to layered feature data.

use super::error::RepositoryResult;
use crate::models::{FieldPath, FieldType, SourceQuery};

/// Repository trait for the queries a classification needs.
///
/// Implementations are read-only from the caller's point of view, so a
/// single instance can serve concurrent requests.
pub trait FeatureRepository: Send + Sync {
    /// Names of all layers, in insertion order.
    fn list_layers(&self) -> RepositoryResult<Vec<String>>;

    /// Declared type of a column on a layer.
    ///
    /// # Returns
    /// * `Err(RepositoryError::LayerNotFound)` - If the layer does not exist
    /// * `Err(RepositoryError::FieldNotFound)` - If the column does not exist
    fn field_type(&self, layer: &str, field: &str) -> RepositoryResult<FieldType>;

    /// Number of rows selected by a query.
    fn count(&self, query: &SourceQuery) -> RepositoryResult<usize>;

    /// Values of a numeric column over the selected rows, ascending.
    ///
    /// Relation segments of `field` are followed before reading the value.
    /// Rows with equal values keep their storage order.
    ///
    /// # Returns
    /// * `Err(RepositoryError::FieldNotFound)` - If any path segment is missing
    /// * `Err(RepositoryError::ValidationError)` - If a value is not a number
    fn fetch_ordered_values(
        &self,
        query: &SourceQuery,
        field: &FieldPath,
    ) -> RepositoryResult<Vec<f64>>;
}
