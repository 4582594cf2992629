//! Classifier adapter: data source in, class edges and geometry kind out.

use log::{debug, warn};

use crate::algorithms::classify;
use crate::db::FeatureRepository;
use crate::error::GeneratorResult;
use crate::models::{
    geometry_kind, ClassificationResult, Classifier, FieldPath, GeometryKind, SourceQuery,
};

/// Classify the values of `value_field` across `source`.
///
/// The geometry column is resolved first, so a missing geometry field fails
/// before any value is read. A source without rows yields an empty result
/// without running the classifier.
///
/// # Returns
/// * `Ok((result, kind))` - Class edges and the symbolizer kind for the layer
/// * `Err(GeneratorError::Repository)` - If a field cannot be resolved
/// * `Err(GeneratorError::Classification)` - If the classifier rejects its input
pub fn build_classification<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: &SourceQuery,
    value_field: &FieldPath,
    class_count: usize,
    geometry_field: &str,
    classifier: &Classifier,
) -> GeneratorResult<(ClassificationResult, GeometryKind)> {
    let field_type = repo.field_type(&source.layer, geometry_field)?;
    let kind = geometry_kind(&field_type);
    debug!(
        "Geometry field {}.{} is {:?}, drawing as {}",
        source.layer, geometry_field, field_type, kind
    );

    let values = repo.fetch_ordered_values(source, value_field)?;
    if values.is_empty() {
        debug!("No rows in {} for {}, skipping classification", source.layer, value_field);
        return Ok((ClassificationResult::empty(), kind));
    }

    let result = classify(&values, class_count, classifier)?;
    if result.k < class_count {
        warn!(
            "{} produced {} of {} requested classes for {}",
            classifier, result.k, class_count, value_field
        );
    }
    Ok((result, kind))
}
