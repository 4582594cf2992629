//! End-to-end class-break style generation.
//!
//! ```text
//! ClassificationRequest
//!        │ validate
//!        ▼
//! build_classification ──► FeatureRepository (geometry type, ordered values)
//!        │                 algorithms::classify
//!        ▼
//! style::assemble ──► StyledLayerDescriptor (normalized)
//! ```

use log::info;

use super::classification::build_classification;
use super::style::assemble;
use crate::db::FeatureRepository;
use crate::error::{GeneratorError, GeneratorResult};
use crate::models::{ClassificationRequest, Classifier, FieldPath, SourceQuery};
use crate::sld::StyledLayerDescriptor;

/// Name given to the generated layer.
pub fn layer_name(request: &ClassificationRequest) -> String {
    format!(
        "{} breaks on \"{}\" as {}",
        request.class_count,
        request.value_field,
        request.classifier.name()
    )
}

/// Generate a class-break style for a request.
///
/// # Returns
/// * `Ok(StyledLayerDescriptor)` - Normalized document, one rule per class
/// * `Err(GeneratorError::InvalidRequest)` - If the request fails validation
/// * `Err(GeneratorError::Repository)` - If a field cannot be resolved
/// * `Err(GeneratorError::Classification)` - If the classifier rejects its options
pub fn generate<R: FeatureRepository + ?Sized>(
    repo: &R,
    request: &ClassificationRequest,
) -> GeneratorResult<StyledLayerDescriptor> {
    request.validate().map_err(GeneratorError::InvalidRequest)?;

    let (result, kind) = build_classification(
        repo,
        &request.source,
        &request.value_field,
        request.class_count,
        &request.geometry_field,
        &request.classifier,
    )?;

    let sld = assemble(
        &result,
        kind,
        &layer_name(request),
        request.filter_property(),
        request.style_title.as_deref(),
        request.style_name.as_deref(),
    );

    info!(
        "Generated {} rules ({} requested) for {}.{} with {}",
        sld.rules().len(),
        request.class_count,
        request.source.layer,
        request.value_field,
        request.classifier
    );
    Ok(sld)
}

fn generate_with<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
    classifier: Classifier,
) -> GeneratorResult<StyledLayerDescriptor> {
    let value_field = FieldPath::parse(field).map_err(GeneratorError::InvalidRequest)?;
    let request =
        ClassificationRequest::new(source, value_field, class_count).with_classifier(classifier);
    generate(repo, &request)
}

/// Equal-width classes over the value range.
pub fn as_equal_interval<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::EqualInterval)
}

/// Classes holding roughly equal numbers of values.
pub fn as_quantiles<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::Quantiles)
}

pub fn as_fisher_jenks<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::FisherJenks)
}

pub fn as_jenks_caspall<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::JenksCaspall)
}

pub fn as_jenks_caspall_forced<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::JenksCaspallForced)
}

/// Jenks–Caspall on a random sample; see [`Classifier::JenksCaspallSampled`].
pub fn as_jenks_caspall_sampled<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::jenks_caspall_sampled())
}

pub fn as_maximum_breaks<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::maximum_breaks())
}

pub fn as_natural_breaks<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::natural_breaks())
}

pub fn as_max_p_classifier<R: FeatureRepository + ?Sized>(
    repo: &R,
    source: SourceQuery,
    field: &str,
    class_count: usize,
) -> GeneratorResult<StyledLayerDescriptor> {
    generate_with(repo, source, field, class_count, Classifier::max_p())
}
