//! Map classification schemes.
//!
//! Every scheme takes the values in ascending order plus a requested class
//! count and returns the upper edge of each class. Schemes may return fewer
//! classes than requested when the data does not support more (too few
//! distinct values, tied gaps, vanished clusters); that is not an error.

pub mod equal_interval;
pub mod fisher_jenks;
pub mod jenks_caspall;
pub mod max_p;
pub mod maximum_breaks;
pub mod natural_breaks;
pub mod quantiles;
pub mod stats;

use log::debug;

use crate::models::{BinEdge, ClassificationResult, Classifier};

/// Result type for classification
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Errors raised before a scheme runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Class count must be at least 1")]
    InvalidClassCount,

    #[error("Cannot classify an empty set of values")]
    EmptyInput,

    #[error("Value at position {0} is not finite")]
    NonFinite(usize),

    #[error("Invalid classifier parameter: {0}")]
    InvalidParameter(String),
}

fn check_parameters(classifier: &Classifier) -> ClassifyResult<()> {
    match classifier {
        Classifier::JenksCaspallSampled { pct, .. } if !(*pct > 0.0 && *pct <= 1.0) => Err(
            ClassifyError::InvalidParameter(format!("pct must be in (0, 1], got {}", pct)),
        ),
        Classifier::MaximumBreaks { mindiff } if !(mindiff.is_finite() && *mindiff >= 0.0) => {
            Err(ClassifyError::InvalidParameter(format!(
                "mindiff must be a non-negative number, got {}",
                mindiff
            )))
        }
        Classifier::NaturalBreaks { initial: 0, .. } | Classifier::MaxP { initial: 0, .. } => Err(
            ClassifyError::InvalidParameter("initial must be at least 1".to_string()),
        ),
        _ => Ok(()),
    }
}

/// Classify `values` into at most `k` classes with the given scheme.
///
/// Input order does not matter; values are sorted before classification.
/// Jenks–Caspall edges come back as one-element samples, every other
/// scheme returns plain values.
pub fn classify(
    values: &[f64],
    k: usize,
    classifier: &Classifier,
) -> ClassifyResult<ClassificationResult> {
    if k == 0 {
        return Err(ClassifyError::InvalidClassCount);
    }
    if values.is_empty() {
        return Err(ClassifyError::EmptyInput);
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        return Err(ClassifyError::NonFinite(idx));
    }
    check_parameters(classifier)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let result = match classifier {
        Classifier::EqualInterval => {
            ClassificationResult::from_edges(equal_interval::equal_interval(&sorted, k))
        }
        Classifier::Quantiles => ClassificationResult::from_edges(quantiles::quantiles(&sorted, k)),
        Classifier::FisherJenks => {
            ClassificationResult::from_edges(fisher_jenks::fisher_jenks(&sorted, k))
        }
        Classifier::JenksCaspall => as_samples(jenks_caspall::jenks_caspall(&sorted, k)),
        Classifier::JenksCaspallForced => {
            ClassificationResult::from_edges(jenks_caspall::jenks_caspall_forced(&sorted, k))
        }
        Classifier::JenksCaspallSampled { pct, seed } => as_samples(
            jenks_caspall::jenks_caspall_sampled(&sorted, k, *pct, *seed),
        ),
        Classifier::MaximumBreaks { mindiff } => {
            ClassificationResult::from_edges(maximum_breaks::maximum_breaks(&sorted, k, *mindiff))
        }
        Classifier::NaturalBreaks { initial, seed } => ClassificationResult::from_edges(
            natural_breaks::natural_breaks(&sorted, k, *initial, *seed),
        ),
        Classifier::MaxP { initial, seed } => {
            ClassificationResult::from_edges(max_p::max_p(&sorted, k, *initial, *seed))
        }
    };

    debug!(
        "{} on {} values: requested {} classes, produced {}",
        classifier,
        values.len(),
        k,
        result.k
    );
    Ok(result)
}

fn as_samples(edges: Vec<f64>) -> ClassificationResult {
    let k = edges.len();
    ClassificationResult {
        bins: edges.into_iter().map(|e| BinEdge::Sample(vec![e])).collect(),
        k,
    }
}
