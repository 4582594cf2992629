//! Classification requests, classifier selection and classifier output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::source::{FieldPath, SourceQuery};

/// Geometry column used when the caller does not name one.
pub const DEFAULT_GEOMETRY_FIELD: &str = "geom";

fn default_sample_pct() -> f64 {
    0.10
}

fn default_natural_breaks_initial() -> usize {
    100
}

fn default_max_p_initial() -> usize {
    1000
}

/// Classification scheme together with its tuning parameters.
///
/// Each variant carries only the options its algorithm understands.
/// Randomised schemes take an explicit `seed` so that repeated runs over
/// the same values produce the same breaks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    #[default]
    EqualInterval,
    Quantiles,
    FisherJenks,
    JenksCaspall,
    JenksCaspallForced,
    JenksCaspallSampled {
        /// Share of the values drawn into the sample (capped at 1000 values).
        #[serde(default = "default_sample_pct")]
        pct: f64,
        #[serde(default)]
        seed: u64,
    },
    MaximumBreaks {
        /// Gaps no larger than this are never used as breaks.
        #[serde(default)]
        mindiff: f64,
    },
    NaturalBreaks {
        /// Number of random restarts; the best fitting one is kept.
        #[serde(default = "default_natural_breaks_initial")]
        initial: usize,
        #[serde(default)]
        seed: u64,
    },
    MaxP {
        #[serde(default = "default_max_p_initial")]
        initial: usize,
        #[serde(default)]
        seed: u64,
    },
}

impl Classifier {
    pub fn jenks_caspall_sampled() -> Self {
        Classifier::JenksCaspallSampled {
            pct: default_sample_pct(),
            seed: 0,
        }
    }

    pub fn maximum_breaks() -> Self {
        Classifier::MaximumBreaks { mindiff: 0.0 }
    }

    pub fn natural_breaks() -> Self {
        Classifier::NaturalBreaks {
            initial: default_natural_breaks_initial(),
            seed: 0,
        }
    }

    pub fn max_p() -> Self {
        Classifier::MaxP {
            initial: default_max_p_initial(),
            seed: 0,
        }
    }

    /// Display name embedded in generated layer names.
    pub fn name(&self) -> &'static str {
        match self {
            Classifier::EqualInterval => "Equal_Interval",
            Classifier::Quantiles => "Quantiles",
            Classifier::FisherJenks => "Fisher_Jenks",
            Classifier::JenksCaspall => "Jenks_Caspall",
            Classifier::JenksCaspallForced => "Jenks_Caspall_Forced",
            Classifier::JenksCaspallSampled { .. } => "Jenks_Caspall_Sampled",
            Classifier::MaximumBreaks { .. } => "Maximum_Breaks",
            Classifier::NaturalBreaks { .. } => "Natural_Breaks",
            Classifier::MaxP { .. } => "Max_P_Classifier",
        }
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Classifier {
    type Err = String;

    /// Parse a scheme name with default options, e.g. `quantiles` or `max_p`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "equal_interval" => Ok(Classifier::EqualInterval),
            "quantiles" => Ok(Classifier::Quantiles),
            "fisher_jenks" => Ok(Classifier::FisherJenks),
            "jenks_caspall" => Ok(Classifier::JenksCaspall),
            "jenks_caspall_forced" => Ok(Classifier::JenksCaspallForced),
            "jenks_caspall_sampled" => Ok(Classifier::jenks_caspall_sampled()),
            "maximum_breaks" => Ok(Classifier::maximum_breaks()),
            "natural_breaks" => Ok(Classifier::natural_breaks()),
            "max_p" | "max_p_classifier" => Ok(Classifier::max_p()),
            _ => Err(format!("Unknown classifier: {}", s)),
        }
    }
}

/// One class boundary as produced by a classifier.
///
/// Some schemes compute their boundaries over column vectors and hand back
/// a one-element sample per class instead of a plain number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinEdge {
    Value(f64),
    Sample(Vec<f64>),
}

impl BinEdge {
    /// The scalar class edge: the value itself, or a sample's first element.
    pub fn scalar(&self) -> f64 {
        match self {
            BinEdge::Value(v) => *v,
            BinEdge::Sample(sample) => sample.first().copied().unwrap_or(f64::NAN),
        }
    }
}

impl From<f64> for BinEdge {
    fn from(value: f64) -> Self {
        BinEdge::Value(value)
    }
}

/// Output of a classifier: ascending upper class edges and the class count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub bins: Vec<BinEdge>,
    /// Effective number of classes; may be below the requested count.
    pub k: usize,
}

impl ClassificationResult {
    /// Result for a source without any rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: Vec<f64>) -> Self {
        let k = edges.len();
        Self {
            bins: edges.into_iter().map(BinEdge::Value).collect(),
            k,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.k == 0
    }

    /// Scalar class edges, in class order.
    pub fn edges(&self) -> Vec<f64> {
        self.bins.iter().map(BinEdge::scalar).collect()
    }
}

/// Everything needed to turn one layer column into a class-break style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub source: SourceQuery,
    pub value_field: FieldPath,
    #[serde(default = "default_geometry_field")]
    pub geometry_field: String,
    pub class_count: usize,
    #[serde(default)]
    pub classifier: Classifier,
    /// Property name written into filters instead of `value_field`.
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub style_title: Option<String>,
    #[serde(default)]
    pub style_name: Option<String>,
}

fn default_geometry_field() -> String {
    DEFAULT_GEOMETRY_FIELD.to_string()
}

impl ClassificationRequest {
    pub fn new(source: SourceQuery, value_field: FieldPath, class_count: usize) -> Self {
        Self {
            source,
            value_field,
            geometry_field: default_geometry_field(),
            class_count,
            classifier: Classifier::default(),
            property_name: None,
            style_title: None,
            style_name: None,
        }
    }

    pub fn with_geometry_field(mut self, field: impl Into<String>) -> Self {
        self.geometry_field = field.into();
        self
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    pub fn with_style_title(mut self, title: impl Into<String>) -> Self {
        self.style_title = Some(title.into());
        self
    }

    pub fn with_style_name(mut self, name: impl Into<String>) -> Self {
        self.style_name = Some(name.into());
        self
    }

    /// Property name used by the generated filters: the override if set,
    /// otherwise the value field exactly as written.
    pub fn filter_property(&self) -> &str {
        self.property_name
            .as_deref()
            .unwrap_or_else(|| self.value_field.as_str())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.class_count == 0 {
            return Err("class_count must be at least 1".to_string());
        }
        if self.geometry_field.trim().is_empty() {
            return Err("geometry_field must not be empty".to_string());
        }
        if let Some(name) = &self.property_name {
            if name.trim().is_empty() {
                return Err("property_name override must not be empty".to_string());
            }
        }
        Ok(())
    }
}
