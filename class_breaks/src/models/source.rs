//! Descriptions of the feature collection a classification reads from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a value column, possibly reached through relations.
///
/// Both `pipeline__reservoir__volume` and `pipeline.reservoir.volume`
/// address the `volume` column of the reservoir each pipeline points to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("Field reference must not be empty".to_string());
        }

        let segments: Vec<String> = trimmed
            .split("__")
            .flat_map(|part| part.split('.'))
            .map(|s| s.to_string())
            .collect();

        if segments.iter().any(|s| s.is_empty()) {
            return Err(format!("Malformed field reference: {}", raw));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// The reference exactly as the caller wrote it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Relation columns to follow before reaching the value column.
    pub fn relations(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Name of the column that holds the value.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    pub fn is_related(&self) -> bool {
        self.segments.len() > 1
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FieldPath::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

/// Row filter applied to a layer before values are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// Column equals the given value (numbers compare numerically).
    Exact {
        field: String,
        value: serde_json::Value,
    },
    /// Text column starts with the given prefix.
    StartsWith { field: String, prefix: String },
}

impl Predicate {
    pub fn exact(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Predicate::Exact {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn starts_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Predicate::StartsWith {
            field: field.into(),
            prefix: prefix.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Predicate::Exact { field, .. } | Predicate::StartsWith { field, .. } => field,
        }
    }

    /// Evaluate against one column value. Missing values never match.
    pub fn matches(&self, candidate: Option<&serde_json::Value>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };
        match self {
            Predicate::Exact { value, .. } => match (candidate.as_f64(), value.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => candidate == value,
            },
            Predicate::StartsWith { prefix, .. } => candidate
                .as_str()
                .map(|s| s.starts_with(prefix.as_str()))
                .unwrap_or(false),
        }
    }
}

/// A filtered view over one layer of the data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceQuery {
    pub layer: String,
    #[serde(default)]
    pub predicates: Vec<Predicate>,
}

impl SourceQuery {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            predicates: Vec::new(),
        }
    }

    /// Add a predicate; all predicates must hold for a row to be selected.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}
