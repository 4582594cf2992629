//! Domain types shared by the repository, classifier and style layers.

pub mod classification;
pub mod geometry;
pub mod source;

pub use classification::{
    BinEdge, ClassificationRequest, ClassificationResult, Classifier, DEFAULT_GEOMETRY_FIELD,
};
pub use geometry::{geometry_kind, FieldType, GeometryKind};
pub use source::{FieldPath, Predicate, SourceQuery};
