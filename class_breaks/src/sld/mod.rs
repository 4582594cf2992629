//! Styled Layer Descriptor (SLD) documents.
//!
//! - [`document`]: the layer / style / rule tree and its builder API
//! - [`symbolizer`]: point, line and polygon symbolizers and their paint
//! - [`filter`]: OGC comparison filters
//! - [`xml`]: SLD 1.0.0 XML output

pub mod document;
pub mod filter;
pub mod symbolizer;
pub mod xml;

pub use document::{FeatureTypeStyle, NamedLayer, Rule, StyledLayerDescriptor, UserStyle};
pub use filter::{ComparisonOp, Filter, PropertyCriterion};
pub use symbolizer::{
    CssParameter, CssParameters, Fill, Graphic, LineSymbolizer, Mark, PointSymbolizer,
    PolygonSymbolizer, Stroke, Symbolizer,
};
