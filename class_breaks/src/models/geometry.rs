//! Field types and the geometry categories that drive symbolizer selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendering category of a layer's geometry column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Point => "point",
            GeometryKind::Line => "line",
            GeometryKind::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// Declared type of a column in a layer schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Integer,
    Float,
    Text,
    Boolean,
    /// Reference to a record (by id) in another layer.
    ForeignKey(String),
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    Geometry,
    GeometryCollection,
}

impl FieldType {
    /// Whether values of this column are numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }

    /// Whether this column holds a geometry of any kind.
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            FieldType::Point
                | FieldType::MultiPoint
                | FieldType::LineString
                | FieldType::MultiLineString
                | FieldType::Polygon
                | FieldType::MultiPolygon
                | FieldType::Geometry
                | FieldType::GeometryCollection
        )
    }

    /// Target layer of a relation column.
    pub fn related_layer(&self) -> Option<&str> {
        match self {
            FieldType::ForeignKey(layer) => Some(layer),
            _ => None,
        }
    }
}

impl FromStr for FieldType {
    type Err = String;

    /// Parse a schema type name. Relations are written `foreign_key:<layer>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const RELATION_PREFIX: &str = "foreign_key:";

        let trimmed = s.trim();
        if let Some(prefix) = trimmed.get(..RELATION_PREFIX.len()) {
            if prefix.eq_ignore_ascii_case(RELATION_PREFIX) {
                let target = trimmed[RELATION_PREFIX.len()..].trim();
                if target.is_empty() {
                    return Err(format!("Relation type without target layer: {}", s));
                }
                return Ok(FieldType::ForeignKey(target.to_string()));
            }
        }

        let lowered = trimmed.to_lowercase();

        match lowered.as_str() {
            "integer" | "int" => Ok(FieldType::Integer),
            "float" | "double" | "decimal" => Ok(FieldType::Float),
            "text" | "string" | "char" => Ok(FieldType::Text),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "point" => Ok(FieldType::Point),
            "multipoint" => Ok(FieldType::MultiPoint),
            "linestring" => Ok(FieldType::LineString),
            "multilinestring" => Ok(FieldType::MultiLineString),
            "polygon" => Ok(FieldType::Polygon),
            "multipolygon" => Ok(FieldType::MultiPolygon),
            "geometry" => Ok(FieldType::Geometry),
            "geometrycollection" => Ok(FieldType::GeometryCollection),
            _ => Err(format!("Unknown field type: {}", s)),
        }
    }
}

/// Map a declared column type onto the symbolizer category used to draw it.
///
/// Lines and polygons (single or multi) get their own category; points,
/// generic geometries, collections and anything else fall back to points.
pub fn geometry_kind(field_type: &FieldType) -> GeometryKind {
    match field_type {
        FieldType::LineString | FieldType::MultiLineString => GeometryKind::Line,
        FieldType::Polygon | FieldType::MultiPolygon => GeometryKind::Polygon,
        FieldType::Point
        | FieldType::MultiPoint
        | FieldType::Geometry
        | FieldType::GeometryCollection
        | FieldType::Integer
        | FieldType::Float
        | FieldType::Text
        | FieldType::Boolean
        | FieldType::ForeignKey(_) => GeometryKind::Point,
    }
}
