//! Symbolizers and the CSS parameters that paint them.

use serde::Serialize;

use crate::models::GeometryKind;

/// Order CSS parameters are written in after normalization.
const CANONICAL_ORDER: &[&str] = &[
    "fill",
    "fill-opacity",
    "stroke",
    "stroke-width",
    "stroke-opacity",
    "stroke-linejoin",
    "stroke-linecap",
    "stroke-dasharray",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssParameter {
    pub name: String,
    pub value: String,
}

/// Named paint parameters of a fill or stroke.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CssParameters(Vec<CssParameter>);

impl CssParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Replace the first parameter with this name, or append a new one.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.0.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.0.push(CssParameter {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Append without replacing; duplicates are resolved by [`Self::normalize`].
    pub fn push(&mut self, name: &str, value: &str) {
        self.0.push(CssParameter {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &CssParameter> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep one parameter per name (the last value written) and sort them
    /// into canonical order; unknown names follow in first-seen order.
    pub fn normalize(&mut self) {
        let mut merged: Vec<CssParameter> = Vec::with_capacity(self.0.len());
        for param in self.0.drain(..) {
            match merged.iter_mut().find(|p| p.name == param.name) {
                Some(existing) => existing.value = param.value,
                None => merged.push(param),
            }
        }
        merged.sort_by_key(|p| {
            CANONICAL_ORDER
                .iter()
                .position(|name| *name == p.name)
                .unwrap_or(CANONICAL_ORDER.len())
        });
        self.0 = merged;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    pub parameters: CssParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub parameters: CssParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    pub well_known_name: String,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graphic {
    pub mark: Mark,
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSymbolizer {
    pub graphic: Graphic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSymbolizer {
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonSymbolizer {
    pub fill: Fill,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbolizer {
    Point(PointSymbolizer),
    Line(LineSymbolizer),
    Polygon(PolygonSymbolizer),
}

impl Symbolizer {
    /// Default symbolizer for a geometry category.
    ///
    /// Points get a red square mark, lines a blue 1px stroke and polygons a
    /// grey fill with a black 1px outline.
    pub fn for_kind(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Point => Symbolizer::Point(PointSymbolizer {
                graphic: Graphic {
                    mark: Mark {
                        well_known_name: "square".to_string(),
                        fill: Some(Fill {
                            parameters: CssParameters::new().with("fill", "#ff0000"),
                        }),
                        stroke: None,
                    },
                    size: None,
                },
            }),
            GeometryKind::Line => Symbolizer::Line(LineSymbolizer {
                stroke: Stroke {
                    parameters: CssParameters::new()
                        .with("stroke", "#0000ff")
                        .with("stroke-width", "1"),
                },
            }),
            GeometryKind::Polygon => Symbolizer::Polygon(PolygonSymbolizer {
                fill: Fill {
                    parameters: CssParameters::new().with("fill", "#AAAAAA"),
                },
                stroke: Some(Stroke {
                    parameters: CssParameters::new()
                        .with("stroke", "#000000")
                        .with("stroke-width", "1"),
                }),
            }),
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Symbolizer::Point(_) => GeometryKind::Point,
            Symbolizer::Line(_) => GeometryKind::Line,
            Symbolizer::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// The parameter list and parameter name that carry the class color:
    /// the mark fill of a point, the stroke of a line, the fill of a polygon.
    fn color_target_mut(&mut self) -> (&mut CssParameters, &'static str) {
        match self {
            Symbolizer::Point(point) => {
                let fill = point.graphic.mark.fill.get_or_insert_with(|| Fill {
                    parameters: CssParameters::new(),
                });
                (&mut fill.parameters, "fill")
            }
            Symbolizer::Line(line) => (&mut line.stroke.parameters, "stroke"),
            Symbolizer::Polygon(polygon) => (&mut polygon.fill.parameters, "fill"),
        }
    }

    pub fn set_color(&mut self, color: &str) {
        let (parameters, name) = self.color_target_mut();
        parameters.set(name, color);
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Symbolizer::Point(point) => point
                .graphic
                .mark
                .fill
                .as_ref()
                .and_then(|f| f.parameters.get("fill")),
            Symbolizer::Line(line) => line.stroke.parameters.get("stroke"),
            Symbolizer::Polygon(polygon) => polygon.fill.parameters.get("fill"),
        }
    }

    pub(crate) fn normalize(&mut self) {
        match self {
            Symbolizer::Point(point) => {
                let mark = &mut point.graphic.mark;
                if let Some(fill) = mark.fill.as_mut() {
                    fill.parameters.normalize();
                }
                if let Some(stroke) = mark.stroke.as_mut() {
                    stroke.parameters.normalize();
                }
            }
            Symbolizer::Line(line) => line.stroke.parameters.normalize(),
            Symbolizer::Polygon(polygon) => {
                polygon.fill.parameters.normalize();
                if let Some(stroke) = polygon.stroke.as_mut() {
                    stroke.parameters.normalize();
                }
            }
        }
    }
}
