//! SLD 1.0.0 XML serialization.

use std::fmt::Write;

use super::document::{FeatureTypeStyle, NamedLayer, Rule, StyledLayerDescriptor, UserStyle};
use super::filter::Filter;
use super::symbolizer::{CssParameters, Fill, Stroke, Symbolizer};

pub const SLD_NAMESPACE: &str = "http://www.opengis.net/sld";
pub const OGC_NAMESPACE: &str = "http://www.opengis.net/ogc";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://www.opengis.net/sld http://schemas.opengis.net/sld/1.0.0/StyledLayerDescriptor.xsd";

/// Escape text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            out: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.attributes(attrs);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        // Writing to a String cannot fail.
        let _ = writeln!(self.out, "</{}>", tag);
    }

    fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.attributes(attrs);
        let _ = writeln!(self.out, ">{}</{}>", escape(text), tag);
    }

    fn attributes(&mut self, attrs: &[(&str, &str)]) {
        for (name, value) in attrs {
            let _ = write!(self.out, " {}=\"{}\"", name, escape(value));
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

pub fn write_document(sld: &StyledLayerDescriptor) -> String {
    let mut w = XmlWriter::new();
    w.open(
        "sld:StyledLayerDescriptor",
        &[
            ("xmlns:sld", SLD_NAMESPACE),
            ("xmlns:ogc", OGC_NAMESPACE),
            ("xmlns:xlink", XLINK_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("version", "1.0.0"),
            ("xsi:schemaLocation", SCHEMA_LOCATION),
        ],
    );
    if let Some(layer) = sld.named_layer() {
        write_named_layer(&mut w, layer);
    }
    w.close("sld:StyledLayerDescriptor");
    w.finish()
}

fn write_named_layer(w: &mut XmlWriter, layer: &NamedLayer) {
    w.open("sld:NamedLayer", &[]);
    w.leaf("sld:Name", &[], &layer.name);
    if let Some(style) = &layer.user_style {
        write_user_style(w, style);
    }
    w.close("sld:NamedLayer");
}

fn write_user_style(w: &mut XmlWriter, style: &UserStyle) {
    w.open("sld:UserStyle", &[]);
    if let Some(title) = &style.title {
        w.leaf("sld:Title", &[], title);
    }
    if let Some(fts) = &style.feature_type_style {
        write_feature_type_style(w, fts);
    }
    w.close("sld:UserStyle");
}

fn write_feature_type_style(w: &mut XmlWriter, fts: &FeatureTypeStyle) {
    w.open("sld:FeatureTypeStyle", &[]);
    if let Some(name) = &fts.name {
        w.leaf("sld:Name", &[], name);
    }
    for rule in &fts.rules {
        write_rule(w, rule);
    }
    w.close("sld:FeatureTypeStyle");
}

fn write_rule(w: &mut XmlWriter, rule: &Rule) {
    w.open("sld:Rule", &[]);
    w.leaf("sld:Title", &[], &rule.title);
    if let Some(filter) = &rule.filter {
        w.open("ogc:Filter", &[]);
        write_filter(w, filter);
        w.close("ogc:Filter");
    }
    write_symbolizer(w, &rule.symbolizer);
    w.close("sld:Rule");
}

fn write_filter(w: &mut XmlWriter, filter: &Filter) {
    match filter {
        Filter::Comparison(criterion) => {
            let tag = format!("ogc:{}", criterion.op.element_name());
            w.open(&tag, &[]);
            w.leaf("ogc:PropertyName", &[], &criterion.property_name);
            w.leaf("ogc:Literal", &[], &criterion.literal);
            w.close(&tag);
        }
        Filter::And(children) => {
            w.open("ogc:And", &[]);
            for child in children {
                write_filter(w, child);
            }
            w.close("ogc:And");
        }
    }
}

fn write_symbolizer(w: &mut XmlWriter, symbolizer: &Symbolizer) {
    match symbolizer {
        Symbolizer::Point(point) => {
            w.open("sld:PointSymbolizer", &[]);
            w.open("sld:Graphic", &[]);
            let mark = &point.graphic.mark;
            w.open("sld:Mark", &[]);
            w.leaf("sld:WellKnownName", &[], &mark.well_known_name);
            if let Some(fill) = &mark.fill {
                write_fill(w, fill);
            }
            if let Some(stroke) = &mark.stroke {
                write_stroke(w, stroke);
            }
            w.close("sld:Mark");
            if let Some(size) = point.graphic.size {
                w.leaf("sld:Size", &[], &size.to_string());
            }
            w.close("sld:Graphic");
            w.close("sld:PointSymbolizer");
        }
        Symbolizer::Line(line) => {
            w.open("sld:LineSymbolizer", &[]);
            write_stroke(w, &line.stroke);
            w.close("sld:LineSymbolizer");
        }
        Symbolizer::Polygon(polygon) => {
            w.open("sld:PolygonSymbolizer", &[]);
            write_fill(w, &polygon.fill);
            if let Some(stroke) = &polygon.stroke {
                write_stroke(w, stroke);
            }
            w.close("sld:PolygonSymbolizer");
        }
    }
}

fn write_fill(w: &mut XmlWriter, fill: &Fill) {
    w.open("sld:Fill", &[]);
    write_parameters(w, &fill.parameters);
    w.close("sld:Fill");
}

fn write_stroke(w: &mut XmlWriter, stroke: &Stroke) {
    w.open("sld:Stroke", &[]);
    write_parameters(w, &stroke.parameters);
    w.close("sld:Stroke");
}

fn write_parameters(w: &mut XmlWriter, parameters: &CssParameters) {
    for param in parameters.iter() {
        w.leaf("sld:CssParameter", &[("name", &param.name)], &param.value);
    }
}
