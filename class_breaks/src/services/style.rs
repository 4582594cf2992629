//! Style assembler: class edges in, normalized style document out.
//!
//! ```text
//! bins[0]  ──►  Rule "<= b0"   value <= b0                 shade #000000
//! bins[1]  ──►  Rule "<= b1"   value > b0 AND value <= b1  shade ...
//!   ...
//! bins[k-1] ─►  Rule "<= bk"   value > bk-1 AND value <= bk shade #ffffff
//! ```

use crate::models::{ClassificationResult, GeometryKind};
use crate::sld::{Filter, StyledLayerDescriptor};

/// Grey level for class `index` out of `k` classes.
///
/// Levels spread linearly from 0 to 255. A single class is drawn at 0.
pub fn shade_for(index: usize, k: usize) -> u8 {
    if k <= 1 {
        return 0;
    }
    let fraction = index.min(k - 1) as f64 / (k - 1) as f64;
    (fraction * 255.0) as u8
}

/// `#rrggbb` grey for class `index` out of `k` classes.
pub fn shade_hex(index: usize, k: usize) -> String {
    let level = shade_for(index, k);
    format!("#{:02x}{:02x}{:02x}", level, level, level)
}

/// Text form of a class edge, as used in rule titles and filter literals.
///
/// Values are rounded to 12 significant digits, which hides the noise left
/// by floating point edge arithmetic (`1440.6000000000001` prints as
/// `1440.6`). Integral values keep a trailing `.0`.
///
/// Two distinct edges that agree to 12 significant digits print the same
/// literal, so the rule between them reads `> x AND <= x` and matches no
/// feature. The class and its shade are still emitted.
pub fn format_literal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.11e}", value)
        .parse::<f64>()
        .unwrap_or(value);
    let mut text = rounded.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Build the style document for a classification.
///
/// Produces one rule per class edge. The first rule has only an upper
/// bound; every later rule is bounded below (exclusive) by the previous
/// edge and above (inclusive) by its own. An empty result produces a
/// document without rules. The document is normalized before it is
/// returned.
pub fn assemble(
    result: &ClassificationResult,
    kind: GeometryKind,
    layer_name: &str,
    property_name: &str,
    style_title: Option<&str>,
    style_name: Option<&str>,
) -> StyledLayerDescriptor {
    let mut sld = StyledLayerDescriptor::new();
    let fts = sld
        .create_named_layer(layer_name)
        .create_user_style(style_title)
        .create_feature_type_style(style_name);

    let edges = result.edges();
    let k = result.k.min(edges.len());
    for i in 0..k {
        let upper = format_literal(edges[i]);
        let rule = fts.create_rule(&format!("<= {}", upper), kind);
        rule.symbolizer.set_color(&shade_hex(i, k));

        let high = Filter::less_than_or_equal_to(property_name, &upper);
        let filter = if i == 0 {
            high
        } else {
            Filter::greater_than(property_name, &format_literal(edges[i - 1])) + high
        };
        rule.set_filter(filter);
    }

    sld.normalize();
    sld
}
