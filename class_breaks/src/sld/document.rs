//! The styled layer document tree and its builder API.
//!
//! Ownership is strictly hierarchical: the document owns one named layer,
//! which owns one user style, which owns one feature type style, which owns
//! the rules. Each `create_*` call replaces the child at that level and
//! hands back a mutable reference to it.

use serde::Serialize;

use super::filter::Filter;
use super::symbolizer::Symbolizer;
use super::xml;
use crate::models::GeometryKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub title: String,
    pub filter: Option<Filter>,
    pub symbolizer: Symbolizer,
}

impl Rule {
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = Some(filter);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FeatureTypeStyle {
    pub name: Option<String>,
    pub rules: Vec<Rule>,
}

impl FeatureTypeStyle {
    /// Append a rule drawn with the default symbolizer for `kind`.
    pub fn create_rule(&mut self, title: &str, kind: GeometryKind) -> &mut Rule {
        self.rules.push(Rule {
            title: title.to_string(),
            filter: None,
            symbolizer: Symbolizer::for_kind(kind),
        });
        let last = self.rules.len() - 1;
        &mut self.rules[last]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UserStyle {
    pub title: Option<String>,
    pub feature_type_style: Option<FeatureTypeStyle>,
}

impl UserStyle {
    pub fn create_feature_type_style(&mut self, name: Option<&str>) -> &mut FeatureTypeStyle {
        self.feature_type_style.insert(FeatureTypeStyle {
            name: name.map(str::to_string),
            rules: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedLayer {
    pub name: String,
    pub user_style: Option<UserStyle>,
}

impl NamedLayer {
    pub fn create_user_style(&mut self, title: Option<&str>) -> &mut UserStyle {
        self.user_style.insert(UserStyle {
            title: title.map(str::to_string),
            feature_type_style: None,
        })
    }
}

/// Root of a style document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StyledLayerDescriptor {
    named_layer: Option<NamedLayer>,
    #[serde(skip)]
    normalized: bool,
}

impl StyledLayerDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_named_layer(&mut self, name: &str) -> &mut NamedLayer {
        self.normalized = false;
        self.named_layer.insert(NamedLayer {
            name: name.to_string(),
            user_style: None,
        })
    }

    pub fn named_layer(&self) -> Option<&NamedLayer> {
        self.named_layer.as_ref()
    }

    /// Mutable access to the layer tree. The document counts as not
    /// normalized until `normalize` runs again.
    pub fn named_layer_mut(&mut self) -> Option<&mut NamedLayer> {
        self.normalized = false;
        self.named_layer.as_mut()
    }

    pub fn feature_type_style(&self) -> Option<&FeatureTypeStyle> {
        self.named_layer
            .as_ref()?
            .user_style
            .as_ref()?
            .feature_type_style
            .as_ref()
    }

    /// Rules of the document; empty when no feature type style exists.
    pub fn rules(&self) -> &[Rule] {
        self.feature_type_style()
            .map(|fts| fts.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Bring the tree into the structure the output format expects.
    ///
    /// Conjunctions are flattened (a one-child conjunction becomes its
    /// child), CSS parameters are deduplicated and put in canonical order,
    /// and blank titles or names are dropped. Running it twice changes
    /// nothing.
    pub fn normalize(&mut self) {
        if let Some(layer) = self.named_layer.as_mut() {
            if let Some(style) = layer.user_style.as_mut() {
                style.title = style.title.take().filter(|t| !t.trim().is_empty());
                if let Some(fts) = style.feature_type_style.as_mut() {
                    fts.name = fts.name.take().filter(|n| !n.trim().is_empty());
                    for rule in &mut fts.rules {
                        rule.filter = rule.filter.take().and_then(Filter::normalized);
                        rule.symbolizer.normalize();
                    }
                }
            }
        }
        self.normalized = true;
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Serialize as an SLD 1.0.0 XML document.
    pub fn to_xml(&self) -> String {
        xml::write_document(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
