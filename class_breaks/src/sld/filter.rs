//! OGC filter predicates.

use serde::Serialize;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOp {
    PropertyIsEqualTo,
    PropertyIsNotEqualTo,
    PropertyIsLessThan,
    PropertyIsLessThanOrEqualTo,
    PropertyIsGreaterThan,
    PropertyIsGreaterThanOrEqualTo,
}

impl ComparisonOp {
    /// Element name in the `ogc` namespace.
    pub fn element_name(&self) -> &'static str {
        match self {
            ComparisonOp::PropertyIsEqualTo => "PropertyIsEqualTo",
            ComparisonOp::PropertyIsNotEqualTo => "PropertyIsNotEqualTo",
            ComparisonOp::PropertyIsLessThan => "PropertyIsLessThan",
            ComparisonOp::PropertyIsLessThanOrEqualTo => "PropertyIsLessThanOrEqualTo",
            ComparisonOp::PropertyIsGreaterThan => "PropertyIsGreaterThan",
            ComparisonOp::PropertyIsGreaterThanOrEqualTo => "PropertyIsGreaterThanOrEqualTo",
        }
    }
}

/// `property <op> literal`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyCriterion {
    pub op: ComparisonOp,
    pub property_name: String,
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    Comparison(PropertyCriterion),
    And(Vec<Filter>),
}

impl Filter {
    pub fn comparison(op: ComparisonOp, property: &str, literal: &str) -> Self {
        Filter::Comparison(PropertyCriterion {
            op,
            property_name: property.to_string(),
            literal: literal.to_string(),
        })
    }

    pub fn greater_than(property: &str, literal: &str) -> Self {
        Self::comparison(ComparisonOp::PropertyIsGreaterThan, property, literal)
    }

    pub fn less_than_or_equal_to(property: &str, literal: &str) -> Self {
        Self::comparison(ComparisonOp::PropertyIsLessThanOrEqualTo, property, literal)
    }

    /// All comparisons in document order.
    pub fn criteria(&self) -> Vec<&PropertyCriterion> {
        match self {
            Filter::Comparison(criterion) => vec![criterion],
            Filter::And(children) => children.iter().flat_map(|c| c.criteria()).collect(),
        }
    }

    /// First comparison using `op`, if any.
    pub fn find(&self, op: ComparisonOp) -> Option<&PropertyCriterion> {
        self.criteria().into_iter().find(|c| c.op == op)
    }

    /// Flatten nested conjunctions and unwrap single-child ones.
    /// Returns `None` for an empty conjunction.
    pub fn normalized(self) -> Option<Filter> {
        match self {
            Filter::Comparison(_) => Some(self),
            Filter::And(children) => {
                let mut flat = Vec::with_capacity(children.len());
                for child in children.into_iter().filter_map(Filter::normalized) {
                    match child {
                        Filter::And(grandchildren) => flat.extend(grandchildren),
                        comparison => flat.push(comparison),
                    }
                }
                match flat.len() {
                    0 => None,
                    1 => flat.pop(),
                    _ => Some(Filter::And(flat)),
                }
            }
        }
    }
}

impl Add for Filter {
    type Output = Filter;

    /// Logical AND of two filters.
    fn add(self, rhs: Filter) -> Filter {
        Filter::And(vec![self, rhs])
    }
}
