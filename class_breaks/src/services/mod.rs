//! Service layer: the classification-to-style pipeline.
//!
//! Services sit between the repository and the callers (library users and
//! the command line tool). They read from a [`crate::db::FeatureRepository`],
//! run a classifier and assemble the style document.

pub mod classification;
pub mod generator;
pub mod style;

pub use classification::build_classification;
pub use generator::{
    as_equal_interval, as_fisher_jenks, as_jenks_caspall, as_jenks_caspall_forced,
    as_jenks_caspall_sampled, as_max_p_classifier, as_maximum_breaks, as_natural_breaks,
    as_quantiles, generate, layer_name,
};
pub use style::{assemble, format_literal, shade_for, shade_hex};
