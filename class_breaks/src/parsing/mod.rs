//! Parsers for input data files.
//!
//! - [`dataset`]: Load JSON layer datasets into a [`crate::db::LocalRepository`]

pub mod dataset;

#[cfg(test)]
mod dataset_tests;

pub use dataset::{load_dataset, load_dataset_str, load_into};
