//! # Class Breaks
//!
//! Generate class-break map styles (SLD 1.0.0) from numeric attributes of
//! layered feature data.
//!
//! A request names a layer, a numeric value column (possibly reached
//! through relations, e.g. `pipeline__reservoir__volume`), a geometry
//! column and a classification scheme. The values are classified and every
//! class becomes one rule: a grey shade from black to white on a symbolizer
//! matching the geometry type, plus a range filter that is exclusive below
//! and inclusive above.
//!
//! ## Architecture
//!
//! - [`models`]: Requests, classifier options, field types and query descriptions
//! - [`db`]: Repository trait and the in-memory repository
//! - [`algorithms`]: Classification schemes (equal interval, quantiles, Jenks, ...)
//! - [`sld`]: Style document tree and XML output
//! - [`services`]: The classification-to-style pipeline
//! - [`config`]: TOML configuration of request defaults
//! - [`parsing`]: JSON dataset loader
//!
//! ## Example
//!
//! ```no_run
//! use class_breaks::db::LocalRepository;
//! use class_breaks::models::SourceQuery;
//! use class_breaks::services::as_quantiles;
//!
//! let repo = LocalRepository::new();
//! // ... create layers and insert records ...
//! let sld = as_quantiles(&repo, SourceQuery::new("hydrant"), "pressure", 5)
//!     .expect("Failed to generate style");
//! println!("{}", sld.to_xml());
//! ```

// Allow large error types - RepositoryError carries layer and field names
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;
pub mod sld;

pub use error::{GeneratorError, GeneratorResult};
