//! Repository trait definitions for data source access.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`feature`]: Schema introspection and ordered value retrieval
//!
//! Services take `&dyn FeatureRepository` (or a generic bound), so any
//! backend exposing the same queries can feed the classification pipeline:
//!
//! ```ignore
//! fn my_service<R: FeatureRepository + ?Sized>(repo: &R) -> RepositoryResult<usize> {
//!     repo.count(&SourceQuery::new("hydrant"))
//! }
//! ```

pub mod error;
pub mod feature;

pub use error::{RepositoryError, RepositoryResult};
pub use feature::FeatureRepository;
