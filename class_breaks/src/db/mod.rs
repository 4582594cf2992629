//! Data source layer.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Services (classification adapter)           │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────▼───────────────────────┐
//! │  FeatureRepository trait (repository/)       │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────▼───────────────────────┐
//! │  LocalRepository (in-memory, repositories/)  │
//! └──────────────────────────────────────────────┘
//! ```

pub mod repositories;
pub mod repository;

pub use repositories::LocalRepository;
pub use repository::{FeatureRepository, RepositoryError, RepositoryResult};
