//! Concrete repository implementations.

pub mod local;

pub use local::LocalRepository;

#[cfg(test)]
mod local_tests;
