//! Port contracts for registry storage.
//!
//! Ports define infrastructure-agnostic interfaces used by registry services.

pub mod repository;

pub use repository::{ServiceRepository, ServiceRepositoryError, ServiceRepositoryResult};
