//! Repository port for registered services and their liveness.

use crate::registry::domain::{LivenessCutoff, ServiceId, ServiceRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for service repository operations.
pub type ServiceRepositoryResult<T> = Result<T, ServiceRepositoryError>;

/// Storage contract for one kind of service record.
///
/// Every operation takes the [`LivenessCutoff`] computed by the caller and
/// evicts records at or before it in the same critical section as the
/// operation itself, so no caller ever observes a dead record.
#[async_trait]
pub trait ServiceRepository<R: ServiceRecord>: Send + Sync {
    /// Inserts or fully replaces the record with the same identifier.
    ///
    /// A live prior record with a later `last_seen` keeps that timestamp on
    /// the replacement. Returns the record as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRepositoryError::Unavailable`] when the store cannot
    /// be accessed.
    async fn upsert(&self, record: R, cutoff: LivenessCutoff) -> ServiceRepositoryResult<R>;

    /// Advances `last_seen` of a live record to `seen_at`.
    ///
    /// Returns `None` when the record is absent or expired. Expired records
    /// are evicted and never re-created.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRepositoryError::Unavailable`] when the store cannot
    /// be accessed.
    async fn touch(
        &self,
        id: ServiceId,
        seen_at: DateTime<Utc>,
        cutoff: LivenessCutoff,
    ) -> ServiceRepositoryResult<Option<R>>;

    /// Finds a live record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRepositoryError::Unavailable`] when the store cannot
    /// be accessed.
    async fn find_live(
        &self,
        id: ServiceId,
        cutoff: LivenessCutoff,
    ) -> ServiceRepositoryResult<Option<R>>;

    /// Returns every live record in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRepositoryError::Unavailable`] when the store cannot
    /// be accessed.
    async fn list_live(&self, cutoff: LivenessCutoff) -> ServiceRepositoryResult<Vec<R>>;

    /// Removes every expired record and returns the evicted identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRepositoryError::Unavailable`] when the store cannot
    /// be accessed.
    async fn evict_expired(&self, cutoff: LivenessCutoff)
    -> ServiceRepositoryResult<Vec<ServiceId>>;
}

/// Errors returned by service repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ServiceRepositoryError {
    /// The backing store is inaccessible.
    #[error("service store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceRepositoryError {
    /// Wraps an infrastructure failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
