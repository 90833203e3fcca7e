//! Lock-guarded in-memory record table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::{
    domain::{AgentRecord, LivenessCutoff, ServiceId, ServiceRecord, ToolRecord},
    ports::{ServiceRepository, ServiceRepositoryError, ServiceRepositoryResult},
};

/// Thread-safe in-memory repository for one kind of record.
///
/// All records live behind a single `RwLock`. Eviction runs under the same
/// write guard as the operation that triggered it.
pub struct InMemoryServiceRepository<R> {
    state: Arc<RwLock<RecordTable<R>>>,
}

/// In-memory repository for agents.
pub type InMemoryAgentRepository = InMemoryServiceRepository<AgentRecord>;

/// In-memory repository for tools.
pub type InMemoryToolRepository = InMemoryServiceRepository<ToolRecord>;

struct RecordTable<R> {
    records: HashMap<ServiceId, R>,
}

impl<R: ServiceRecord> RecordTable<R> {
    fn evict_expired(&mut self, cutoff: LivenessCutoff) -> Vec<ServiceId> {
        let expired: Vec<ServiceId> = self
            .records
            .values()
            .filter(|record| !record.is_live(cutoff))
            .map(ServiceRecord::service_id)
            .collect();
        for id in &expired {
            self.records.remove(id);
        }
        if !expired.is_empty() {
            tracing::debug!(
                kind = %R::KIND,
                evicted = expired.len(),
                "evicted expired services"
            );
        }
        expired
    }
}

impl<R> InMemoryServiceRepository<R> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RecordTable {
                records: HashMap::new(),
            })),
        }
    }

    fn read(&self) -> ServiceRepositoryResult<RwLockReadGuard<'_, RecordTable<R>>> {
        self.state.read().map_err(|err| {
            ServiceRepositoryError::unavailable(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ServiceRepositoryResult<RwLockWriteGuard<'_, RecordTable<R>>> {
        self.state.write().map_err(|err| {
            ServiceRepositoryError::unavailable(std::io::Error::other(err.to_string()))
        })
    }

    /// Returns the number of stored records, live or not yet evicted.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRepositoryError::Unavailable`] when the lock is
    /// poisoned.
    pub fn stored_len(&self) -> ServiceRepositoryResult<usize> {
        Ok(self.read()?.records.len())
    }
}

impl<R> Default for InMemoryServiceRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for InMemoryServiceRepository<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<R> fmt::Debug for InMemoryServiceRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryServiceRepository")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<R: ServiceRecord> ServiceRepository<R> for InMemoryServiceRepository<R> {
    async fn upsert(&self, mut record: R, cutoff: LivenessCutoff) -> ServiceRepositoryResult<R> {
        let mut state = self.write()?;
        state.evict_expired(cutoff);
        if let Some(previous) = state.records.get(&record.service_id()) {
            record.touch(previous.seen_at());
        }
        state.records.insert(record.service_id(), record.clone());
        Ok(record)
    }

    async fn touch(
        &self,
        id: ServiceId,
        seen_at: DateTime<Utc>,
        cutoff: LivenessCutoff,
    ) -> ServiceRepositoryResult<Option<R>> {
        let mut state = self.write()?;
        state.evict_expired(cutoff);
        Ok(state.records.get_mut(&id).map(|record| {
            record.touch(seen_at);
            record.clone()
        }))
    }

    async fn find_live(
        &self,
        id: ServiceId,
        cutoff: LivenessCutoff,
    ) -> ServiceRepositoryResult<Option<R>> {
        let mut state = self.write()?;
        state.evict_expired(cutoff);
        Ok(state.records.get(&id).cloned())
    }

    async fn list_live(&self, cutoff: LivenessCutoff) -> ServiceRepositoryResult<Vec<R>> {
        let mut state = self.write()?;
        state.evict_expired(cutoff);
        Ok(state.records.values().cloned().collect())
    }

    async fn evict_expired(
        &self,
        cutoff: LivenessCutoff,
    ) -> ServiceRepositoryResult<Vec<ServiceId>> {
        let mut state = self.write()?;
        Ok(state.evict_expired(cutoff))
    }
}
