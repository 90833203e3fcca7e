//! Shared state handed to every request handler.

use crate::registry::domain::{AgentRecord, ToolRecord};
use crate::registry::ports::ServiceRepository;
use crate::registry::services::ServiceRegistry;
use mockable::Clock;
use std::sync::Arc;

/// Application state shared by the HTTP handlers.
pub struct AppState<A, T, C>
where
    A: ServiceRepository<AgentRecord>,
    T: ServiceRepository<ToolRecord>,
    C: Clock + Send + Sync,
{
    /// Registry service answering every route.
    pub registry: Arc<ServiceRegistry<A, T, C>>,

    /// Clock used for response timestamps.
    pub clock: Arc<C>,

    /// Registry version reported by the banner route.
    pub version: String,
}

impl<A, T, C> AppState<A, T, C>
where
    A: ServiceRepository<AgentRecord>,
    T: ServiceRepository<ToolRecord>,
    C: Clock + Send + Sync,
{
    /// Creates application state around a registry and its clock.
    #[must_use]
    pub fn new(registry: Arc<ServiceRegistry<A, T, C>>, clock: Arc<C>) -> Self {
        Self {
            registry,
            clock,
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl<A, T, C> Clone for AppState<A, T, C>
where
    A: ServiceRepository<AgentRecord>,
    T: ServiceRepository<ToolRecord>,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            clock: Arc::clone(&self.clock),
            version: self.version.clone(),
        }
    }
}
