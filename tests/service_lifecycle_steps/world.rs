//! Shared world state for service lifecycle BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use rstest::fixture;
use service_registry::registry::{
    domain::{AgentRecord, DiscoveryResult, ExpirationPolicy},
    services::{InMemoryServiceRegistry, RegistryServiceError},
};

/// Registry type used by the BDD world.
pub type TestRegistry = InMemoryServiceRegistry<ManualClock>;

/// Scenario world for lifecycle behaviour tests.
pub struct LifecycleWorld {
    /// Clock driving expiry.
    pub clock: ManualClock,
    /// The registry under test.
    pub registry: TestRegistry,
    /// Most recently registered agent.
    pub last_agent: Option<AgentRecord>,
    /// Result of the last discovery query.
    pub last_discovery: Option<DiscoveryResult>,
    /// Result of the last heartbeat attempt.
    pub last_heartbeat: Option<Result<AgentRecord, RegistryServiceError>>,
}

impl LifecycleWorld {
    /// Creates a world around an empty registry with default expiration.
    #[must_use]
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let registry = TestRegistry::in_memory(Arc::new(clock.clone()), ExpirationPolicy::default());
        Self {
            clock,
            registry,
            last_agent: None,
            last_discovery: None,
            last_heartbeat: None,
        }
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
