//! Shared fixtures for in-memory registry integration tests.

use crate::test_helpers::ManualClock;
use rstest::fixture;
use service_registry::registry::{
    domain::ExpirationPolicy,
    services::{
        EndpointRequest, InMemoryServiceRegistry, RegisterAgentRequest, RegisterToolRequest,
        ServiceDetails,
    },
};
use std::sync::Arc;

/// Registry type exercised by the integration tests.
pub type TestRegistry = InMemoryServiceRegistry<ManualClock>;

/// A registry paired with the clock that drives it.
pub struct Harness {
    /// Clock shared with the registry.
    pub clock: ManualClock,
    /// Registry under test.
    pub registry: Arc<TestRegistry>,
}

/// Provides a registry with the default 120 second expiration.
#[fixture]
pub fn harness() -> Harness {
    let clock = ManualClock::new();
    let registry = Arc::new(TestRegistry::in_memory(
        Arc::new(clock.clone()),
        ExpirationPolicy::default(),
    ));
    Harness { clock, registry }
}

/// Builds an agent registration with the given capabilities.
pub fn agent_request(name: &str, capabilities: &[&str]) -> RegisterAgentRequest {
    RegisterAgentRequest::new(ServiceDetails::new(
        name,
        format!("{name} agent"),
        "1.0.0",
        "agents.local",
        8001,
    ))
    .with_capabilities(capabilities.iter().map(|tag| (*tag).to_owned()))
}

/// Builds a tool registration with one POST endpoint.
pub fn tool_request(name: &str, tool_type: &str) -> RegisterToolRequest {
    RegisterToolRequest::new(
        ServiceDetails::new(name, format!("{name} tool"), "1.0.0", "tools.local", 8002),
        tool_type,
    )
    .with_endpoint("invoke", EndpointRequest::new("/invoke", "POST"))
}
