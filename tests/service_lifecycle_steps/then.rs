//! Then steps for service lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use rstest_bdd_macros::then;
use service_registry::registry::services::RegistryServiceError;

#[then("discovery returns {agents:usize} agents and {tools:usize} tools")]
fn discovery_returns(
    world: &LifecycleWorld,
    agents: usize,
    tools: usize,
) -> Result<(), eyre::Report> {
    let result = world
        .last_discovery
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing discovery result in scenario world"))?;
    if result.agents().len() != agents || result.tools().len() != tools {
        return Err(eyre::eyre!(
            "expected {agents} agents and {tools} tools, found {} and {}",
            result.agents().len(),
            result.tools().len()
        ));
    }
    Ok(())
}

#[then("the heartbeat succeeded")]
fn heartbeat_succeeded(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_heartbeat {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected accepted heartbeat, got {other:?}")),
    }
}

#[then("the heartbeat is rejected as not found")]
fn heartbeat_rejected(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_heartbeat {
        Some(Err(RegistryServiceError::NotFound { .. })) => Ok(()),
        other => Err(eyre::eyre!("expected NotFound heartbeat, got {other:?}")),
    }
}

#[then(r#"the agent "{name}" is listed"#)]
fn agent_is_listed(world: &LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let agents = run_async(world.registry.list_agents())
        .map_err(|err| eyre::eyre!("list_agents failed: {err}"))?;
    if !agents.iter().any(|agent| agent.profile().name() == name) {
        return Err(eyre::eyre!("expected agent '{name}' to be listed"));
    }
    Ok(())
}

#[then("{count:usize} agents are listed")]
fn agents_listed(world: &LifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let agents = run_async(world.registry.list_agents())
        .map_err(|err| eyre::eyre!("list_agents failed: {err}"))?;
    if agents.len() != count {
        return Err(eyre::eyre!(
            "expected {count} agents, found {}",
            agents.len()
        ));
    }
    Ok(())
}
