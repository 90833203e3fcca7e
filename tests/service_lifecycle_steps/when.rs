//! When steps for service lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use service_registry::registry::domain::ServiceQuery;

#[when("{seconds:usize} seconds pass")]
fn seconds_pass(world: &mut LifecycleWorld, seconds: usize) -> Result<(), eyre::Report> {
    let delta = i64::try_from(seconds).wrap_err("elapsed seconds fit in i64")?;
    world.clock.advance(delta);
    Ok(())
}

#[when("the agent sends a heartbeat")]
fn agent_sends_heartbeat(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let agent = world
        .last_agent
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no registered agent in scenario world"))?;
    world.last_heartbeat = Some(run_async(world.registry.heartbeat_agent(agent.id())));
    Ok(())
}

#[when(r#"discovering tools of type "{tool_type}""#)]
fn discovering_tools(world: &mut LifecycleWorld, tool_type: String) -> Result<(), eyre::Report> {
    let query = ServiceQuery::new().with_tool_type(tool_type);
    let result = run_async(world.registry.discover(&query)).wrap_err("discover tools")?;
    world.last_discovery = Some(result);
    Ok(())
}
