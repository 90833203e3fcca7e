//! Given steps for service lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use service_registry::registry::services::{
    RegisterAgentRequest, RegisterToolRequest, ServiceDetails,
};

#[given(r#"a registered agent named "{name}" with capability "{capability}""#)]
fn registered_agent(
    world: &mut LifecycleWorld,
    name: String,
    capability: String,
) -> Result<(), eyre::Report> {
    let request =
        RegisterAgentRequest::new(ServiceDetails::new(name, "", "1.0.0", "agents.local", 8001))
            .with_capabilities(vec![capability]);
    let agent = run_async(world.registry.register_agent(request))
        .wrap_err("register agent for scenario")?;
    world.last_agent = Some(agent);
    Ok(())
}

#[given(r#"a registered tool named "{name}" of type "{tool_type}""#)]
fn registered_tool(
    world: &mut LifecycleWorld,
    name: String,
    tool_type: String,
) -> Result<(), eyre::Report> {
    let request = RegisterToolRequest::new(
        ServiceDetails::new(name, "", "1.0.0", "tools.local", 8002),
        tool_type,
    );
    run_async(world.registry.register_tool(request)).wrap_err("register tool for scenario")?;
    Ok(())
}
