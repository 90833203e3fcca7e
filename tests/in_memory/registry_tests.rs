//! In-memory integration tests for registration, lookup, and listing.

use super::helpers::{Harness, agent_request, harness, tool_request};
use rstest::rstest;
use serde_json::json;
use service_registry::registry::{
    domain::{ServiceId, ServiceQuery},
    services::{RegisterAgentRequest, RegistryServiceError, ServiceDetails},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_agents_and_tools_then_list(harness: Harness) {
    let registry = &harness.registry;
    registry
        .register_agent(agent_request("Echo", &["echo"]))
        .await
        .expect("first agent registers");
    registry
        .register_agent(agent_request("Math", &["math"]))
        .await
        .expect("second agent registers");
    registry
        .register_tool(tool_request("Calculator", "calculator"))
        .await
        .expect("tool registers");

    let agents = registry.list_agents().await.expect("list agents");
    let tools = registry.list_tools().await.expect("list tools");

    let mut names: Vec<&str> = agents.iter().map(|a| a.profile().name()).collect();
    names.sort_unstable();
    assert_eq!(names, ["Echo", "Math"]);
    assert_eq!(tools.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_names_are_distinct_records(harness: Harness) {
    let registry = &harness.registry;
    let first = registry
        .register_agent(agent_request("Echo", &[]))
        .await
        .expect("first registers");
    let second = registry
        .register_agent(agent_request("Echo", &[]))
        .await
        .expect("second registers");

    assert_ne!(first.id(), second.id());
    assert_eq!(registry.list_agents().await.expect("list agents").len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn idempotent_replace_keeps_one_record(harness: Harness) {
    let registry = &harness.registry;
    let id = ServiceId::new();
    let request = RegisterAgentRequest::new(
        ServiceDetails::new("Echo", "", "1.0.0", "h", 1).with_id(id.to_string()),
    );

    for _ in 0..3 {
        registry
            .register_agent(request.clone())
            .await
            .expect("registration succeeds");
    }

    let agents = registry.list_agents().await.expect("list agents");
    assert_eq!(agents.len(), 1);
    assert_eq!(agents.first().map(|a| a.id()), Some(id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn metadata_and_schema_pass_through_unmodified(harness: Harness) {
    let registry = &harness.registry;
    let metadata = json!({"creator": "Example Framework", "tags": [1, 2]});
    let schema = json!({"openapi": "3.0.0", "paths": {"/invoke": {}}});
    let metadata_map = metadata.as_object().cloned().expect("object literal");

    let request = tool_request("Calculator", "calculator").with_schema(schema.clone());
    let tool = registry
        .register_tool(request)
        .await
        .expect("tool registers");
    let agent = registry
        .register_agent(RegisterAgentRequest::new(
            ServiceDetails::new("Echo", "", "1", "h", 1).with_metadata(metadata_map.clone()),
        ))
        .await
        .expect("agent registers");

    assert_eq!(tool.schema(), &schema);
    assert_eq!(agent.profile().metadata(), &metadata_map);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discovery_combines_filters_with_and(harness: Harness) {
    let registry = &harness.registry;
    registry
        .register_agent(agent_request("Math Tutor", &["math", "chat"]))
        .await
        .expect("agent registers");
    registry
        .register_agent(agent_request("Math Solver", &["math"]))
        .await
        .expect("agent registers");
    registry
        .register_agent(agent_request("Chat Bot", &["chat"]))
        .await
        .expect("agent registers");

    let query = ServiceQuery::new()
        .with_name("math")
        .with_capabilities(vec!["chat".to_owned()]);
    let result = registry.discover(&query).await.expect("discover succeeds");

    let names: Vec<&str> = result.agents().iter().map(|a| a.profile().name()).collect();
    assert_eq!(names, ["Math Tutor"]);
    assert!(result.tools().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookup_of_unknown_id_is_not_found(harness: Harness) {
    let result = harness.registry.get_agent(ServiceId::new()).await;
    assert!(matches!(result, Err(RegistryServiceError::NotFound { .. })));
}
