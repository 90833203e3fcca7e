//! Heartbeat-driven liveness and eviction through the public service API.

use super::helpers::{Harness, agent_request, harness, tool_request};
use rstest::rstest;
use service_registry::registry::{domain::ServiceQuery, services::RegistryServiceError};

#[rstest]
#[case(0, true)]
#[case(60, true)]
#[case(119, true)]
#[case(120, false)]
#[case(121, false)]
#[tokio::test(flavor = "multi_thread")]
async fn agent_visibility_follows_expiration_boundary(
    harness: Harness,
    #[case] elapsed: i64,
    #[case] visible: bool,
) {
    let agent = harness
        .registry
        .register_agent(agent_request("Echo", &["echo"]))
        .await
        .expect("agent registers");

    harness.clock.advance(elapsed);

    let listed = harness.registry.list_agents().await.expect("list agents");
    let discovered = harness
        .registry
        .discover(&ServiceQuery::new())
        .await
        .expect("discover succeeds");
    let fetched = harness.registry.get_agent(agent.id()).await;

    assert_eq!(listed.len() == 1, visible);
    assert_eq!(discovered.agents().len() == 1, visible);
    assert_eq!(fetched.is_ok(), visible);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn regular_heartbeats_keep_a_tool_alive_indefinitely(harness: Harness) {
    let tool = harness
        .registry
        .register_tool(tool_request("Calculator", "calculator"))
        .await
        .expect("tool registers");

    for _ in 0..20 {
        harness.clock.advance(20);
        harness
            .registry
            .heartbeat_tool(tool.id())
            .await
            .expect("heartbeat accepted");
    }

    let fetched = harness
        .registry
        .get_tool(tool.id())
        .await
        .expect("tool still live");
    assert_eq!(fetched.last_seen(), tool.last_seen() + chrono::TimeDelta::seconds(400));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_service_must_register_again(harness: Harness) {
    let agent = harness
        .registry
        .register_agent(agent_request("Echo", &[]))
        .await
        .expect("agent registers");

    harness.clock.advance(150);
    let heartbeat = harness.registry.heartbeat_agent(agent.id()).await;
    assert!(matches!(
        heartbeat,
        Err(RegistryServiceError::NotFound { .. })
    ));
    assert!(harness.registry.list_agents().await.expect("list").is_empty());

    let again = harness
        .registry
        .register_agent(agent_request("Echo", &[]))
        .await
        .expect("re-registration succeeds");
    harness
        .registry
        .heartbeat_agent(again.id())
        .await
        .expect("heartbeat after re-registration");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_does_not_change_observed_state(harness: Harness) {
    let registry = &harness.registry;
    registry
        .register_agent(agent_request("Stale", &[]))
        .await
        .expect("agent registers");
    harness.clock.advance(90);
    registry
        .register_agent(agent_request("Fresh", &[]))
        .await
        .expect("agent registers");
    harness.clock.advance(40);

    let before = registry.list_agents().await.expect("list agents");
    let report = registry.sweep().await.expect("sweep succeeds");
    let after = registry.list_agents().await.expect("list agents");

    assert_eq!(before, after);
    assert_eq!(report.total(), 0, "the read already evicted the stale agent");
    assert_eq!(
        registry
            .agent_repository()
            .stored_len()
            .expect("store readable"),
        1
    );
}
