//! Parallel registrations and heartbeats against one registry.

use super::helpers::{Harness, agent_request, harness};
use rstest::rstest;
use std::sync::Arc;
use tokio::task::JoinSet;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_are_all_visible(harness: Harness) {
    let mut tasks = JoinSet::new();
    for index in 0..64 {
        let registry = Arc::clone(&harness.registry);
        tasks.spawn(async move {
            registry
                .register_agent(agent_request(&format!("agent-{index}"), &["load"]))
                .await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined
            .expect("task completes")
            .expect("registration succeeds");
    }

    let agents = harness.registry.list_agents().await.expect("list agents");
    assert_eq!(agents.len(), 64);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn heartbeats_interleaved_with_reads_never_lose_records(harness: Harness) {
    let agent = harness
        .registry
        .register_agent(agent_request("Echo", &[]))
        .await
        .expect("agent registers");

    let mut tasks = JoinSet::new();
    for _ in 0..32 {
        let registry = Arc::clone(&harness.registry);
        let id = agent.id();
        tasks.spawn(async move {
            registry.heartbeat_agent(id).await.map(|_| ())?;
            registry.get_agent(id).await.map(|_| ())
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined
            .expect("task completes")
            .expect("agent stays live");
    }
}
