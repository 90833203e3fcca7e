//! Discovery queries and eviction sweeps over both record collections.

use super::registry::{RegistryServiceResult, ServiceRegistry, report_store_failure};
use crate::registry::{
    domain::{AgentRecord, DiscoveryResult, ServiceKind, ServiceQuery, ToolRecord},
    ports::ServiceRepository,
};
use mockable::Clock;

/// Number of records removed by one eviction sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    agents: usize,
    tools: usize,
}

impl SweepReport {
    /// Creates a report from per-kind eviction counts.
    #[must_use]
    pub const fn new(agents: usize, tools: usize) -> Self {
        Self { agents, tools }
    }

    /// Returns the number of agents evicted.
    #[must_use]
    pub const fn agents(&self) -> usize {
        self.agents
    }

    /// Returns the number of tools evicted.
    #[must_use]
    pub const fn tools(&self) -> usize {
        self.tools
    }

    /// Returns the total number of records evicted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.agents + self.tools
    }
}

impl<A, T, C> ServiceRegistry<A, T, C>
where
    A: ServiceRepository<AgentRecord>,
    T: ServiceRepository<ToolRecord>,
    C: Clock + Send + Sync,
{
    /// Returns the live services matching `query`.
    ///
    /// Kinds excluded by `service_type` are not read at all and come back as
    /// empty sequences.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`](super::RegistryServiceError::Repository)
    /// when a store is unavailable.
    pub async fn discover(&self, query: &ServiceQuery) -> RegistryServiceResult<DiscoveryResult> {
        let cutoff = self.cutoff();

        let mut agents = Vec::new();
        if query.includes(ServiceKind::Agent) {
            agents = self
                .agents
                .list_live(cutoff)
                .await
                .inspect_err(|err| report_store_failure(ServiceKind::Agent, err))?;
            agents.retain(|agent| query.matches_agent(agent));
        }

        let mut tools = Vec::new();
        if query.includes(ServiceKind::Tool) {
            tools = self
                .tools
                .list_live(cutoff)
                .await
                .inspect_err(|err| report_store_failure(ServiceKind::Tool, err))?;
            tools.retain(|tool| query.matches_tool(tool));
        }

        tracing::debug!(
            agents = agents.len(),
            tools = tools.len(),
            "discovery query answered"
        );
        Ok(DiscoveryResult::new(agents, tools))
    }

    /// Evicts every expired agent and tool.
    ///
    /// Queries observe the same live set before and after a sweep.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`](super::RegistryServiceError::Repository)
    /// when a store is unavailable.
    pub async fn sweep(&self) -> RegistryServiceResult<SweepReport> {
        let cutoff = self.cutoff();
        let agents = self
            .agents
            .evict_expired(cutoff)
            .await
            .inspect_err(|err| report_store_failure(ServiceKind::Agent, err))?;
        let tools = self
            .tools
            .evict_expired(cutoff)
            .await
            .inspect_err(|err| report_store_failure(ServiceKind::Tool, err))?;

        let report = SweepReport::new(agents.len(), tools.len());
        tracing::debug!(
            agents = report.agents(),
            tools = report.tools(),
            "liveness sweep finished"
        );
        Ok(report)
    }
}
