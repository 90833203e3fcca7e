//! Registration, heartbeat, and lookup orchestration.

use super::requests::{EndpointParts, RegisterAgentRequest, RegisterToolRequest, ServiceDetails};
use crate::registry::{
    adapters::memory::{InMemoryAgentRepository, InMemoryToolRepository},
    domain::{
        AgentRecord, ExpirationPolicy, LivenessCutoff, RegistryDomainError, ServiceId,
        ServiceKind, ServiceProfile, ServiceRecord, ToolEndpoint, ToolRecord,
    },
    ports::{ServiceRepository, ServiceRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for registry operations.
#[derive(Debug, Error)]
pub enum RegistryServiceError {
    /// Registration payload failed validation.
    #[error(transparent)]
    Domain(#[from] RegistryDomainError),

    /// No live service of this kind has the identifier.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of service that was looked up.
        kind: ServiceKind,
        /// Identifier that was looked up.
        id: ServiceId,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ServiceRepositoryError),
}

/// Result type for registry service operations.
pub type RegistryServiceResult<T> = Result<T, RegistryServiceError>;

/// Registry service backed by in-memory repositories.
pub type InMemoryServiceRegistry<C> =
    ServiceRegistry<InMemoryAgentRepository, InMemoryToolRepository, C>;

/// Orchestrates agent and tool registrations against their repositories.
///
/// Every operation reads the clock once and derives a single
/// [`LivenessCutoff`] from the [`ExpirationPolicy`], so all records touched
/// by one call are judged against the same instant.
#[derive(Clone)]
pub struct ServiceRegistry<A, T, C>
where
    A: ServiceRepository<AgentRecord>,
    T: ServiceRepository<ToolRecord>,
    C: Clock + Send + Sync,
{
    pub(super) agents: Arc<A>,
    pub(super) tools: Arc<T>,
    clock: Arc<C>,
    policy: ExpirationPolicy,
}

impl<C> InMemoryServiceRegistry<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a registry with fresh in-memory repositories.
    #[must_use]
    pub fn in_memory(clock: Arc<C>, policy: ExpirationPolicy) -> Self {
        Self::new(
            Arc::new(InMemoryAgentRepository::new()),
            Arc::new(InMemoryToolRepository::new()),
            clock,
            policy,
        )
    }
}

impl<A, T, C> ServiceRegistry<A, T, C>
where
    A: ServiceRepository<AgentRecord>,
    T: ServiceRepository<ToolRecord>,
    C: Clock + Send + Sync,
{
    /// Creates a registry service.
    #[must_use]
    pub const fn new(
        agents: Arc<A>,
        tools: Arc<T>,
        clock: Arc<C>,
        policy: ExpirationPolicy,
    ) -> Self {
        Self {
            agents,
            tools,
            clock,
            policy,
        }
    }

    /// Returns the expiration policy in force.
    #[must_use]
    pub const fn policy(&self) -> ExpirationPolicy {
        self.policy
    }

    /// Returns the agent repository.
    #[must_use]
    pub const fn agent_repository(&self) -> &Arc<A> {
        &self.agents
    }

    /// Returns the tool repository.
    #[must_use]
    pub const fn tool_repository(&self) -> &Arc<T> {
        &self.tools
    }

    pub(super) fn cutoff(&self) -> LivenessCutoff {
        self.policy.cutoff_at(self.clock.utc())
    }

    /// Registers or fully replaces an agent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Domain`] when the payload is invalid
    /// and [`RegistryServiceError::Repository`] when the store is
    /// unavailable. Nothing is stored on error.
    pub async fn register_agent(
        &self,
        request: RegisterAgentRequest,
    ) -> RegistryServiceResult<AgentRecord> {
        let (details, capabilities, required_tools) = request.into_parts();
        let (id, profile) = resolve_details(details)?;
        let record = AgentRecord::new(id, profile, &*self.clock)
            .with_capabilities(capabilities)
            .with_required_tools(required_tools);
        self.store(&*self.agents, record).await
    }

    /// Registers or fully replaces a tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Domain`] when the payload is invalid
    /// and [`RegistryServiceError::Repository`] when the store is
    /// unavailable. Nothing is stored on error.
    pub async fn register_tool(
        &self,
        request: RegisterToolRequest,
    ) -> RegistryServiceResult<ToolRecord> {
        let (details, tool_type, endpoint_requests, schema) = request.into_parts();
        let (id, profile) = resolve_details(details)?;
        let endpoints = endpoint_requests
            .into_iter()
            .map(|(name, endpoint)| {
                build_endpoint(endpoint.into_parts()).map(|built| (name, built))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let record = ToolRecord::new(id, profile, tool_type, &*self.clock)?
            .with_endpoints(endpoints)?
            .with_schema(schema);
        self.store(&*self.tools, record).await
    }

    /// Refreshes the liveness of a registered agent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::NotFound`] when the agent is absent or
    /// has expired, and [`RegistryServiceError::Repository`] when the store
    /// is unavailable.
    pub async fn heartbeat_agent(&self, id: ServiceId) -> RegistryServiceResult<AgentRecord> {
        self.heartbeat(&*self.agents, id).await
    }

    /// Refreshes the liveness of a registered tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::NotFound`] when the tool is absent or
    /// has expired, and [`RegistryServiceError::Repository`] when the store
    /// is unavailable.
    pub async fn heartbeat_tool(&self, id: ServiceId) -> RegistryServiceResult<ToolRecord> {
        self.heartbeat(&*self.tools, id).await
    }

    /// Returns a live agent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::NotFound`] when the agent is absent or
    /// has expired, and [`RegistryServiceError::Repository`] when the store
    /// is unavailable.
    pub async fn get_agent(&self, id: ServiceId) -> RegistryServiceResult<AgentRecord> {
        self.get(&*self.agents, id).await
    }

    /// Returns a live tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::NotFound`] when the tool is absent or
    /// has expired, and [`RegistryServiceError::Repository`] when the store
    /// is unavailable.
    pub async fn get_tool(&self, id: ServiceId) -> RegistryServiceResult<ToolRecord> {
        self.get(&*self.tools, id).await
    }

    /// Returns every live agent in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when the store is
    /// unavailable.
    pub async fn list_agents(&self) -> RegistryServiceResult<Vec<AgentRecord>> {
        self.list(&*self.agents).await
    }

    /// Returns every live tool in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when the store is
    /// unavailable.
    pub async fn list_tools(&self) -> RegistryServiceResult<Vec<ToolRecord>> {
        self.list(&*self.tools).await
    }

    async fn store<R, P>(&self, repository: &P, record: R) -> RegistryServiceResult<R>
    where
        R: ServiceRecord,
        P: ServiceRepository<R> + ?Sized,
    {
        let id = record.service_id();
        let stored = repository
            .upsert(record, self.cutoff())
            .await
            .inspect_err(|err| report_store_failure(R::KIND, err))?;
        tracing::info!(
            kind = %R::KIND,
            service_id = %id,
            name = stored.service_profile().name(),
            "registered service"
        );
        Ok(stored)
    }

    async fn heartbeat<R, P>(&self, repository: &P, id: ServiceId) -> RegistryServiceResult<R>
    where
        R: ServiceRecord,
        P: ServiceRepository<R> + ?Sized,
    {
        let now = self.clock.utc();
        let touched = repository
            .touch(id, now, self.policy.cutoff_at(now))
            .await
            .inspect_err(|err| report_store_failure(R::KIND, err))?;
        let Some(record) = touched else {
            tracing::warn!(kind = %R::KIND, service_id = %id, "heartbeat for unknown service");
            return Err(RegistryServiceError::NotFound { kind: R::KIND, id });
        };
        tracing::debug!(kind = %R::KIND, service_id = %id, "heartbeat received");
        Ok(record)
    }

    async fn get<R, P>(&self, repository: &P, id: ServiceId) -> RegistryServiceResult<R>
    where
        R: ServiceRecord,
        P: ServiceRepository<R> + ?Sized,
    {
        repository
            .find_live(id, self.cutoff())
            .await
            .inspect_err(|err| report_store_failure(R::KIND, err))?
            .ok_or(RegistryServiceError::NotFound { kind: R::KIND, id })
    }

    async fn list<R, P>(&self, repository: &P) -> RegistryServiceResult<Vec<R>>
    where
        R: ServiceRecord,
        P: ServiceRepository<R> + ?Sized,
    {
        Ok(repository
            .list_live(self.cutoff())
            .await
            .inspect_err(|err| report_store_failure(R::KIND, err))?)
    }
}

pub(super) fn report_store_failure(kind: ServiceKind, err: &ServiceRepositoryError) {
    tracing::error!(kind = %kind, error = %err, "service store operation failed");
}

fn resolve_details(
    details: ServiceDetails,
) -> Result<(ServiceId, ServiceProfile), RegistryDomainError> {
    let id = details
        .id()
        .map(ServiceId::parse)
        .transpose()?
        .unwrap_or_default();
    let parts = details.into_parts();
    let mut profile = ServiceProfile::new(
        parts.name,
        parts.description,
        parts.version,
        parts.host,
        parts.port,
    )?
    .with_metadata(parts.metadata);
    if let Some(path) = parts.health_endpoint {
        profile = profile.with_health_endpoint(path)?;
    }
    Ok((id, profile))
}

fn build_endpoint(parts: EndpointParts) -> Result<ToolEndpoint, RegistryDomainError> {
    let mut endpoint = ToolEndpoint::new(parts.path)?.with_extra(parts.extra);
    if let Some(method) = parts.method {
        endpoint = endpoint.with_method(method)?;
    }
    if let Some(description) = parts.description {
        endpoint = endpoint.with_description(description);
    }
    Ok(endpoint)
}
