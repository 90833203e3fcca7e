//! Request handlers for registration, heartbeat, lookup, and discovery.

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::registry::domain::{
    AgentRecord, DiscoveryResult, ServiceId, ServiceKind, ServiceQuery, ToolRecord,
};
use crate::registry::ports::ServiceRepository;
use crate::registry::services::{RegisterAgentRequest, RegisterToolRequest};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

const BANNER: &str = "Agent Framework Service Registry";

/// Body of the root route.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    /// Service name.
    pub message: String,
    /// Registry version.
    pub version: String,
}

/// Body of the health route.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` when the store is reachable.
    pub status: String,
    /// Time the response was produced.
    pub timestamp: DateTime<Utc>,
    /// Number of live agents.
    pub agents: usize,
    /// Number of live tools.
    pub tools: usize,
}

/// Body returned by heartbeat routes.
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Always `ok`.
    pub status: String,
}

impl HeartbeatResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

/// Path identifiers that are not UUIDs cannot name a record.
fn parse_path_id(kind: ServiceKind, raw: &str) -> ApiResult<ServiceId> {
    ServiceId::parse(raw).map_err(|_| ApiError::NotFound(format!("{kind} not found: {raw}")))
}

#[expect(clippy::unused_async, reason = "axum handlers must return futures")]
pub(super) async fn banner<A, T, C>(State(state): State<AppState<A, T, C>>) -> Json<BannerResponse>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(BannerResponse {
        message: BANNER.to_owned(),
        version: state.version.clone(),
    })
}

pub(super) async fn health<A, T, C>(State(state): State<AppState<A, T, C>>) -> ApiResult<Json<HealthResponse>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let agents = state.registry.list_agents().await?.len();
    let tools = state.registry.list_tools().await?.len();
    Ok(Json(HealthResponse {
        status: "healthy".to_owned(),
        timestamp: state.clock.utc(),
        agents,
        tools,
    }))
}

pub(super) async fn register_agent<A, T, C>(
    State(state): State<AppState<A, T, C>>,
    payload: Result<Json<RegisterAgentRequest>, JsonRejection>,
) -> ApiResult<Json<AgentRecord>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.registry.register_agent(request).await?))
}

pub(super) async fn register_tool<A, T, C>(
    State(state): State<AppState<A, T, C>>,
    payload: Result<Json<RegisterToolRequest>, JsonRejection>,
) -> ApiResult<Json<ToolRecord>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.registry.register_tool(request).await?))
}

pub(super) async fn list_agents<A, T, C>(
    State(state): State<AppState<A, T, C>>,
) -> ApiResult<Json<Vec<AgentRecord>>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.registry.list_agents().await?))
}

pub(super) async fn list_tools<A, T, C>(
    State(state): State<AppState<A, T, C>>,
) -> ApiResult<Json<Vec<ToolRecord>>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.registry.list_tools().await?))
}

pub(super) async fn get_agent<A, T, C>(
    State(state): State<AppState<A, T, C>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<AgentRecord>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_path_id(ServiceKind::Agent, &raw_id)?;
    Ok(Json(state.registry.get_agent(id).await?))
}

pub(super) async fn get_tool<A, T, C>(
    State(state): State<AppState<A, T, C>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<ToolRecord>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_path_id(ServiceKind::Tool, &raw_id)?;
    Ok(Json(state.registry.get_tool(id).await?))
}

pub(super) async fn heartbeat_agent<A, T, C>(
    State(state): State<AppState<A, T, C>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<HeartbeatResponse>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_path_id(ServiceKind::Agent, &raw_id)?;
    state.registry.heartbeat_agent(id).await?;
    Ok(Json(HeartbeatResponse::ok()))
}

pub(super) async fn heartbeat_tool<A, T, C>(
    State(state): State<AppState<A, T, C>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<HeartbeatResponse>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_path_id(ServiceKind::Tool, &raw_id)?;
    state.registry.heartbeat_tool(id).await?;
    Ok(Json(HeartbeatResponse::ok()))
}

pub(super) async fn discover<A, T, C>(
    State(state): State<AppState<A, T, C>>,
    payload: Result<Json<ServiceQuery>, JsonRejection>,
) -> ApiResult<Json<DiscoveryResult>>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(query) = payload?;
    Ok(Json(state.registry.discover(&query).await?))
}
