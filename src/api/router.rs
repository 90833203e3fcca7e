//! Route table and middleware.

use super::handlers;
use super::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use crate::registry::domain::{AgentRecord, ToolRecord};
use crate::registry::ports::ServiceRepository;
use mockable::Clock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the registry router.
///
/// Requests are traced with [`TraceLayer`]. When `enable_cors` is set, any
/// origin may call the API.
pub fn create_router<A, T, C>(state: AppState<A, T, C>, enable_cors: bool) -> Router
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/", get(handlers::banner::<A, T, C>))
        .route("/health", get(handlers::health::<A, T, C>))
        .route("/agents", get(handlers::list_agents::<A, T, C>))
        .route("/agents/register", post(handlers::register_agent::<A, T, C>))
        .route("/agents/:id", get(handlers::get_agent::<A, T, C>))
        .route("/agents/:id/heartbeat", put(handlers::heartbeat_agent::<A, T, C>))
        .route("/tools", get(handlers::list_tools::<A, T, C>))
        .route("/tools/register", post(handlers::register_tool::<A, T, C>))
        .route("/tools/:id", get(handlers::get_tool::<A, T, C>))
        .route("/tools/:id/heartbeat", put(handlers::heartbeat_tool::<A, T, C>))
        .route("/discover", post(handlers::discover::<A, T, C>))
        .layer(TraceLayer::new_for_http());

    let layered = if enable_cors {
        routes.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        routes
    };

    layered.with_state(state)
}
