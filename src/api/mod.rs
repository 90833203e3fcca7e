//! HTTP surface of the registry.
//!
//! Routes map one-to-one onto [`ServiceRegistry`](crate::registry::services::ServiceRegistry)
//! operations; [`ApiError`] turns service failures into JSON error bodies.

mod error;
mod handlers;
mod router;
mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::{BannerResponse, HealthResponse, HeartbeatResponse};
pub use router::create_router;
pub use state::AppState;
