//! Domain model for service registration, liveness, and discovery.
//!
//! Agents and tools share a [`ServiceProfile`] and a `last_seen` timestamp
//! that alone decides whether they are live under an [`ExpirationPolicy`].
//! Storage and transport concerns stay outside the domain boundary.

mod agent;
mod error;
mod ids;
mod kind;
mod liveness;
mod profile;
mod query;
mod record;
mod tool;

pub use agent::AgentRecord;
pub use error::{ParseServiceKindError, RegistryDomainError};
pub use ids::ServiceId;
pub use kind::ServiceKind;
pub use liveness::{ExpirationPolicy, LivenessCutoff};
pub use profile::{DEFAULT_HEALTH_ENDPOINT, ServiceProfile};
pub use query::{DiscoveryResult, ServiceQuery};
pub use record::ServiceRecord;
pub use tool::{ToolEndpoint, ToolRecord};
