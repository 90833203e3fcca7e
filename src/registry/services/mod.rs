//! Application services for registration, discovery, and liveness sweeps.

mod discovery;
mod registry;
mod requests;
mod sweeper;

pub use discovery::SweepReport;
pub use registry::{
    InMemoryServiceRegistry, RegistryServiceError, RegistryServiceResult, ServiceRegistry,
};
pub use requests::{
    EndpointRequest, RegisterAgentRequest, RegisterToolRequest, ServiceDetails,
};
pub use sweeper::LivenessSweeper;
