//! Service registry for ephemeral agents and tools.
//!
//! Services register once, keep themselves alive with periodic heartbeats,
//! and are evicted when their last heartbeat is older than the expiration
//! threshold. Callers find live services through discovery queries over
//! name, capability, and tool-type predicates.
//!
//! # Architecture
//!
//! The registry follows hexagonal architecture principles:
//!
//! - **Domain**: records, liveness rules, and query predicates
//! - **Ports**: the storage contract each record collection implements
//! - **Adapters**: the lock-guarded in-memory store
//! - **Services**: registration, heartbeat, discovery, and sweeping
//!
//! # Modules
//!
//! - [`registry`]: domain, ports, adapters, and services
//! - [`api`]: axum routes over the registry service
//! - [`config`]: layered daemon configuration
//! - [`server`]: listener, background sweeper, and graceful shutdown
//! - [`telemetry`]: tracing subscriber installation

pub mod api;
pub mod config;
pub mod registry;
pub mod server;
pub mod telemetry;
