//! Service registration, liveness tracking, and discovery.
//!
//! Agents and tools register themselves, keep their entries alive with
//! periodic heartbeats, and find each other through discovery queries. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
