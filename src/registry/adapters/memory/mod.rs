//! In-memory registry storage.

mod repository;

pub use repository::{InMemoryAgentRepository, InMemoryServiceRepository, InMemoryToolRepository};
