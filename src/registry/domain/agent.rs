//! Agent registration record.

use super::{ServiceId, ServiceKind, ServiceProfile, ServiceRecord};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// A registered agent and the capabilities it advertises.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "agent")]
pub struct AgentRecord {
    id: ServiceId,
    #[serde(flatten)]
    profile: ServiceProfile,
    capabilities: Vec<String>,
    required_tools: Vec<String>,
    last_seen: DateTime<Utc>,
}

impl AgentRecord {
    /// Creates an agent record stamped with the current clock time.
    #[must_use]
    pub fn new(id: ServiceId, profile: ServiceProfile, clock: &impl Clock) -> Self {
        Self {
            id,
            profile,
            capabilities: Vec::new(),
            required_tools: Vec::new(),
            last_seen: clock.utc(),
        }
    }

    /// Sets the capability tags.
    ///
    /// Tags are kept as supplied; repeated tags keep only their first
    /// occurrence.
    #[must_use]
    pub fn with_capabilities(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.capabilities = Vec::new();
        for tag in tags {
            if !self.capabilities.contains(&tag) {
                self.capabilities.push(tag);
            }
        }
        self
    }

    /// Sets the tool types this agent depends on, in declaration order.
    #[must_use]
    pub fn with_required_tools(mut self, tool_types: impl IntoIterator<Item = String>) -> Self {
        self.required_tools = tool_types.into_iter().collect();
        self
    }

    /// Returns the agent identifier.
    #[must_use]
    pub const fn id(&self) -> ServiceId {
        self.id
    }

    /// Returns the descriptive metadata.
    #[must_use]
    pub const fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    /// Returns the advertised capability tags.
    #[must_use]
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Returns whether the agent advertises every tag in `requested`.
    #[must_use]
    pub fn has_capabilities(&self, requested: &[String]) -> bool {
        requested.iter().all(|tag| self.capabilities.contains(tag))
    }

    /// Returns the tool types this agent depends on.
    #[must_use]
    pub fn required_tools(&self) -> &[String] {
        &self.required_tools
    }

    /// Returns the last registration or heartbeat time.
    #[must_use]
    pub const fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }
}

impl ServiceRecord for AgentRecord {
    const KIND: ServiceKind = ServiceKind::Agent;

    fn service_id(&self) -> ServiceId {
        self.id
    }

    fn service_profile(&self) -> &ServiceProfile {
        &self.profile
    }

    fn seen_at(&self) -> DateTime<Utc> {
        self.last_seen
    }

    fn touch(&mut self, instant: DateTime<Utc>) {
        self.last_seen = self.last_seen.max(instant);
    }
}
