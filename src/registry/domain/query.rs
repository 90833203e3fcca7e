//! Discovery queries and their results.

use super::{AgentRecord, ServiceKind, ServiceProfile, ToolRecord};
use serde::{Deserialize, Serialize};

/// Predicate over live services.
///
/// Every field is optional and present fields are combined with AND. An
/// absent field, or an empty `name` or `tool_type`, matches everything.
/// `capabilities` and `tool_type` are kind-specific: a non-empty
/// `tool_type` excludes every agent and a non-empty `capabilities` list
/// excludes every tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceQuery {
    service_type: Option<ServiceKind>,
    name: Option<String>,
    capabilities: Option<Vec<String>>,
    tool_type: Option<String>,
}

impl ServiceQuery {
    /// Creates a query matching every live service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one kind of service.
    #[must_use]
    pub const fn of_kind(mut self, kind: ServiceKind) -> Self {
        self.service_type = Some(kind);
        self
    }

    /// Requires the service name to contain `fragment`, ignoring case.
    #[must_use]
    pub fn with_name(mut self, fragment: impl Into<String>) -> Self {
        self.name = Some(fragment.into());
        self
    }

    /// Requires agents to advertise every tag in `tags`.
    #[must_use]
    pub fn with_capabilities(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.capabilities = Some(tags.into_iter().collect());
        self
    }

    /// Requires tools to have this classification, ignoring case.
    #[must_use]
    pub fn with_tool_type(mut self, tool_type: impl Into<String>) -> Self {
        self.tool_type = Some(tool_type.into());
        self
    }

    /// Returns the kind restriction, if any.
    #[must_use]
    pub const fn service_type(&self) -> Option<ServiceKind> {
        self.service_type
    }

    /// Returns whether results of `kind` are wanted at all.
    #[must_use]
    pub fn includes(&self, kind: ServiceKind) -> bool {
        self.service_type.is_none_or(|wanted| wanted == kind)
    }

    /// Returns whether `agent` satisfies the name and capability filters.
    ///
    /// Agents have no tool type, so a non-empty `tool_type` never matches.
    #[must_use]
    pub fn matches_agent(&self, agent: &AgentRecord) -> bool {
        non_empty(self.tool_type.as_deref()).is_none()
            && self.matches_name(agent.profile())
            && self
                .capabilities
                .as_deref()
                .is_none_or(|requested| agent.has_capabilities(requested))
    }

    /// Returns whether `tool` satisfies the name and tool-type filters.
    ///
    /// Tools advertise no capabilities, so a non-empty capability list never
    /// matches.
    #[must_use]
    pub fn matches_tool(&self, tool: &ToolRecord) -> bool {
        self.capabilities.as_deref().is_none_or(<[String]>::is_empty)
            && self.matches_name(tool.profile())
            && non_empty(self.tool_type.as_deref())
                .is_none_or(|wanted| wanted.to_lowercase() == tool.tool_type().to_lowercase())
    }

    fn matches_name(&self, profile: &ServiceProfile) -> bool {
        non_empty(self.name.as_deref()).is_none_or(|fragment| {
            profile
                .name()
                .to_lowercase()
                .contains(&fragment.to_lowercase())
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Live services matching a [`ServiceQuery`], split by kind.
///
/// Both sequences are always present; a kind excluded by the query or with
/// no matches yields an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscoveryResult {
    agents: Vec<AgentRecord>,
    tools: Vec<ToolRecord>,
}

impl DiscoveryResult {
    /// Creates a result from matched agents and tools.
    #[must_use]
    pub const fn new(agents: Vec<AgentRecord>, tools: Vec<ToolRecord>) -> Self {
        Self { agents, tools }
    }

    /// Returns the matched agents.
    #[must_use]
    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    /// Returns the matched tools.
    #[must_use]
    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    /// Returns whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty() && self.tools.is_empty()
    }
}
