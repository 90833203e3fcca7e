//! Registration payloads accepted by the registry service.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Fields shared by agent and tool registrations.
///
/// Client-supplied `type` and `last_seen` fields are not part of the payload
/// and are ignored when present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceDetails {
    #[serde(default)]
    id: Option<String>,
    name: String,
    description: String,
    version: String,
    host: String,
    port: u16,
    #[serde(default)]
    health_endpoint: Option<String>,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl ServiceDetails {
    /// Creates details with the required descriptive fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            version: version.into(),
            host: host.into(),
            port,
            health_endpoint: None,
            metadata: Map::new(),
        }
    }

    /// Requests a specific identifier instead of a generated one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the health endpoint path.
    #[must_use]
    pub fn with_health_endpoint(mut self, path: impl Into<String>) -> Self {
        self.health_endpoint = Some(path.into());
        self
    }

    /// Sets the opaque metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub(crate) fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn into_parts(self) -> DetailParts {
        DetailParts {
            name: self.name,
            description: self.description,
            version: self.version,
            host: self.host,
            port: self.port,
            health_endpoint: self.health_endpoint,
            metadata: self.metadata,
        }
    }
}

pub(crate) struct DetailParts {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) version: String,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) health_endpoint: Option<String>,
    pub(crate) metadata: Map<String, Value>,
}

/// Request payload for registering an agent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterAgentRequest {
    #[serde(flatten)]
    details: ServiceDetails,
    #[serde(default)]
    capabilities: Vec<String>,
    #[serde(default)]
    required_tools: Vec<String>,
}

impl RegisterAgentRequest {
    /// Creates a request with no capabilities or tool dependencies.
    #[must_use]
    pub const fn new(details: ServiceDetails) -> Self {
        Self {
            details,
            capabilities: Vec::new(),
            required_tools: Vec::new(),
        }
    }

    /// Sets the advertised capability tags.
    #[must_use]
    pub fn with_capabilities(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.capabilities = tags.into_iter().collect();
        self
    }

    /// Sets the tool types the agent depends on.
    #[must_use]
    pub fn with_required_tools(mut self, tool_types: impl IntoIterator<Item = String>) -> Self {
        self.required_tools = tool_types.into_iter().collect();
        self
    }

    pub(crate) fn into_parts(self) -> (ServiceDetails, Vec<String>, Vec<String>) {
        (self.details, self.capabilities, self.required_tools)
    }
}

/// One endpoint declared in a tool registration.
///
/// Only `path` is required. Any other keys are carried into the stored
/// descriptor unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointRequest {
    path: String,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl EndpointRequest {
    /// Creates an endpoint declaration with a path and method.
    #[must_use]
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..Self::at(path)
        }
    }

    /// Creates an endpoint declaration with only a path.
    #[must_use]
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: None,
            description: None,
            extra: Map::new(),
        }
    }

    /// Sets the endpoint description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a free-form descriptor key.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub(crate) fn into_parts(self) -> EndpointParts {
        EndpointParts {
            path: self.path,
            method: self.method,
            description: self.description,
            extra: self.extra,
        }
    }
}

pub(crate) struct EndpointParts {
    pub(crate) path: String,
    pub(crate) method: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) extra: Map<String, Value>,
}

/// Request payload for registering a tool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterToolRequest {
    #[serde(flatten)]
    details: ServiceDetails,
    tool_type: String,
    #[serde(default)]
    endpoints: BTreeMap<String, EndpointRequest>,
    #[serde(default = "empty_schema")]
    schema: Value,
}

fn empty_schema() -> Value {
    Value::Object(Map::new())
}

impl RegisterToolRequest {
    /// Creates a request with no endpoints and an empty schema.
    #[must_use]
    pub fn new(details: ServiceDetails, tool_type: impl Into<String>) -> Self {
        Self {
            details,
            tool_type: tool_type.into(),
            endpoints: BTreeMap::new(),
            schema: empty_schema(),
        }
    }

    /// Adds or replaces one named endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, name: impl Into<String>, endpoint: EndpointRequest) -> Self {
        self.endpoints.insert(name.into(), endpoint);
        self
    }

    /// Sets the opaque interface schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        ServiceDetails,
        String,
        BTreeMap<String, EndpointRequest>,
        Value,
    ) {
        (self.details, self.tool_type, self.endpoints, self.schema)
    }
}
