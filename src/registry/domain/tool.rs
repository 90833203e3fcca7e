//! Tool registration record and endpoint descriptors.

use super::profile::is_blank;
use super::{RegistryDomainError, ServiceId, ServiceKind, ServiceProfile, ServiceRecord};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const KNOWN_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];
const DESCRIPTOR_FIELDS: [&str; 3] = ["path", "method", "description"];

/// One operation exposed by a tool.
///
/// Keys beyond `path`, `method`, and `description` are kept verbatim and
/// serialized alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolEndpoint {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ToolEndpoint {
    /// Creates an endpoint descriptor with no method or description.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyEndpointPath`] when `path` is
    /// blank.
    pub fn new(path: impl Into<String>) -> Result<Self, RegistryDomainError> {
        let raw_path = path.into();
        if is_blank(&raw_path) {
            return Err(RegistryDomainError::EmptyEndpointPath);
        }
        Ok(Self {
            path: raw_path,
            method: None,
            description: None,
            extra: Map::new(),
        })
    }

    /// Sets the HTTP method, normalised to upper case.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::InvalidEndpointMethod`] when `method`
    /// is not a standard HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Result<Self, RegistryDomainError> {
        let normalized = method.into().trim().to_ascii_uppercase();
        if !KNOWN_METHODS.contains(&normalized.as_str()) {
            return Err(RegistryDomainError::InvalidEndpointMethod(normalized));
        }
        self.method = Some(normalized);
        Ok(self)
    }

    /// Sets a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches free-form descriptor keys such as parameter schemas.
    ///
    /// Keys that collide with the typed fields are ignored.
    #[must_use]
    pub fn with_extra(mut self, mut extra: Map<String, Value>) -> Self {
        extra.retain(|key, _| !DESCRIPTOR_FIELDS.contains(&key.as_str()));
        self.extra = extra;
        self
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the upper-case HTTP method, if declared.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Returns the description, if declared.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the free-form descriptor keys.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// A registered tool, its classification, and its interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "tool")]
pub struct ToolRecord {
    id: ServiceId,
    #[serde(flatten)]
    profile: ServiceProfile,
    tool_type: String,
    endpoints: BTreeMap<String, ToolEndpoint>,
    schema: Value,
    last_seen: DateTime<Utc>,
}

impl ToolRecord {
    /// Creates a tool record stamped with the current clock time.
    ///
    /// The schema starts as an empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyToolType`] when `tool_type` is
    /// blank.
    pub fn new(
        id: ServiceId,
        profile: ServiceProfile,
        tool_type: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, RegistryDomainError> {
        let raw_type = tool_type.into();
        if is_blank(&raw_type) {
            return Err(RegistryDomainError::EmptyToolType);
        }

        Ok(Self {
            id,
            profile,
            tool_type: raw_type,
            endpoints: BTreeMap::new(),
            schema: Value::Object(Map::new()),
            last_seen: clock.utc(),
        })
    }

    /// Replaces the endpoint map.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyEndpointName`] when any logical
    /// endpoint name is blank.
    pub fn with_endpoints(
        mut self,
        endpoints: impl IntoIterator<Item = (String, ToolEndpoint)>,
    ) -> Result<Self, RegistryDomainError> {
        let mut validated = BTreeMap::new();
        for (name, endpoint) in endpoints {
            if is_blank(&name) {
                return Err(RegistryDomainError::EmptyEndpointName);
            }
            validated.insert(name, endpoint);
        }
        self.endpoints = validated;
        Ok(self)
    }

    /// Sets the opaque interface schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    /// Returns the tool identifier.
    #[must_use]
    pub const fn id(&self) -> ServiceId {
        self.id
    }

    /// Returns the descriptive metadata.
    #[must_use]
    pub const fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    /// Returns the classification tag used for discovery.
    #[must_use]
    pub fn tool_type(&self) -> &str {
        &self.tool_type
    }

    /// Returns the endpoints keyed by logical name.
    #[must_use]
    pub const fn endpoints(&self) -> &BTreeMap<String, ToolEndpoint> {
        &self.endpoints
    }

    /// Returns the interface schema exactly as registered.
    #[must_use]
    pub const fn schema(&self) -> &Value {
        &self.schema
    }

    /// Returns the last registration or heartbeat time.
    #[must_use]
    pub const fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }
}

impl ServiceRecord for ToolRecord {
    const KIND: ServiceKind = ServiceKind::Tool;

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
