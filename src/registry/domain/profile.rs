//! Descriptive metadata shared by every registered service.

use super::RegistryDomainError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Health endpoint assumed when a registrant does not declare one.
pub const DEFAULT_HEALTH_ENDPOINT: &str = "/health";

/// Network location and free-text metadata of a registered service.
///
/// Names are not unique: two services may share a name and are told apart by
/// their [`ServiceId`](super::ServiceId).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceProfile {
    name: String,
    description: String,
    version: String,
    host: String,
    port: u16,
    health_endpoint: String,
    metadata: Map<String, Value>,
}

impl ServiceProfile {
    /// Creates a validated profile.
    ///
    /// `name`, `version`, and `host` must contain a non-whitespace character.
    /// The description may be empty. Every value is stored exactly as
    /// supplied. The health endpoint defaults to [`DEFAULT_HEALTH_ENDPOINT`]
    /// and metadata starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyServiceName`],
    /// [`RegistryDomainError::EmptyVersion`],
    /// [`RegistryDomainError::EmptyHost`], or
    /// [`RegistryDomainError::InvalidPort`] when the corresponding field is
    /// unusable.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Result<Self, RegistryDomainError> {
        let profile = Self {
            name: name.into(),
            description: description.into(),
            version: version.into(),
            host: host.into(),
            port,
            health_endpoint: DEFAULT_HEALTH_ENDPOINT.to_owned(),
            metadata: Map::new(),
        };

        if is_blank(&profile.name) {
            return Err(RegistryDomainError::EmptyServiceName);
        }
        if is_blank(&profile.version) {
            return Err(RegistryDomainError::EmptyVersion);
        }
        if is_blank(&profile.host) {
            return Err(RegistryDomainError::EmptyHost);
        }
        if port == 0 {
            return Err(RegistryDomainError::InvalidPort);
        }
        Ok(profile)
    }

    /// Sets the health endpoint path.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::InvalidHealthEndpoint`] when the path,
    /// ignoring surrounding whitespace, does not start with `/`.
    pub fn with_health_endpoint(
        mut self,
        path: impl Into<String>,
    ) -> Result<Self, RegistryDomainError> {
        let raw = path.into();
        if !raw.trim_start().starts_with('/') {
            return Err(RegistryDomainError::InvalidHealthEndpoint(raw));
        }
        self.health_endpoint = raw;
        Ok(self)
    }

    /// Replaces the opaque metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the service description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the service version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the host the service listens on.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port the service listens on.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the health endpoint path.
    #[must_use]
    pub fn health_endpoint(&self) -> &str {
        &self.health_endpoint
    }

    /// Returns the opaque metadata map.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

pub(super) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
