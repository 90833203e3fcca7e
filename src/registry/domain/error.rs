//! Error types for registry domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryDomainError {
    /// The service name is empty after trimming.
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// The service version is empty after trimming.
    #[error("service version must not be empty")]
    EmptyVersion,

    /// The service host is empty after trimming.
    #[error("service host must not be empty")]
    EmptyHost,

    /// Port zero cannot be used to reach a service.
    #[error("service port must be between 1 and 65535")]
    InvalidPort,

    /// The health endpoint is not an absolute path.
    #[error("health endpoint '{0}' must start with '/'")]
    InvalidHealthEndpoint(String),

    /// A caller-supplied identifier is not a UUID.
    #[error("service identifier '{0}' is not a valid UUID")]
    InvalidServiceId(String),

    /// The tool classification tag is empty after trimming.
    #[error("tool type must not be empty")]
    EmptyToolType,

    /// A tool endpoint has an empty logical name.
    #[error("tool endpoint name must not be empty")]
    EmptyEndpointName,

    /// A tool endpoint has an empty path.
    #[error("tool endpoint path must not be empty")]
    EmptyEndpointPath,

    /// A tool endpoint declares an HTTP method the registry does not know.
    #[error("tool endpoint method '{0}' is not a recognised HTTP method")]
    InvalidEndpointMethod(String),

    /// The expiration threshold is zero or too large to represent.
    #[error("expiration threshold of {0} seconds is out of range")]
    InvalidExpiration(u64),
}

/// Error returned while parsing a service kind from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service kind: {0}")]
pub struct ParseServiceKindError(pub String);
