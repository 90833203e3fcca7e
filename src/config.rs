//! Layered configuration for the registry daemon.
//!
//! Values are resolved in order: built-in defaults, an optional file
//! (TOML, YAML, or JSON by extension), then `REGISTRY_`-prefixed environment
//! variables where `__` separates nested keys, for example
//! `REGISTRY_LIVENESS__EXPIRATION_SECS=60`.

use crate::registry::domain::{ExpirationPolicy, RegistryDomainError};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Port the registry listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8000;

const ENV_PREFIX: &str = "REGISTRY";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// A value was read but is not usable.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] RegistryDomainError),
}

/// Top-level daemon configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Expiration and sweeping settings.
    #[serde(default)]
    pub liveness: LivenessConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub listen_addr: SocketAddr,

    /// Allow cross-origin requests from any origin.
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            enable_cors: true,
        }
    }
}

/// Expiration and sweeping settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Seconds without a heartbeat after which a service is dead.
    #[serde(default = "default_expiration_secs")]
    pub expiration_secs: u64,

    /// Heartbeat cadence registrants are advised to use.
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_interval_secs: u64,

    /// Seconds between background sweeps; zero disables sweeping.
    #[serde(default = "default_sweep_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            expiration_secs: default_expiration_secs(),
            heartbeat_interval_secs: default_heartbeat_secs(),
            sweep_interval_secs: default_sweep_secs(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_expiration_secs() -> u64 {
    ExpirationPolicy::DEFAULT_EXPIRATION_SECS
}

const fn default_heartbeat_secs() -> u64 {
    ExpirationPolicy::DEFAULT_HEARTBEAT_SECS
}

const fn default_sweep_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl RegistryConfig {
    /// Loads configuration from defaults, an optional file, and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError::Source`] when the file is missing or any
    /// source is malformed, and [`ConfigLoadError::Invalid`] when the
    /// resulting values are unusable.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(file) = path {
            builder = builder.add_source(config::File::from(file).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks values that deserialize cleanly but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::InvalidExpiration`] when the expiration
    /// threshold is zero or out of range.
    pub fn validate(&self) -> Result<(), RegistryDomainError> {
        self.expiration_policy().map(|_| ())
    }

    /// Builds the expiration policy described by `liveness`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::InvalidExpiration`] when the expiration
    /// threshold is zero or out of range.
    pub fn expiration_policy(&self) -> Result<ExpirationPolicy, RegistryDomainError> {
        ExpirationPolicy::from_secs(self.liveness.expiration_secs)
    }

    /// Returns the background sweep interval, or `None` when disabled.
    #[must_use]
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.liveness.sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.liveness.sweep_interval_secs))
    }
}
