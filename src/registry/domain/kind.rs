//! Service kind discriminator.

use super::ParseServiceKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two families of registrants the registry tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// An agent that answers queries and may depend on tools.
    Agent,
    /// A tool that agents call to perform a concrete operation.
    Tool,
}

impl ServiceKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Tool => "tool",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceKind {
    type Error = ParseServiceKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "agent" => Ok(Self::Agent),
            "tool" => Ok(Self::Tool),
            _ => Err(ParseServiceKindError(value.to_owned())),
        }
    }
}
