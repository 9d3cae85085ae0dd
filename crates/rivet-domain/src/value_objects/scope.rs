//! Binding scope value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle policy of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// New instance per resolution
    #[default]
    Instance,
    /// Single instance for the container lifetime, created at most once
    Singleton,
    /// One instance per logical execution context (request, session, worker)
    Context,
}

impl Scope {
    /// Whether instances of this scope are cached somewhere
    pub fn is_cached(self) -> bool {
        !matches!(self, Self::Instance)
    }

    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Singleton => "singleton",
            Self::Context => "context",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = crate::Error;

    /// Parse a scope name; accepts the aliases used by class scanners
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instance" | "local" | "transient" => Ok(Self::Instance),
            "singleton" | "application" => Ok(Self::Singleton),
            "context" | "thread" | "service" | "request" | "session" => Ok(Self::Context),
            other => Err(crate::Error::invalid_argument(format!(
                "Unknown scope '{other}'. Use instance, singleton, or context"
            ))),
        }
    }
}
