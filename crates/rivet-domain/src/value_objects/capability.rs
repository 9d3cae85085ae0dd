//! Capability tags derived from class metadata

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A capability tag carried by a managed class descriptor
///
/// Tags are computed once when the descriptor is built; connectors decide
/// participation by querying them instead of inspecting raw annotations.
/// Connectors outside this crate may define their own tags with
/// [`Capability::custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    /// Class is exposed for remote invocation
    pub const REMOTE: Self = Self(Cow::Borrowed("remote"));

    /// Class is a path-mapped REST resource
    pub const PATH: Self = Self(Cow::Borrowed("path"));

    /// Class is a client proxy for a remote interface
    pub const REMOTE_CLIENT: Self = Self(Cow::Borrowed("remote-client"));

    /// Class declares an explicit scope
    pub const SCOPED: Self = Self(Cow::Borrowed("scoped"));

    /// Method is excluded from remote exposure
    pub const LOCAL: Self = Self(Cow::Borrowed("local"));

    /// Create a capability tag outside the built-in set
    pub fn custom(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    /// Tag name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
