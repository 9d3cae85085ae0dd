//! Remote URL and protocol value objects

use crate::constants::PROTOCOL_SEPARATOR;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Case-insensitive protocol token, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Protocol(String);

impl Protocol {
    /// Parse a protocol token
    ///
    /// A token starts with an ASCII letter followed by letters, digits,
    /// `+`, `-` or `.`.
    pub fn parse(token: &str) -> Result<Self> {
        let mut chars = token.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid {
            return Err(Error::invalid_argument(format!(
                "Invalid protocol token '{token}'"
            )));
        }
        Ok(Self(token.to_ascii_lowercase()))
    }

    /// Lowercase token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Protocol {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Protocol> for String {
    fn from(value: Protocol) -> Self {
        value.0
    }
}

/// URL of a remote endpoint, split into protocol and address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteUrl {
    raw: String,
    protocol: Protocol,
}

impl RemoteUrl {
    /// Parse `protocol://address`
    pub fn parse(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        let Some((scheme, address)) = trimmed.split_once(PROTOCOL_SEPARATOR) else {
            return Err(Error::invalid_url(url, "missing protocol separator"));
        };
        if address.is_empty() {
            return Err(Error::invalid_url(url, "empty address"));
        }
        let protocol =
            Protocol::parse(scheme).map_err(|_| Error::invalid_url(url, "invalid protocol"))?;
        Ok(Self {
            raw: trimmed.trim_end_matches('/').to_string(),
            protocol,
        })
    }

    /// Protocol of this URL
    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Part after `protocol://`
    pub fn address(&self) -> &str {
        self.raw
            .split_once(PROTOCOL_SEPARATOR)
            .map_or("", |(_, address)| address)
    }

    /// Full URL without trailing slash
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Append path segments, separated by `/`
    pub fn join(&self, segments: &[&str]) -> String {
        let mut url = self.raw.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment.trim_matches('/'));
        }
        url
    }
}

impl FromStr for RemoteUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
