//! Outbound server-sent event and its builder
//!
//! An [`OutboundEvent`] is immutable once built. [`OutboundEvent::to_wire`]
//! renders it in the `text/event-stream` format:
//!
//! ```text
//! : comment
//! id: 42
//! event: price
//! retry: 3000
//! data: first line
//! data: second line
//!
//! ```

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;

/// An event ready to be delivered to subscriber channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEvent {
    id: Option<String>,
    name: Option<String>,
    comment: Option<String>,
    retry: Option<Duration>,
    data: Option<String>,
}

impl OutboundEvent {
    /// Start building an event
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Event id
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Event type name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Comment line
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Reconnection delay advertised to the client
    pub fn retry(&self) -> Option<Duration> {
        self.retry
    }

    /// Data payload
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Render the event in `text/event-stream` format, terminated by a blank line
    pub fn to_wire(&self) -> String {
        let mut out = String::new();
        if let Some(comment) = &self.comment {
            for line in comment.lines() {
                let _ = writeln!(out, ": {line}");
            }
        }
        if let Some(id) = &self.id {
            let _ = writeln!(out, "id: {id}");
        }
        if let Some(name) = &self.name {
            let _ = writeln!(out, "event: {name}");
        }
        if let Some(retry) = self.retry {
            let _ = writeln!(out, "retry: {}", retry.as_millis());
        }
        if let Some(data) = &self.data {
            if data.is_empty() {
                out.push_str("data: \n");
            }
            for line in data.lines() {
                let _ = writeln!(out, "data: {line}");
            }
        }
        out.push('\n');
        out
    }
}

/// Builder for [`OutboundEvent`]; building has no side effects
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    id: Option<String>,
    name: Option<String>,
    comment: Option<String>,
    retry: Option<Duration>,
    data: Option<String>,
}

impl EventBuilder {
    /// Set the event id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the event type name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the comment
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the reconnection delay
    pub fn reconnect_delay(mut self, retry: Duration) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Set a text payload
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set a payload serialized as JSON
    pub fn json_data<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.data = Some(serde_json::to_string(value)?);
        Ok(self)
    }

    /// Build the event
    ///
    /// Fails when neither data nor comment is set, or when the id or name
    /// contains a line break.
    pub fn build(self) -> Result<OutboundEvent> {
        if self.data.is_none() && self.comment.is_none() {
            return Err(Error::invalid_argument(
                "Event requires data or a comment",
            ));
        }
        for (field, value) in [("id", &self.id), ("name", &self.name)] {
            if value.as_deref().is_some_and(|v| v.contains(['\n', '\r'])) {
                return Err(Error::invalid_argument(format!(
                    "Event {field} must be a single line"
                )));
            }
        }
        Ok(OutboundEvent {
            id: self.id,
            name: self.name,
            comment: self.comment,
            retry: self.retry,
            data: self.data,
        })
    }
}
