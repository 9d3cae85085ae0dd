//! Server-Sent Events
//!
//! ```text
//! Sse::new_event_builder() ──► OutboundEvent
//!                                   │
//! SseBroadcaster::broadcast(&event) ┴──► ChannelSink ──► EventStream (HTTP body)
//!                                   ├──► ChannelSink ──► EventStream
//!                                   └──► (closed sink: dropped from the set)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! let sse = Sse::new(SseOptions::default());
//! let broadcaster = sse.new_broadcaster();
//!
//! let (sink, stream) = sse.new_channel();
//! broadcaster.register(Arc::new(sink)).await;
//!
//! let event = sse.new_event_builder().name("tick").data("1").build()?;
//! broadcaster.broadcast(&event).await;
//! ```

mod broadcaster;
mod channel;

pub use broadcaster::{BroadcastReport, SseBroadcaster};
pub use channel::{ChannelSink, EventStream};

use crate::constants::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_RECONNECT_DELAY_MS, DEFAULT_SEND_TIMEOUT_MS,
};
use rivet_domain::value_objects::EventBuilder;
use std::time::Duration;

/// Channel and delivery settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SseOptions {
    /// Events buffered per subscriber channel
    pub channel_capacity: usize,
    /// Time a single send may wait on a full channel
    pub send_timeout: Duration,
    /// Reconnection delay suggested to clients
    pub reconnect_delay: Duration,
}

impl Default for SseOptions {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            send_timeout: Duration::from_millis(DEFAULT_SEND_TIMEOUT_MS),
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
        }
    }
}

/// Entry point creating events, channels and broadcasters
#[derive(Debug, Clone, Copy, Default)]
pub struct Sse {
    options: SseOptions,
}

impl Sse {
    /// Create with options
    pub fn new(options: SseOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &SseOptions {
        &self.options
    }

    /// Start describing an event; nothing is sent
    pub fn new_event_builder(&self) -> EventBuilder {
        EventBuilder::default()
    }

    /// Opening event announcing the reconnection delay
    pub fn new_retry_event_builder(&self) -> EventBuilder {
        EventBuilder::default().reconnect_delay(self.options.reconnect_delay)
    }

    /// Create an empty broadcaster
    pub fn new_broadcaster(&self) -> SseBroadcaster {
        SseBroadcaster::new()
    }

    /// Create a subscriber channel
    pub fn new_channel(&self) -> (ChannelSink, EventStream) {
        ChannelSink::channel(self.options.channel_capacity, self.options.send_timeout)
    }
}
