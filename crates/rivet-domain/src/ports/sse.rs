//! Server-sent event sink port

use crate::error::Result;
use crate::value_objects::OutboundEvent;
use async_trait::async_trait;

/// One subscriber channel of a broadcaster
///
/// Events sent to a single sink must arrive in submission order.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver an event; fails with `Error::ChannelClosed` once the peer is gone
    async fn send(&self, event: &OutboundEvent) -> Result<()>;

    /// Whether the channel has been closed by either side
    fn is_closed(&self) -> bool;

    /// Close the channel
    async fn close(&self);
}
