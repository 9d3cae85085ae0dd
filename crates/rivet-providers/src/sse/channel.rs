//! Channel-backed event sink

use async_trait::async_trait;
use futures::Stream;
use rivet_domain::error::{Error, Result};
use rivet_domain::ports::EventSink;
use rivet_domain::value_objects::OutboundEvent;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;

/// Sending half of a subscriber channel
///
/// The sink is closed when [`close`](EventSink::close) is called or when
/// the receiving [`EventStream`] is dropped (client disconnected).
pub struct ChannelSink {
    sender: mpsc::Sender<OutboundEvent>,
    send_timeout: Duration,
    closed: AtomicBool,
}

impl ChannelSink {
    /// Create a bounded channel
    pub fn channel(capacity: usize, send_timeout: Duration) -> (Self, EventStream) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let sink = Self {
            sender,
            send_timeout,
            closed: AtomicBool::new(false),
        };
        (sink, EventStream { receiver })
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn send(&self, event: &OutboundEvent) -> Result<()> {
        if self.is_closed() {
            return Err(Error::ChannelClosed);
        }
        match tokio::time::timeout(self.send_timeout, self.sender.send(event.clone())).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(Error::ChannelClosed),
            Err(elapsed) => Err(Error::io_with_source(
                format!("Event send timed out after {:?}", self.send_timeout),
                std::io::Error::new(std::io::ErrorKind::TimedOut, elapsed),
            )),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire) || self.sender.is_closed()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

/// Receiving half of a subscriber channel, in submission order
///
/// Ends once the sink is dropped and every buffered event was taken.
pub struct EventStream {
    receiver: mpsc::Receiver<OutboundEvent>,
}

impl EventStream {
    /// Next event, `None` once the channel has ended
    pub async fn recv(&mut self) -> Option<OutboundEvent> {
        self.receiver.recv().await
    }

    /// Stop accepting events; pending sends fail
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl Stream for EventStream {
    type Item = OutboundEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<OutboundEvent>> {
        self.receiver.poll_recv(cx)
    }
}
