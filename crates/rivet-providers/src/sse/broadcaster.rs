//! SSE broadcaster
//!
//! Fans an event out to every registered sink. The subscriber set is the
//! only shared mutable state; register, unregister, close and a broadcast
//! pass are serialized on one async mutex, so a pass never observes a
//! half-updated set and consecutive broadcasts reach each sink in
//! submission order.

use futures::future::join_all;
use rivet_domain::ports::EventSink;
use rivet_domain::value_objects::OutboundEvent;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

struct Subscriber {
    id: Uuid,
    sink: Arc<dyn EventSink>,
}

/// Outcome of one broadcast pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Sinks that accepted the event
    pub delivered: usize,
    /// Sinks that failed and were removed
    pub dropped: usize,
}

impl BroadcastReport {
    /// Whether every subscriber failed (and there was at least one)
    pub fn all_failed(&self) -> bool {
        self.delivered == 0 && self.dropped > 0
    }
}

/// Set of subscriber sinks receiving broadcast events
#[derive(Default)]
pub struct SseBroadcaster {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl SseBroadcaster {
    /// Empty broadcaster
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink; returns the id used to unregister it
    pub async fn register(&self, sink: Arc<dyn EventSink>) -> Uuid {
        let id = Uuid::new_v4();
        let mut subscribers = self.subscribers.lock().await;
        subscribers.push(Subscriber { id, sink });
        debug!(subscriber = %id, total = subscribers.len(), "Subscriber registered");
        id
    }

    /// Remove a sink without closing it
    pub async fn unregister(&self, id: Uuid) -> bool {
        let mut subscribers = self.subscribers.lock().await;
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        before != subscribers.len()
    }

    /// Send an event to every open sink
    ///
    /// A failing sink does not stop delivery to the others; it is removed
    /// from the set after the attempt. Never fails: when every sink fails
    /// the condition is logged as a warning.
    pub async fn broadcast(&self, event: &OutboundEvent) -> BroadcastReport {
        let mut subscribers = self.subscribers.lock().await;

        let outcomes = join_all(subscribers.iter().map(|subscriber| async move {
            if subscriber.sink.is_closed() {
                return Err(rivet_domain::Error::ChannelClosed);
            }
            subscriber.sink.send(event).await
        }))
        .await;

        let mut failed = Vec::new();
        for (subscriber, outcome) in subscribers.iter().zip(outcomes) {
            if let Err(e) = outcome {
                debug!(subscriber = %subscriber.id, error = %e, "Dropping subscriber");
                failed.push(subscriber.id);
            }
        }
        subscribers.retain(|s| !failed.contains(&s.id));

        let report = BroadcastReport {
            delivered: subscribers.len(),
            dropped: failed.len(),
        };
        if report.all_failed() {
            warn!(dropped = report.dropped, event = ?event.name(), "Broadcast failed on every subscriber");
        } else {
            debug!(delivered = report.delivered, dropped = report.dropped, "Event broadcast");
        }
        report
    }

    /// Close every sink and empty the set
    pub async fn close(&self) {
        let mut subscribers = self.subscribers.lock().await;
        join_all(subscribers.iter().map(|s| s.sink.close())).await;
        debug!(closed = subscribers.len(), "Broadcaster closed");
        subscribers.clear();
    }

    /// Number of registered sinks
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}

impl fmt::Debug for SseBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.subscribers.try_lock().map(|s| s.len()).ok();
        f.debug_struct("SseBroadcaster")
            .field("subscribers", &count)
            .finish()
    }
}
