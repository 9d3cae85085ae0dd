//! Unit tests for SSE channels and broadcasting

use async_trait::async_trait;
use futures::StreamExt;
use rivet_domain::error::Result;
use rivet_domain::ports::EventSink;
use rivet_domain::value_objects::OutboundEvent;
use rivet_domain::Error;
use rivet_providers::{ChannelSink, Sse, SseBroadcaster, SseOptions};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn event(data: &str) -> OutboundEvent {
    Sse::default()
        .new_event_builder()
        .name("update")
        .data(data)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_broadcast_isolates_closed_channel() {
    let sse = Sse::default();
    let broadcaster = sse.new_broadcaster();

    let (first, mut first_rx) = sse.new_channel();
    let (second, second_rx) = sse.new_channel();
    let (third, mut third_rx) = sse.new_channel();
    broadcaster.register(Arc::new(first)).await;
    broadcaster.register(Arc::new(second)).await;
    broadcaster.register(Arc::new(third)).await;

    // Channel 2 is closed before the broadcast
    drop(second_rx);

    let report = broadcaster.broadcast(&event("hello")).await;

    assert_eq!(report.delivered, 2);
    assert_eq!(report.dropped, 1);
    assert_eq!(broadcaster.subscriber_count().await, 2);
    assert_eq!(first_rx.recv().await.unwrap().data(), Some("hello"));
    assert_eq!(third_rx.recv().await.unwrap().data(), Some("hello"));
}

#[tokio::test]
async fn test_per_channel_order_is_preserved() {
    let sse = Sse::default();
    let broadcaster = sse.new_broadcaster();
    let (sink, stream) = sse.new_channel();
    broadcaster.register(Arc::new(sink)).await;

    for n in 0..10 {
        broadcaster.broadcast(&event(&n.to_string())).await;
    }
    broadcaster.close().await;

    let received: Vec<String> = stream
        .map(|e| e.data().unwrap_or_default().to_string())
        .collect()
        .await;
    let expected: Vec<String> = (0..10).map(|n| n.to_string()).collect();
    assert_eq!(received, expected);
}

#[tokio::test]
async fn test_all_channels_failing_does_not_raise() {
    let sse = Sse::default();
    let broadcaster = sse.new_broadcaster();
    let (sink, stream) = sse.new_channel();
    broadcaster.register(Arc::new(sink)).await;
    drop(stream);

    let report = broadcaster.broadcast(&event("lost")).await;
    assert!(report.all_failed());
    assert_eq!(broadcaster.subscriber_count().await, 0);
}

#[tokio::test]
async fn test_broadcast_without_subscribers() {
    let broadcaster = SseBroadcaster::new();
    let report = broadcaster.broadcast(&event("nobody")).await;
    assert_eq!(report.delivered, 0);
    assert!(!report.all_failed());
}

#[tokio::test]
async fn test_unregister_removes_without_closing() {
    let sse = Sse::default();
    let broadcaster = sse.new_broadcaster();
    let (sink, _stream) = sse.new_channel();
    let sink = Arc::new(sink);
    let id = broadcaster.register(Arc::clone(&sink) as Arc<dyn EventSink>).await;

    assert!(broadcaster.unregister(id).await);
    assert!(!broadcaster.unregister(id).await);
    assert!(!sink.is_closed());
}

#[tokio::test]
async fn test_close_closes_every_sink() {
    let sse = Sse::default();
    let broadcaster = sse.new_broadcaster();
    let (sink, _stream) = sse.new_channel();
    let sink = Arc::new(sink);
    broadcaster.register(Arc::clone(&sink) as Arc<dyn EventSink>).await;

    broadcaster.close().await;

    assert!(sink.is_closed());
    assert_eq!(broadcaster.subscriber_count().await, 0);
    assert!(matches!(sink.send(&event("late")).await, Err(Error::ChannelClosed)));
}

#[tokio::test(start_paused = true)]
async fn test_full_channel_send_times_out() {
    let (sink, _stream) = ChannelSink::channel(1, Duration::from_millis(50));
    sink.send(&event("fills")).await.unwrap();

    let result = sink.send(&event("blocked")).await;
    assert!(matches!(result, Err(Error::Io { .. })));
}

/// Sink counting deliveries, failing after `limit`
struct CountingSink {
    delivered: AtomicUsize,
    limit: usize,
}

#[async_trait]
impl EventSink for CountingSink {
    async fn send(&self, _event: &OutboundEvent) -> Result<()> {
        if self.delivered.fetch_add(1, Ordering::SeqCst) >= self.limit {
            return Err(Error::ChannelClosed);
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }

    async fn close(&self) {}
}

#[tokio::test]
async fn test_concurrent_broadcast_and_register() {
    let broadcaster = Arc::new(SseBroadcaster::new());
    let sink = Arc::new(CountingSink {
        delivered: AtomicUsize::new(0),
        limit: usize::MAX,
    });
    broadcaster.register(Arc::clone(&sink) as Arc<dyn EventSink>).await;

    let mut tasks = Vec::new();
    for n in 0..20 {
        let broadcaster = Arc::clone(&broadcaster);
        tasks.push(tokio::spawn(async move {
            if n % 2 == 0 {
                broadcaster.broadcast(&event("tick")).await;
            } else {
                broadcaster
                    .register(Arc::new(CountingSink {
                        delivered: AtomicUsize::new(0),
                        limit: usize::MAX,
                    }))
                    .await;
            }
        }));
    }
    futures::future::join_all(tasks).await;

    assert_eq!(sink.delivered.load(Ordering::SeqCst), 10);
    assert_eq!(broadcaster.subscriber_count().await, 11);
}

#[tokio::test]
async fn test_failing_custom_sink_is_dropped_after_attempt() {
    let broadcaster = SseBroadcaster::new();
    let flaky = Arc::new(CountingSink {
        delivered: AtomicUsize::new(0),
        limit: 1,
    });
    broadcaster.register(Arc::clone(&flaky) as Arc<dyn EventSink>).await;

    assert_eq!(broadcaster.broadcast(&event("one")).await.delivered, 1);
    assert_eq!(broadcaster.broadcast(&event("two")).await.dropped, 1);
    assert_eq!(broadcaster.subscriber_count().await, 0);
    assert_eq!(flaky.delivered.load(Ordering::SeqCst), 2);
}

#[test]
fn test_retry_event_uses_configured_delay() {
    let sse = Sse::new(SseOptions {
        reconnect_delay: Duration::from_millis(1500),
        ..SseOptions::default()
    });
    let event = sse.new_retry_event_builder().comment("connected").build().unwrap();
    assert!(event.to_wire().contains("retry: 1500\n"));
}
