//! Committed-change notifications.
//!
//! After a save is persisted, the server publishes a [`HeroChanged`] event so
//! that every open public view can refetch the configuration. Delivery is
//! best effort: a subscriber that falls behind skips to the newest events,
//! and a publish with no subscribers is not an error.

use serde::Serialize;
use tokio::sync::broadcast;

/// Buffered events per subscriber before old ones are dropped.
const CHANNEL_CAPACITY: usize = 16;

/// Event name used on the wire.
pub const HERO_UPDATED: &str = "hero-updated";

/// The hero configuration was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeroChanged {
    /// Commit time in milliseconds since the epoch.
    pub updated_at_ms: i64,
}

impl HeroChanged {
    /// An event stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            updated_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Fan-out of [`HeroChanged`] events to any number of subscribers.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<HeroChanged>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event; returns how many subscribers will see it.
    pub fn publish(&self, event: HeroChanged) -> usize {
        let delivered = self.tx.send(event).unwrap_or(0);
        tracing::debug!(delivered, updated_at_ms = event.updated_at_ms, "hero change published");
        delivered
    }

    /// Subscribe to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HeroChanged> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
