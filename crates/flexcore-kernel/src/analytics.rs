//! Analytics sink and broadcast event bus.
//!
//! Every user-facing component reports interactions through the
//! [`AnalyticsSink`] seam as a `(category, action, label)` triple.  Tracking
//! is fire-and-forget: it returns nothing, never fails, and never blocks the
//! caller.
//!
//! [`EventBus`] is the publishing implementation, built on top of
//! [`tokio::sync::broadcast`].  Events are wrapped in [`Arc`] so that
//! broadcasting to multiple subscribers does not clone the payload.
//!
//! # Usage
//!
//! ```rust,no_run
//! # use flexcore_kernel::analytics::{AnalyticsSink, EventBus};
//! # async fn example() {
//! let bus = EventBus::new(256);
//! let mut rx = bus.subscribe();
//!
//! bus.track("Chatbot", "open", "toggle_button");
//!
//! let event = rx.recv().await.unwrap();
//! assert_eq!(event.action, "open");
//! # }
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Sink seam
// ---------------------------------------------------------------------------

/// Destination for interaction analytics.
pub trait AnalyticsSink: Send + Sync {
    /// Record one interaction.  Must not panic, block, or report failure.
    fn track(&self, category: &str, action: &str, label: &str);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _category: &str, _action: &str, _label: &str) {}
}

/// Sink that emits each event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, category: &str, action: &str, label: &str) {
        tracing::info!(target: "analytics", category, action, label, "event tracked");
    }
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// One tracked interaction as published on the [`EventBus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Unique, time-ordered identifier.
    pub id: Uuid,
    /// Feature area, e.g. `"Chatbot"` or `"Ecommerce"`.
    pub category: String,
    /// What happened, e.g. `"open"` or `"add_to_cart"`.
    pub action: String,
    /// Free-form detail, e.g. a product id.
    pub label: String,
    /// When the event was tracked.
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create an event stamped with a fresh id and the current time.
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            category: category.into(),
            action: action.into(),
            label: label.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Event bus
// ---------------------------------------------------------------------------

/// Publish/subscribe analytics bus backed by [`tokio::sync::broadcast`].
///
/// The bus is cheaply cloneable (`Arc`-backed) and `Send + Sync`.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

struct EventBusInner {
    sender: broadcast::Sender<Arc<AnalyticsEvent>>,
}

impl EventBus {
    /// Create a new bus with the given channel capacity.
    ///
    /// If a subscriber falls behind by more than `capacity` events, it will
    /// receive a [`broadcast::error::RecvError::Lagged`] error indicating how
    /// many events were missed.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(EventBusInner { sender }),
        }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of receivers that will observe this event.  With no
    /// active subscribers the event is dropped and `0` is returned.
    pub fn publish(&self, event: AnalyticsEvent) -> usize {
        match self.inner.sender.send(Arc::new(event)) {
            Ok(n) => {
                tracing::trace!(receivers = n, "analytics event published");
                n
            }
            Err(_) => {
                tracing::trace!("analytics event published but no active receivers");
                0
            }
        }
    }

    /// Create a new subscriber that will receive all future events.
    ///
    /// Events published *before* this call are **not** replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<AnalyticsEvent>> {
        self.inner.sender.subscribe()
    }

    /// Return the current number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }
}

impl AnalyticsSink for EventBus {
    fn track(&self, category: &str, action: &str, label: &str) {
        self.publish(AnalyticsEvent::new(category, action, label));
    }
}

// ---------------------------------------------------------------------------
// Recording sink
// ---------------------------------------------------------------------------

/// Sink that keeps every `(category, action, label)` triple in memory.
///
/// Intended for tests that assert on emitted analytics.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<(String, String, String)>>,
}

impl RecordingAnalytics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything tracked so far, oldest first.
    pub fn events(&self) -> Vec<(String, String, String)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Return the actions tracked under `category`, oldest first.
    pub fn actions(&self, category: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(c, _, _)| c == category)
            .map(|(_, action, _)| action)
            .collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, category: &str, action: &str, label: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((category.to_owned(), action.to_owned(), label.to_owned()));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
