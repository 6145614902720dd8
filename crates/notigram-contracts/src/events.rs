//! Channel lifecycle events.
//!
//! A channel fires [`ChannelEvent::Sending`] just before handing a message to
//! its API and [`ChannelEvent::Failed`] when delivery fails. The host decides
//! what to do with them; the default [`NullDispatcher`] drops everything.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Event fired around a channel send.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChannelEvent {
    /// A message is about to be handed to the channel's API.
    Sending {
        channel: String,
        recipient: Value,
        payload: Value,
        at: DateTime<Utc>,
    },
    /// The channel failed to deliver the message.
    Failed {
        channel: String,
        recipient: Value,
        payload: Value,
        error: String,
        at: DateTime<Utc>,
    },
}

impl ChannelEvent {
    /// Build a `Sending` event stamped with the current time.
    pub fn sending(channel: impl Into<String>, recipient: Value, payload: Value) -> Self {
        Self::Sending {
            channel: channel.into(),
            recipient,
            payload,
            at: Utc::now(),
        }
    }

    /// Build a `Failed` event stamped with the current time.
    pub fn failed(
        channel: impl Into<String>,
        recipient: Value,
        payload: Value,
        error: impl Into<String>,
    ) -> Self {
        Self::Failed {
            channel: channel.into(),
            recipient,
            payload,
            error: error.into(),
            at: Utc::now(),
        }
    }

    /// Name of the channel that produced this event.
    pub fn channel(&self) -> &str {
        match self {
            Self::Sending { channel, .. } | Self::Failed { channel, .. } => channel,
        }
    }

    /// Whether this is a failure event.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Sink for channel events.
///
/// The host framework typically forwards these into its own event bus;
/// implementations must be cheap and non-blocking, a send is waiting on them.
pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event: ChannelEvent);
}

/// Dispatcher that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDispatcher;

impl EventDispatcher for NullDispatcher {
    fn dispatch(&self, _event: ChannelEvent) {}
}

/// Dispatcher that records every event in memory.
#[cfg(feature = "test-utils")]
pub struct MemoryDispatcher {
    events: std::sync::Mutex<Vec<ChannelEvent>>,
}

#[cfg(feature = "test-utils")]
impl MemoryDispatcher {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all dispatched events, in order.
    pub fn events(&self) -> Vec<ChannelEvent> {
        self.events.lock().expect("dispatcher lock poisoned").clone()
    }
}

#[cfg(feature = "test-utils")]
impl Default for MemoryDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "test-utils")]
impl EventDispatcher for MemoryDispatcher {
    fn dispatch(&self, event: ChannelEvent) {
        self.events.lock().expect("dispatcher lock poisoned").push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_channel_accessor() {
        let event = ChannelEvent::sending("telegram", json!(123), json!({"text": "hi"}));
        assert_eq!(event.channel(), "telegram");
        assert!(!event.is_failure());
    }

    #[test]
    fn test_failed_event_carries_error() {
        let event = ChannelEvent::failed("telegram", json!(123), json!({}), "boom");
        assert!(event.is_failure());
        match event {
            ChannelEvent::Failed { error, .. } => assert_eq!(error, "boom"),
            ChannelEvent::Sending { .. } => panic!("expected failure event"),
        }
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = ChannelEvent::sending("telegram", json!(1), json!({}));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "sending");
        assert_eq!(value["channel"], "telegram");
    }
}
