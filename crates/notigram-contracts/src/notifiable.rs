//! Recipient routing.

use serde_json::Value;

/// An entity that can receive notifications.
///
/// The channel only asks a notifiable *where* to deliver. For Telegram the
/// route is a chat ID, either numeric or an `@channelusername` string.
pub trait Notifiable: Send + Sync {
    /// Return the delivery route for the named channel, or `None` when the
    /// entity has no route for that channel.
    fn route(&self, channel: &str) -> Option<Value>;
}

/// A notifiable with a fixed route for a single channel.
///
/// Useful for one-off sends and tests, where there is no user model to route
/// through.
#[derive(Debug, Clone)]
pub struct StaticRoute {
    channel: String,
    route: Value,
}

impl StaticRoute {
    /// Create a route for the given channel name.
    pub fn new(channel: impl Into<String>, route: impl Into<Value>) -> Self {
        Self {
            channel: channel.into(),
            route: route.into(),
        }
    }
}

impl Notifiable for StaticRoute {
    fn route(&self, channel: &str) -> Option<Value> {
        (self.channel == channel).then(|| self.route.clone())
    }
}
