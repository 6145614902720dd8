//! Sendable-message contract used by the channel shim.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::Telegram;
use crate::error::Result;
use crate::payload::HasPayload;

/// A composed message that knows which Bot API method delivers it.
///
/// Every builder (message, file, location, venue, contact, poll) implements
/// this; the channel shim works with `Box<dyn TelegramSender>` so a
/// notification can produce any message kind.
#[async_trait]
pub trait TelegramSender: HasPayload + Send + Sync {
    /// Deliver through the given client. Returns the decoded API response;
    /// chunked text sends return an array of responses.
    async fn send(&self, client: &Telegram) -> Result<Value>;
}
