//! Notification channel glue.
//!
//! [`TelegramChannel`] connects notification types to the HTTP client: it
//! resolves the recipient from the [`Notifiable`] when the message does not
//! carry one, honors per-message token overrides and send conditions, and
//! reports lifecycle events through an [`EventDispatcher`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use notigram_contracts::events::{ChannelEvent, EventDispatcher, NullDispatcher};
use notigram_contracts::notifiable::Notifiable;

use crate::client::Telegram;
use crate::error::Result;
use crate::payload::value_to_string;
use crate::sender::TelegramSender;

/// Route name notifiables answer to.
pub const CHANNEL_NAME: &str = "telegram";

/// Something that can render itself as a Telegram message.
pub trait TelegramNotification: Send + Sync {
    /// Build the message to deliver to the given notifiable.
    fn to_telegram(&self, notifiable: &dyn Notifiable) -> Box<dyn TelegramSender>;
}

/// Delivery channel for Telegram notifications.
pub struct TelegramChannel {
    client: Telegram,
    events: Arc<dyn EventDispatcher>,
}

impl TelegramChannel {
    /// Create a channel over the given client. Events go nowhere.
    pub fn new(client: Telegram) -> Self {
        Self {
            client,
            events: Arc::new(NullDispatcher),
        }
    }

    /// Create a channel that reports lifecycle events to `events`.
    pub fn with_dispatcher(client: Telegram, events: Arc<dyn EventDispatcher>) -> Self {
        Self { client, events }
    }

    /// Deliver `notification` to `notifiable`.
    ///
    /// Returns `Ok(None)` when the message declined to send or no recipient
    /// could be resolved, and `Ok(Some(response))` with the API response
    /// otherwise. Failures are dispatched as [`ChannelEvent::Failed`] before
    /// being returned.
    pub async fn send(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn TelegramNotification,
    ) -> Result<Option<Value>> {
        let mut message = notification.to_telegram(notifiable);

        if !message.payload().can_send() {
            debug!("message send condition is false, skipping");
            return Ok(None);
        }

        if message.payload().get("chat_id").is_none() {
            let Some(route) = notifiable.route(CHANNEL_NAME) else {
                debug!("notifiable has no telegram route, skipping");
                return Ok(None);
            };
            message.payload_mut().set("chat_id", route);
        }

        let override_client;
        let client = match message.payload().token_override() {
            Some(token) => {
                override_client = self.client.with_token(token);
                &override_client
            }
            None => &self.client,
        };

        let recipient = message
            .payload()
            .get("chat_id")
            .cloned()
            .unwrap_or(Value::Null);
        let payload = message.payload().to_value();

        self.events.dispatch(ChannelEvent::sending(
            CHANNEL_NAME,
            recipient.clone(),
            payload.clone(),
        ));

        match message.send(client).await {
            Ok(response) => Ok(Some(response)),
            Err(err) => {
                warn!(
                    recipient = %value_to_string(&recipient),
                    error = %err,
                    "telegram notification failed"
                );
                self.events.dispatch(ChannelEvent::failed(
                    CHANNEL_NAME,
                    recipient,
                    payload,
                    err.to_string(),
                ));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::TelegramMessage;
    use crate::payload::PayloadBuilder;
    use notigram_contracts::notifiable::StaticRoute;

    struct Greeting;

    impl TelegramNotification for Greeting {
        fn to_telegram(&self, _notifiable: &dyn Notifiable) -> Box<dyn TelegramSender> {
            Box::new(TelegramMessage::new("hello"))
        }
    }

    struct Suppressed;

    impl TelegramNotification for Suppressed {
        fn to_telegram(&self, _notifiable: &dyn Notifiable) -> Box<dyn TelegramSender> {
            Box::new(TelegramMessage::new("never").send_when(false))
        }
    }

    struct Unroutable;

    impl Notifiable for Unroutable {
        fn route(&self, _channel: &str) -> Option<Value> {
            None
        }
    }

    #[tokio::test]
    async fn test_send_condition_false_skips() {
        let channel = TelegramChannel::new(Telegram::new("token"));
        let result = channel
            .send(&StaticRoute::new(CHANNEL_NAME, 12345), &Suppressed)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_missing_route_skips() {
        let channel = TelegramChannel::new(Telegram::new("token"));
        let result = channel.send(&Unroutable, &Greeting).await.unwrap();
        assert!(result.is_none());
    }
}
