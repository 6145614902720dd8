//! Poll message builder.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::Telegram;
use crate::error::Result;
use crate::payload::{HasPayload, Payload};
use crate::sender::TelegramSender;

/// A `sendPoll` builder: a native Telegram poll.
///
/// The answer options are JSON-encoded into the `options` field, which is how
/// the form API expects array parameters.
#[derive(Debug, Clone)]
pub struct TelegramPoll {
    payload: Payload,
}

impl TelegramPoll {
    /// Create a poll with the given question.
    pub fn new(question: impl Into<String>) -> Self {
        let mut payload = Payload::new();
        payload.set("question", Value::from(question.into()));
        Self { payload }
    }

    /// Set the poll question.
    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.payload.set("question", Value::from(question.into()));
        self
    }

    /// Set the answer choices.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<Value> = choices.into_iter().map(|c| Value::from(c.into())).collect();
        self.payload
            .set("options", Value::from(Value::Array(options).to_string()));
        self
    }
}

impl HasPayload for TelegramPoll {
    fn payload(&self) -> &Payload {
        &self.payload
    }

    fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}

#[async_trait]
impl TelegramSender for TelegramPoll {
    async fn send(&self, client: &Telegram) -> Result<Value> {
        client.send_poll(self.payload.as_map()).await
    }
}
