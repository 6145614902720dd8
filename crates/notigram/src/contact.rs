//! Contact message builder.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::Telegram;
use crate::error::Result;
use crate::payload::{HasPayload, Payload};
use crate::sender::TelegramSender;

/// A `sendContact` builder: a phone contact card.
#[derive(Debug, Clone)]
pub struct TelegramContact {
    payload: Payload,
}

impl TelegramContact {
    /// Create a contact message for the given phone number.
    pub fn new(phone_number: impl Into<String>) -> Self {
        let mut payload = Payload::new();
        payload.set("phone_number", Value::from(phone_number.into()));
        Self { payload }
    }

    /// Set the contact's phone number.
    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.payload
            .set("phone_number", Value::from(phone_number.into()));
        self
    }

    /// Set the contact's first name.
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.payload.set("first_name", Value::from(first_name.into()));
        self
    }

    /// Set the contact's last name.
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.payload.set("last_name", Value::from(last_name.into()));
        self
    }

    /// Attach a vCard for the contact.
    pub fn vcard(mut self, vcard: impl Into<String>) -> Self {
        self.payload.set("vcard", Value::from(vcard.into()));
        self
    }
}

impl HasPayload for TelegramContact {
    fn payload(&self) -> &Payload {
        &self.payload
    }

    fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}

#[async_trait]
impl TelegramSender for TelegramContact {
    async fn send(&self, client: &Telegram) -> Result<Value> {
        client.send_contact(self.payload.as_map()).await
    }
}
