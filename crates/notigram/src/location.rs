//! Location message builder.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::Telegram;
use crate::error::Result;
use crate::payload::{HasPayload, Payload};
use crate::sender::TelegramSender;

/// A `sendLocation` builder: a point on the map.
#[derive(Debug, Clone)]
pub struct TelegramLocation {
    payload: Payload,
}

impl TelegramLocation {
    /// Create a location message for the given coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let mut payload = Payload::new();
        payload.set("latitude", Value::from(latitude));
        payload.set("longitude", Value::from(longitude));
        Self { payload }
    }

    /// Set the latitude.
    pub fn latitude(mut self, latitude: f64) -> Self {
        self.payload.set("latitude", Value::from(latitude));
        self
    }

    /// Set the longitude.
    pub fn longitude(mut self, longitude: f64) -> Self {
        self.payload.set("longitude", Value::from(longitude));
        self
    }
}

impl HasPayload for TelegramLocation {
    fn payload(&self) -> &Payload {
        &self.payload
    }

    fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}

#[async_trait]
impl TelegramSender for TelegramLocation {
    async fn send(&self, client: &Telegram) -> Result<Value> {
        client.send_location(self.payload.as_map()).await
    }
}
