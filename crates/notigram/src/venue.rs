//! Venue message builder.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::Telegram;
use crate::error::Result;
use crate::payload::{HasPayload, Payload};
use crate::sender::TelegramSender;

/// A `sendVenue` builder: a location with a title and street address,
/// optionally tagged with Foursquare or Google Places metadata.
#[derive(Debug, Clone)]
pub struct TelegramVenue {
    payload: Payload,
}

impl TelegramVenue {
    /// Create a venue message.
    pub fn new(
        latitude: f64,
        longitude: f64,
        title: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        let mut payload = Payload::new();
        payload.set("latitude", Value::from(latitude));
        payload.set("longitude", Value::from(longitude));
        payload.set("title", Value::from(title.into()));
        payload.set("address", Value::from(address.into()));
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

    /// Set the venue name.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.payload.set("title", Value::from(title.into()));
        self
    }

    /// Set the venue address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.payload.set("address", Value::from(address.into()));
        self
    }

    /// Foursquare identifier of the venue.
    pub fn foursquare_id(mut self, id: impl Into<String>) -> Self {
        self.payload.set("foursquare_id", Value::from(id.into()));
        self
    }

    /// Foursquare type of the venue.
    pub fn foursquare_type(mut self, kind: impl Into<String>) -> Self {
        self.payload.set("foursquare_type", Value::from(kind.into()));
        self
    }

    /// Google Places identifier of the venue.
    pub fn google_place_id(mut self, id: impl Into<String>) -> Self {
        self.payload.set("google_place_id", Value::from(id.into()));
        self
    }

    /// Google Places type of the venue.
    pub fn google_place_type(mut self, kind: impl Into<String>) -> Self {
        self.payload.set("google_place_type", Value::from(kind.into()));
        self
    }
}

impl HasPayload for TelegramVenue {
    fn payload(&self) -> &Payload {
        &self.payload
    }

    fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}

#[async_trait]
impl TelegramSender for TelegramVenue {
    async fn send(&self, client: &Telegram) -> Result<Value> {
        client.send_venue(self.payload.as_map()).await
    }
}
