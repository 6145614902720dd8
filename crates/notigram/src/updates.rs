//! `getUpdates` query builder.
//!
//! Mostly a convenience for verifying a bot token and discovering chat IDs;
//! the adapter itself never polls.

use serde_json::{Map, Value};

use crate::client::Telegram;
use crate::error::Result;

/// A `getUpdates` request.
#[derive(Debug, Clone, Default)]
pub struct TelegramUpdates {
    params: Map<String, Value>,
}

impl TelegramUpdates {
    pub fn new() -> Self {
        Self { params: Map::new() }
    }

    /// Limit the number of updates returned (1-100).
    pub fn limit(mut self, limit: u64) -> Self {
        self.params.insert("limit".to_string(), Value::from(limit));
        self
    }

    /// Identifier of the first update to return.
    pub fn offset(mut self, offset: i64) -> Self {
        self.params.insert("offset".to_string(), Value::from(offset));
        self
    }

    /// Merge additional parameters.
    pub fn options(mut self, options: Map<String, Value>) -> Self {
        for (key, value) in options {
            self.params.insert(key, value);
        }
        self
    }

    /// Fetch the updates through the given client.
    pub async fn get(self, client: &Telegram) -> Result<Value> {
        client.get_updates(&self.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_updates_params() {
        let mut extra = Map::new();
        extra.insert("timeout".to_string(), json!(10));

        let updates = TelegramUpdates::new().limit(5).offset(42).options(extra);
        assert_eq!(updates.params["limit"], json!(5));
        assert_eq!(updates.params["offset"], json!(42));
        assert_eq!(updates.params["timeout"], json!(10));
    }
}
