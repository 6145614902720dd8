//! Telegram Bot API HTTP client.
//!
//! One POST per call: `{base}/bot{token}/{method}`, form-encoded parameters,
//! or multipart/form-data when a file part is attached. Responses are decoded
//! JSON; `"ok": false` bodies and non-2xx statuses become [`Error::Api`] with
//! the `error_code` and `description` Telegram reports.

use std::time::Duration;

use reqwest::multipart::Form;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::TelegramConfig;
use crate::error::{Error, Result};

/// Default Telegram Bot API host.
pub const API_BASE_URL: &str = "https://api.telegram.org";

/// Default timeout for API calls (seconds).
const API_TIMEOUT_SECS: u64 = 30;

/// Telegram Bot API sender.
#[derive(Debug, Clone)]
pub struct Telegram {
    token: Option<String>,
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Telegram {
    /// Create a client for the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            http: reqwest::Client::new(),
            base_url: API_BASE_URL.to_string(),
            timeout: Duration::from_secs(API_TIMEOUT_SECS),
        }
    }

    /// Create a client without a token; any request fails with
    /// [`Error::TokenNotProvided`] until one is set.
    pub fn without_token() -> Self {
        Self {
            token: None,
            http: reqwest::Client::new(),
            base_url: API_BASE_URL.to_string(),
            timeout: Duration::from_secs(API_TIMEOUT_SECS),
        }
    }

    /// Build a client from configuration.
    pub fn from_config(config: &TelegramConfig) -> Self {
        Self {
            token: Some(config.bot_token.clone()),
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Clone of this client with a different bot token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.token = Some(token.into());
        client
    }

    /// Override the API base URL (self-hosted Bot API servers, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Current bot token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replace the bot token.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// URL for an API method, failing when no token is configured.
    fn api_url(&self, method: &str) -> Result<String> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(Error::TokenNotProvided)?;
        Ok(format!("{}/bot{}/{}", self.base_url, token, method))
    }

    /// Send a text message.
    ///
    /// <https://core.telegram.org/bots/api#sendmessage>
    pub async fn send_message(&self, params: &Map<String, Value>) -> Result<Value> {
        self.send_request("sendMessage", params).await
    }

    /// Send a location.
    pub async fn send_location(&self, params: &Map<String, Value>) -> Result<Value> {
        self.send_request("sendLocation", params).await
    }

    /// Send a venue.
    pub async fn send_venue(&self, params: &Map<String, Value>) -> Result<Value> {
        self.send_request("sendVenue", params).await
    }

    /// Send a contact.
    pub async fn send_contact(&self, params: &Map<String, Value>) -> Result<Value> {
        self.send_request("sendContact", params).await
    }

    /// Send a native poll.
    pub async fn send_poll(&self, params: &Map<String, Value>) -> Result<Value> {
        self.send_request("sendPoll", params).await
    }

    /// Fetch bot updates (useful for discovering chat IDs).
    ///
    /// <https://core.telegram.org/bots/api#getupdates>
    pub async fn get_updates(&self, params: &Map<String, Value>) -> Result<Value> {
        self.send_request("getUpdates", params).await
    }

    /// POST form-encoded parameters to an API method.
    pub async fn send_request(&self, method: &str, params: &Map<String, Value>) -> Result<Value> {
        let url = self.api_url(method)?;
        debug!(method, "sending Telegram API request");

        let response = self
            .http
            .post(&url)
            .form(params)
            .timeout(self.timeout)
            .send()
            .await?;

        Self::decode_response(response).await
    }

    /// POST a multipart form (file uploads) to an API method.
    pub async fn send_multipart(&self, method: &str, form: Form) -> Result<Value> {
        let url = self.api_url(method)?;
        debug!(method, "sending Telegram API multipart request");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?;

        Self::decode_response(response).await
    }

    /// Decode a Bot API response, mapping failures to [`Error::Api`].
    async fn decode_response(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            // Non-JSON error bodies (proxies, gateways) keep the raw text.
            Err(_) if !status.is_success() => {
                return Err(Error::Api {
                    error_code: i64::from(status.as_u16()),
                    description: text,
                });
            }
            Err(err) => return Err(err.into()),
        };

        let ok = body.get("ok").and_then(Value::as_bool).unwrap_or(false);
        if status.is_success() && ok {
            return Ok(body);
        }

        let error_code = body
            .get("error_code")
            .and_then(Value::as_i64)
            .unwrap_or_else(|| i64::from(status.as_u16()));
        let description = body
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("Telegram returned an unexpected response")
            .to_string();

        Err(Error::Api {
            error_code,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let client = Telegram::new("123:ABC");
        assert_eq!(
            client.api_url("sendMessage").unwrap(),
            "https://api.telegram.org/bot123:ABC/sendMessage"
        );
    }

    #[test]
    fn test_api_url_without_token() {
        let client = Telegram::without_token();
        assert!(matches!(
            client.api_url("sendMessage"),
            Err(Error::TokenNotProvided)
        ));

        let empty = Telegram::new("");
        assert!(matches!(
            empty.api_url("sendMessage"),
            Err(Error::TokenNotProvided)
        ));
    }

    #[test]
    fn test_with_token_does_not_mutate_original() {
        let client = Telegram::new("original");
        let override_client = client.with_token("override");
        assert_eq!(client.token(), Some("original"));
        assert_eq!(override_client.token(), Some("override"));
    }

    #[test]
    fn test_from_config() {
        let config = TelegramConfig::new("123:ABC")
            .with_base_url("http://localhost:8081")
            .with_timeout_secs(5);
        let client = Telegram::from_config(&config);
        assert_eq!(
            client.api_url("getUpdates").unwrap(),
            "http://localhost:8081/bot123:ABC/getUpdates"
        );
        assert_eq!(client.timeout, Duration::from_secs(5));
    }
}
