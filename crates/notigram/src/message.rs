//! Text message builder with chunked sending.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;
use tracing::debug;

use crate::chunk::{TELEGRAM_MAX_LEN, chunk_text};
use crate::client::Telegram;
use crate::error::Result;
use crate::payload::{HasPayload, ParseMode, Payload, PayloadBuilder};
use crate::sender::TelegramSender;

/// Pause between chunked sends, respecting Telegram's per-chat rate limit.
const CHUNK_PACING: Duration = Duration::from_secs(1);

/// A `sendMessage` builder.
///
/// Defaults to Markdown parse mode. Content above Telegram's 4096-character
/// limit can be split into multiple messages via [`TelegramMessage::chunk`].
#[derive(Debug, Clone)]
pub struct TelegramMessage {
    payload: Payload,
    chunk_size: usize,
}

impl TelegramMessage {
    /// Create a message with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        let message = Self {
            payload: Payload::new(),
            chunk_size: 0,
        };
        message.parse_mode(ParseMode::Markdown).content(content)
    }

    /// Replace the message content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.payload.set("text", Value::from(content.into()));
        self
    }

    /// Append a line to the content.
    pub fn line(mut self, line: impl AsRef<str>) -> Self {
        let mut text = self
            .payload
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        text.push_str(line.as_ref());
        text.push('\n');
        self.payload.set("text", Value::from(text));
        self
    }

    /// Append a line only when the condition holds.
    pub fn line_if(self, condition: bool, line: impl AsRef<str>) -> Self {
        if condition { self.line(line) } else { self }
    }

    /// Append a line with MarkdownV2 special characters escaped.
    pub fn escaped_line(self, line: impl AsRef<str>) -> Self {
        let escaped = escape_markdown_v2(line.as_ref());
        self.line(escaped)
    }

    /// Split content above `limit` characters into multiple messages.
    /// The limit is capped at Telegram's 4096.
    pub fn chunk(mut self, limit: usize) -> Self {
        self.chunk_size = limit.min(TELEGRAM_MAX_LEN);
        self
    }

    /// Whether chunked sending is enabled.
    pub fn should_chunk(&self) -> bool {
        self.chunk_size > 0
    }

    async fn send_chunked(&self, client: &Telegram) -> Result<Value> {
        let mut params = self.payload.as_map().clone();
        // Keyboards go out with the final chunk only; duplicating them on
        // every chunk litters the chat with keyboards.
        let reply_markup = params.remove("reply_markup");
        let text = params
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let chunks = chunk_text(&text, self.chunk_size);
        let last = chunks.len().saturating_sub(1);
        let mut responses = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            let mut payload = params.clone();
            payload.insert("text".to_string(), Value::from(chunk.as_str()));
            if index == last
                && let Some(markup) = &reply_markup
            {
                payload.insert("reply_markup".to_string(), markup.clone());
            }

            responses.push(client.send_message(&payload).await?);

            if index < last {
                debug!(chunk = index + 1, total = last + 1, "pacing chunked send");
                sleep(CHUNK_PACING).await;
            }
        }

        Ok(Value::Array(responses))
    }
}

impl HasPayload for TelegramMessage {
    fn payload(&self) -> &Payload {
        &self.payload
    }

    fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}

#[async_trait]
impl TelegramSender for TelegramMessage {
    async fn send(&self, client: &Telegram) -> Result<Value> {
        if self.should_chunk() {
            self.send_chunked(client).await
        } else {
            client.send_message(self.payload.as_map()).await
        }
    }
}

/// Escape the characters MarkdownV2 treats as markup.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '_'
                | '*'
                | '['
                | ']'
                | '('
                | ')'
                | '~'
                | '`'
                | '>'
                | '#'
                | '+'
                | '-'
                | '='
                | '|'
                | '{'
                | '}'
                | '.'
                | '!'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_defaults_to_markdown() {
        let message = TelegramMessage::new("hello").to(12345);
        assert_eq!(message.payload_value("text"), Some(&json!("hello")));
        assert_eq!(message.payload_value("parse_mode"), Some(&json!("Markdown")));
        assert_eq!(message.payload_value("chat_id"), Some(&json!(12345)));
    }

    #[test]
    fn test_line_appends_with_newline() {
        let message = TelegramMessage::new("").line("first").line("second");
        assert_eq!(message.payload_value("text"), Some(&json!("first\nsecond\n")));
    }

    #[test]
    fn test_line_if() {
        let message = TelegramMessage::new("")
            .line_if(true, "kept")
            .line_if(false, "dropped");
        assert_eq!(message.payload_value("text"), Some(&json!("kept\n")));
    }

    #[test]
    fn test_escaped_line() {
        let message = TelegramMessage::new("").escaped_line("1. a_b *c* [link](x)!");
        assert_eq!(
            message.payload_value("text"),
            Some(&json!("1\\. a\\_b \\*c\\* \\[link\\]\\(x\\)\\!\n"))
        );
    }

    #[test]
    fn test_escape_backslash_first() {
        assert_eq!(escape_markdown_v2(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_chunk_enables_chunking_and_caps_limit() {
        let message = TelegramMessage::new("hi");
        assert!(!message.should_chunk());

        let message = message.chunk(10_000);
        assert!(message.should_chunk());
        assert_eq!(message.chunk_size, TELEGRAM_MAX_LEN);
    }

    #[test]
    fn test_builder_options_reach_payload() {
        let mut extra = serde_json::Map::new();
        extra.insert("disable_web_page_preview".to_string(), json!(true));

        let message = TelegramMessage::new("hi").options(extra);
        assert_eq!(
            message.payload_value("disable_web_page_preview"),
            Some(&json!(true))
        );
    }
}
