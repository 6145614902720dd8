//! Shared payload construction for all message builders.
//!
//! Every message kind carries the same mutable key-value payload: string keys,
//! JSON scalar values (nested structures like `reply_markup` are stored as
//! JSON-encoded strings, which is what the Bot API expects in form fields).
//! The [`PayloadBuilder`] trait provides the fluent setters common to all
//! builders; each builder only adds its kind-specific fields on top.

use serde_json::{Map, Value, json};

/// Parse mode for message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Markdown,
    Html,
    MarkdownV2,
}

impl ParseMode {
    /// Wire value for the `parse_mode` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
            Self::MarkdownV2 => "MarkdownV2",
        }
    }
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target chat: a numeric ID or a public `@channelusername`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl ChatId {
    pub(crate) fn into_value(self) -> Value {
        match self {
            Self::Id(id) => Value::from(id),
            Self::Username(name) => Value::from(name),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<i32> for ChatId {
    fn from(id: i32) -> Self {
        Self::Id(id.into())
    }
}

impl From<&str> for ChatId {
    fn from(name: &str) -> Self {
        Self::Username(name.to_string())
    }
}

impl From<String> for ChatId {
    fn from(name: String) -> Self {
        Self::Username(name)
    }
}

/// Mutable key-value payload shared by every message builder.
///
/// Also tracks builder state that never goes over the wire directly: the
/// accumulated keyboard rows, the per-message token override, and the send
/// condition.
#[derive(Debug, Clone)]
pub struct Payload {
    params: Map<String, Value>,
    inline_buttons: Vec<Value>,
    keyboard_buttons: Vec<Value>,
    columns: usize,
    token: Option<String>,
    send_condition: Option<bool>,
}

impl Payload {
    pub fn new() -> Self {
        Self {
            params: Map::new(),
            inline_buttons: Vec::new(),
            keyboard_buttons: Vec::new(),
            columns: 2,
            token: None,
            send_condition: None,
        }
    }

    /// Set a payload field.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.params.insert(key.into(), value);
    }

    /// Remove a payload field.
    pub fn remove(&mut self, key: &str) {
        self.params.remove(key);
    }

    /// Get a payload field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Merge extra parameters into the payload. Caller wins on conflicts.
    pub fn merge(&mut self, options: Map<String, Value>) {
        for (key, value) in options {
            self.params.insert(key, value);
        }
    }

    /// Borrow the raw parameter map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Snapshot the payload as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.params.clone())
    }

    /// Per-message bot token override, if any.
    pub fn token_override(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Whether the send condition allows sending. Defaults to true.
    pub fn can_send(&self) -> bool {
        self.send_condition.unwrap_or(true)
    }

    pub(crate) fn set_send_condition(&mut self, condition: bool) {
        self.send_condition = Some(condition);
    }

    pub(crate) fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    /// Store raw keyboard markup, JSON-encoded as the form API requires.
    pub(crate) fn set_keyboard_markup(&mut self, markup: &Value) {
        self.params
            .insert("reply_markup".to_string(), Value::from(markup.to_string()));
    }

    pub(crate) fn push_inline_button(&mut self, button: Value) {
        self.inline_buttons.push(button);
        let markup = json!({
            "inline_keyboard": chunk_rows(&self.inline_buttons, self.columns),
        });
        self.set_keyboard_markup(&markup);
    }

    pub(crate) fn push_keyboard_button(&mut self, button: Value) {
        self.keyboard_buttons.push(button);
        let markup = json!({
            "keyboard": chunk_rows(&self.keyboard_buttons, self.columns),
            "one_time_keyboard": true,
            "resize_keyboard": true,
        });
        self.set_keyboard_markup(&markup);
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::new()
    }
}

/// Split buttons into rows of `columns` entries.
fn chunk_rows(buttons: &[Value], columns: usize) -> Vec<Value> {
    buttons
        .chunks(columns.max(1))
        .map(|row| Value::Array(row.to_vec()))
        .collect()
}

/// Render a payload value as a form-field string.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Payload access shared by every message builder.
///
/// Object-safe so the channel shim can fill a missing chat id through a
/// `dyn` sendable message.
pub trait HasPayload {
    fn payload(&self) -> &Payload;
    fn payload_mut(&mut self) -> &mut Payload;
}

/// Fluent setters common to every message builder: recipient, parse mode,
/// keyboards, notification options, token override, conditional sending.
pub trait PayloadBuilder: HasPayload + Sized {
    /// Set the recipient's chat ID.
    fn to(mut self, chat_id: impl Into<ChatId>) -> Self {
        let value = chat_id.into().into_value();
        self.payload_mut().set("chat_id", value);
        self
    }

    /// Merge additional parameters into the request payload.
    fn options(mut self, options: Map<String, Value>) -> Self {
        self.payload_mut().merge(options);
        self
    }

    /// Set the parse mode of the message text.
    fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.payload_mut()
            .set("parse_mode", Value::from(mode.as_str()));
        self
    }

    /// Clear the parse mode, sending the text as plain text.
    fn normal(mut self) -> Self {
        self.payload_mut().remove("parse_mode");
        self
    }

    /// Send silently; recipients get a notification with no sound.
    fn disable_notification(mut self, disable: bool) -> Self {
        self.payload_mut()
            .set("disable_notification", Value::from(disable));
        self
    }

    /// Override the bot token for this message only.
    fn token(mut self, token: impl Into<String>) -> Self {
        self.payload_mut().set_token(token.into());
        self
    }

    /// Whether a per-message token override is set.
    fn has_token(&self) -> bool {
        self.payload().token_override().is_some()
    }

    /// Number of buttons per keyboard row for subsequent button calls
    /// (default: 2).
    fn buttons_per_row(mut self, columns: usize) -> Self {
        self.payload_mut().set_columns(columns);
        self
    }

    /// Add an inline URL button.
    fn button(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.payload_mut().push_inline_button(json!({
            "text": text.into(),
            "url": url.into(),
        }));
        self
    }

    /// Add an inline button with callback data.
    fn button_with_callback(
        mut self,
        text: impl Into<String>,
        callback_data: impl Into<String>,
    ) -> Self {
        self.payload_mut().push_inline_button(json!({
            "text": text.into(),
            "callback_data": callback_data.into(),
        }));
        self
    }

    /// Add an inline button that opens a Web App.
    fn button_with_web_app(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.payload_mut().push_inline_button(json!({
            "text": text.into(),
            "web_app": { "url": url.into() },
        }));
        self
    }

    /// Add a reply keyboard button.
    fn keyboard(self, text: impl Into<String>) -> Self {
        self.keyboard_requesting(text, false, false)
    }

    /// Add a reply keyboard button that may request the user's contact or
    /// location.
    fn keyboard_requesting(
        mut self,
        text: impl Into<String>,
        request_contact: bool,
        request_location: bool,
    ) -> Self {
        self.payload_mut().push_keyboard_button(json!({
            "text": text.into(),
            "request_contact": request_contact,
            "request_location": request_location,
        }));
        self
    }

    /// Set raw keyboard markup, replacing any accumulated buttons.
    fn keyboard_markup(mut self, markup: Value) -> Self {
        self.payload_mut().set_keyboard_markup(&markup);
        self
    }

    /// Set a condition for sending the message.
    fn send_when(mut self, condition: bool) -> Self {
        self.payload_mut().set_send_condition(condition);
        self
    }

    /// Whether the message can be sent based on the condition.
    fn can_send(&self) -> bool {
        self.payload().can_send()
    }

    /// Whether the recipient chat ID is missing from the payload.
    fn chat_id_missing(&self) -> bool {
        self.payload().get("chat_id").is_none()
    }

    /// Get a payload value for the given key.
    fn payload_value(&self, key: &str) -> Option<&Value> {
        self.payload().get(key)
    }

    /// Snapshot the payload as a parameter map.
    fn to_map(&self) -> Map<String, Value> {
        self.payload().as_map().clone()
    }
}

impl<T: HasPayload> PayloadBuilder for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestBuilder {
        payload: Payload,
    }

    impl TestBuilder {
        fn new() -> Self {
            Self {
                payload: Payload::new(),
            }
        }
    }

    impl HasPayload for TestBuilder {
        fn payload(&self) -> &Payload {
            &self.payload
        }

        fn payload_mut(&mut self) -> &mut Payload {
            &mut self.payload
        }
    }

    #[test]
    fn test_to_accepts_id_and_username() {
        let builder = TestBuilder::new().to(12345);
        assert_eq!(builder.payload_value("chat_id"), Some(&json!(12345)));

        let builder = TestBuilder::new().to("@mychannel");
        assert_eq!(builder.payload_value("chat_id"), Some(&json!("@mychannel")));
    }

    #[test]
    fn test_parse_mode_and_normal() {
        let builder = TestBuilder::new().parse_mode(ParseMode::Html);
        assert_eq!(builder.payload_value("parse_mode"), Some(&json!("HTML")));

        let builder = builder.normal();
        assert!(builder.payload_value("parse_mode").is_none());
    }

    #[test]
    fn test_options_merge_overrides() {
        let mut options = Map::new();
        options.insert("disable_notification".to_string(), json!(true));
        options.insert("message_thread_id".to_string(), json!(7));

        let builder = TestBuilder::new()
            .disable_notification(false)
            .options(options);

        assert_eq!(
            builder.payload_value("disable_notification"),
            Some(&json!(true))
        );
        assert_eq!(builder.payload_value("message_thread_id"), Some(&json!(7)));
    }

    #[test]
    fn test_inline_buttons_chunk_into_rows() {
        let builder = TestBuilder::new()
            .button("A", "https://a.example")
            .button("B", "https://b.example")
            .button("C", "https://c.example");

        let markup = builder.payload_value("reply_markup").unwrap();
        // Stored as a JSON-encoded string for form transport.
        let decoded: Value = serde_json::from_str(markup.as_str().unwrap()).unwrap();
        let rows = decoded["inline_keyboard"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].as_array().unwrap().len(), 2);
        assert_eq!(rows[1].as_array().unwrap().len(), 1);
        assert_eq!(rows[1][0]["text"], "C");
    }

    #[test]
    fn test_buttons_per_row() {
        let builder = TestBuilder::new()
            .buttons_per_row(1)
            .button("A", "https://a.example")
            .button("B", "https://b.example");

        let markup = builder.payload_value("reply_markup").unwrap();
        let decoded: Value = serde_json::from_str(markup.as_str().unwrap()).unwrap();
        assert_eq!(decoded["inline_keyboard"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_callback_and_web_app_buttons() {
        let builder = TestBuilder::new()
            .button_with_callback("Approve", "approve:1")
            .button_with_web_app("Open", "https://app.example");

        let markup = builder.payload_value("reply_markup").unwrap();
        let decoded: Value = serde_json::from_str(markup.as_str().unwrap()).unwrap();
        let row = decoded["inline_keyboard"][0].as_array().unwrap();
        assert_eq!(row[0]["callback_data"], "approve:1");
        assert_eq!(row[1]["web_app"]["url"], "https://app.example");
    }

    #[test]
    fn test_reply_keyboard_markup_shape() {
        let builder = TestBuilder::new().keyboard_requesting("Share contact", true, false);

        let markup = builder.payload_value("reply_markup").unwrap();
        let decoded: Value = serde_json::from_str(markup.as_str().unwrap()).unwrap();
        assert_eq!(decoded["one_time_keyboard"], true);
        assert_eq!(decoded["resize_keyboard"], true);
        assert_eq!(decoded["keyboard"][0][0]["request_contact"], true);
    }

    #[test]
    fn test_send_when_condition() {
        let builder = TestBuilder::new();
        assert!(builder.can_send());

        let builder = builder.send_when(false);
        assert!(!builder.can_send());

        let builder = builder.send_when(true);
        assert!(builder.can_send());
    }

    #[test]
    fn test_token_override() {
        let builder = TestBuilder::new();
        assert!(!builder.has_token());

        let builder = builder.token("999:XYZ");
        assert!(builder.has_token());
        assert_eq!(builder.payload().token_override(), Some("999:XYZ"));
        // The override lives outside the wire payload.
        assert!(builder.payload_value("token").is_none());
    }

    #[test]
    fn test_chat_id_missing() {
        let builder = TestBuilder::new();
        assert!(builder.chat_id_missing());
        let builder = builder.to(1);
        assert!(!builder.chat_id_missing());
    }

    #[test]
    fn test_value_to_string_keeps_raw_strings() {
        assert_eq!(value_to_string(&json!("plain")), "plain");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(true)), "true");
    }
}
