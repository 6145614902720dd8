//! Telegram notification channel.
//!
//! Fluent builders for the message kinds the Telegram Bot API supports
//! (text, files, locations, venues, contacts, polls), an HTTP client that
//! speaks the `api.telegram.org` form and multipart endpoints, and a
//! [`TelegramChannel`] that plugs the two into a notification pipeline.
//!
//! ```no_run
//! use notigram::{ParseMode, PayloadBuilder, Telegram, TelegramMessage, TelegramSender};
//!
//! # async fn demo() -> notigram::Result<()> {
//! let client = Telegram::new("123456:bot-token");
//! let message = TelegramMessage::new("Invoice *INV-1234* was paid")
//!     .to(12345)
//!     .parse_mode(ParseMode::Markdown)
//!     .button("View Invoice", "https://example.com/invoices/1234");
//! message.send(&client).await?;
//! # Ok(())
//! # }
//! ```

pub mod channel;
mod chunk;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod file;
pub mod location;
pub mod message;
pub mod payload;
pub mod poll;
pub mod sender;
pub mod updates;
pub mod venue;

pub use notigram_contracts::events::{ChannelEvent, EventDispatcher, NullDispatcher};
pub use notigram_contracts::notifiable::{Notifiable, StaticRoute};

pub use channel::{CHANNEL_NAME, TelegramChannel, TelegramNotification};
pub use client::{API_BASE_URL, Telegram};
pub use config::TelegramConfig;
pub use contact::TelegramContact;
pub use error::{Error, Result};
pub use file::{FileSource, FileType, TelegramFile};
pub use location::TelegramLocation;
pub use message::{TelegramMessage, escape_markdown_v2};
pub use payload::{ChatId, HasPayload, ParseMode, Payload, PayloadBuilder};
pub use poll::TelegramPoll;
pub use sender::TelegramSender;
pub use updates::TelegramUpdates;
pub use venue::TelegramVenue;
