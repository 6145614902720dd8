//! Error types for the Telegram channel adapter.

use thiserror::Error;

/// Telegram channel error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Telegram bot token was not provided")]
    TokenNotProvided,

    #[error("chat id was not provided")]
    ChatIdNotProvided,

    #[error("Telegram responded with an error ({error_code}): {description}")]
    Api { error_code: i64, description: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Error code reported by the Telegram API, when this is an API error.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::Api { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }
}

/// Result type alias for channel operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = Error::Api {
            error_code: 400,
            description: "Bad Request: chat not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Telegram responded with an error (400): Bad Request: chat not found"
        );
        assert_eq!(err.error_code(), Some(400));
    }

    #[test]
    fn test_token_error_has_no_code() {
        assert_eq!(Error::TokenNotProvided.error_code(), None);
    }
}
