//! Word-wrap chunking for over-long message text.
//!
//! Telegram rejects text messages above 4096 characters. This module splits
//! long content at the last whitespace before the limit, falling back to a
//! hard character cut when a single run of text has no break point. Splits
//! never land inside a multi-byte character.

/// Telegram hard limit for text messages.
pub(crate) const TELEGRAM_MAX_LEN: usize = 4096;

/// Split `text` into chunks of at most `limit` characters.
///
/// The limit is clamped to the Telegram maximum. Boundary whitespace is
/// dropped, matching word-wrap semantics; interior newlines survive.
pub(crate) fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.clamp(1, TELEGRAM_MAX_LEN);

    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.chars().count() <= limit {
            chunks.push(remaining.to_string());
            break;
        }

        // Byte offset just past the `limit`-th character.
        let window_end = remaining
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        let window = &remaining[..window_end];

        let split_at = match window.rfind(char::is_whitespace) {
            Some(pos) if pos > 0 => pos,
            _ => window_end,
        };

        let chunk = remaining[..split_at].trim_end();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        remaining = remaining[split_at..].trim_start();
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_no_split() {
        assert_eq!(chunk_text("Hello, world!", 100), vec!["Hello, world!"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk_text("", 100).is_empty());
    }

    #[test]
    fn test_exact_limit() {
        let text = "a".repeat(100);
        assert_eq!(chunk_text(&text, 100), vec![text]);
    }

    #[test]
    fn test_splits_at_word_boundary() {
        let chunks = chunk_text("Laravel Telegram notification channel", 18);
        assert_eq!(chunks, vec!["Laravel Telegram", "notification", "channel"]);
    }

    #[test]
    fn test_hard_cut_on_long_word() {
        let text = "x".repeat(250);
        let chunks = chunk_text(&text, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[2].chars().count(), 50);
    }

    #[test]
    fn test_limit_clamped_to_telegram_max() {
        let text = "a".repeat(TELEGRAM_MAX_LEN + 10);
        let chunks = chunk_text(&text, 100_000);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), TELEGRAM_MAX_LEN);
    }

    #[test]
    fn test_content_preserved_across_chunks() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        let chunks = chunk_text(&text, 50);
        let rejoined = chunks.join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50);
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn test_utf8_multibyte_safety() {
        // Chinese characters are 3 bytes each in UTF-8; a byte-based split
        // would panic on a char boundary.
        let text = "电报通知频道适配器测试".repeat(40);
        let chunks = chunk_text(&text, 64);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 64);
            assert!(std::str::from_utf8(chunk.as_bytes()).is_ok());
        }
        let rejoined: String = chunks.concat();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_interior_newlines_survive() {
        let text = format!("{}\nsecond line", "a".repeat(10));
        let chunks = chunk_text(&text, 100);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains('\n'));
    }
}
