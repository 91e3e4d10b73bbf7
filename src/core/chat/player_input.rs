//! Recovering the player's literal input from a user message.
//!
//! Producers wrap the text the player typed in `<input_message>` markers,
//! usually behind a localized label such as `Player Input:`. Records that
//! carry [`Message::player_input`] skip the parsing entirely.
//!
//! The returned text is trusted rich text. Nothing here sanitizes it; that is
//! the job of whoever produced the message.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::message::Message;

/// First `<input_message>...</input_message>` pair, shortest match, across lines.
static INPUT_MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<input_message>(.*?)</input_message>")
        .expect("Failed to compile input marker regex")
});

/// Leading label, optionally preceded by whitespace and wrapping tags.
/// Accepts both the ASCII and the fullwidth colon.
static INPUT_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:<[^>]+>\s*)*(?:玩家输入指令|Player Input)[:：]\s*")
        .expect("Failed to compile input label regex")
});

/// Extract the player's input from marker-wrapped content.
///
/// Returns an empty string when no marker pair is present.
pub fn extract_player_input(content: &str) -> String {
    let Some(inner) = INPUT_MARKER_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
    else {
        return String::new();
    };

    INPUT_LABEL_PATTERN
        .replace(inner.as_str(), "")
        .into_owned()
}

/// Text to show for a user row: the structured field when present,
/// otherwise whatever can be parsed out of `content`.
pub fn player_text(message: &Message) -> Cow<'_, str> {
    match message.player_input.as_deref() {
        Some(input) => Cow::Borrowed(input),
        None => Cow::Owned(extract_player_input(&message.content)),
    }
}
