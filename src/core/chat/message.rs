//! Conversation records handed to the chat panel by its owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a single message within a conversation.
pub type MessageId = String;

/// Who produced a message.
///
/// Serialized as the lowercase role string. Roles the panel does not know
/// about are preserved in [`MessageRole::Other`] and displayed like
/// assistant output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageRole {
    User,
    Assistant,
    /// Example exchange shipped with a character card; never displayed.
    Sample,
    Other(String),
}

impl MessageRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Sample => "sample",
            Self::Other(role) => role.as_str(),
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "sample" => Self::Sample,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for MessageRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A single entry of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: MessageRole,
    /// For user messages: markup that embeds the player's literal input.
    /// For everything else: pre-rendered rich text, trusted as-is.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// The player's literal input, when the producer supplies it directly.
    /// Takes precedence over parsing it back out of `content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_input: Option<String>,
}

impl Message {
    pub fn new(id: impl Into<MessageId>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp: None,
            player_input: None,
        }
    }

    /// A user message carrying both the wrapped markup and the raw input.
    pub fn user(id: impl Into<MessageId>, player_input: impl Into<String>) -> Self {
        let input = player_input.into();
        let content = format!("<input_message>Player Input: {input}</input_message>");
        Self {
            player_input: Some(input),
            ..Self::new(id, MessageRole::User, content)
        }
    }

    pub fn assistant(id: impl Into<MessageId>, content: impl Into<String>) -> Self {
        Self::new(id, MessageRole::Assistant, content)
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// The character the player is talking to. Read-only for the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub avatar_path: Option<String>,
}

impl Character {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            personality: None,
            avatar_path: None,
        }
    }

    /// Single-character badge shown in place of the avatar image.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .find(|c| !c.is_whitespace())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }
}
