use crate::core::chat::{MessageId, ModeState};

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// The debounced scroll-to-bottom timer fired.
    ScrollDue { generation: u64 },
    /// A chunk of the narrator's reply arrived.
    ReplyChunk { message_id: MessageId, text: String },
    /// The narrator finished replying.
    ReplyDone { message_id: MessageId },
}

/// Mutation requests the chat panel hands to whoever owns the conversation.
///
/// The panel never applies these itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    /// Send the draft.
    Submit(String),
    /// Replace the draft text.
    SetDraft(String),
    /// A suggestion chip was chosen. Fills the draft, does not send.
    SelectSuggestion(String),
    /// Drop every message after this one.
    TruncateAt(MessageId),
    /// Replace the mode state wholesale.
    ReplaceModes(ModeState),
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: 80,
        }
    }
}
