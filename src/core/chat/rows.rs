//! Row model for the message list.
//!
//! Turns the owner's message sequence into the rows the panel draws. Kept
//! free of any terminal types so the filtering rules can be tested alone.

use std::borrow::Cow;

use super::message::{Message, MessageRole};
use super::player_input::player_text;

/// One visual row of the message list.
#[derive(Debug, Clone, PartialEq)]
pub enum Row<'a> {
    /// The player's own line, reduced to what they typed.
    Player {
        index: usize,
        message: &'a Message,
        text: Cow<'a, str>,
    },
    /// Character / narrator output, drawn as a rich-text bubble.
    Reply {
        index: usize,
        message: &'a Message,
        loading: bool,
    },
    /// "<name> is typing..." footer while a send is in flight.
    Typing,
}

impl Row<'_> {
    pub fn message(&self) -> Option<&Message> {
        match self {
            Row::Player { message, .. } | Row::Reply { message, .. } => Some(message),
            Row::Typing => None,
        }
    }
}

/// What the message area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<'a> {
    /// No messages at all: show the start-a-conversation placeholder.
    Empty,
    Rows(Vec<Row<'a>>),
}

/// Whether the reply at `index` should show the pending placeholder.
///
/// True only for the very last message of the sequence, only while a send
/// is in flight, and only while its content is still blank.
pub fn is_loading(messages: &[Message], index: usize, is_sending: bool) -> bool {
    is_sending
        && index + 1 == messages.len()
        && messages.get(index).is_some_and(Message::is_blank)
}

/// Build the rows for `messages`. Sample messages are skipped, never removed.
pub fn build_rows(messages: &[Message], is_sending: bool) -> ListView<'_> {
    if messages.is_empty() {
        return ListView::Empty;
    }

    let mut rows: Vec<Row<'_>> = messages
        .iter()
        .enumerate()
        .filter_map(|(index, message)| match message.role {
            MessageRole::Sample => None,
            MessageRole::User => Some(Row::Player {
                index,
                message,
                text: player_text(message),
            }),
            MessageRole::Assistant | MessageRole::Other(_) => Some(Row::Reply {
                index,
                message,
                loading: is_loading(messages, index, is_sending),
            }),
        })
        .collect();

    if is_sending {
        rows.push(Row::Typing);
    }

    ListView::Rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> Message {
        Message::new(id, MessageRole::Sample, "example")
    }

    #[test]
    fn test_empty_sequence_is_placeholder() {
        assert_eq!(build_rows(&[], false), ListView::Empty);
        assert_eq!(build_rows(&[], true), ListView::Empty);
    }

    #[test]
    fn test_samples_are_skipped() {
        let msgs = vec![
            sample("s1"),
            Message::user("u1", "hi"),
            sample("s2"),
            Message::assistant("a1", "hello"),
        ];
        let ListView::Rows(rows) = build_rows(&msgs, false) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows
            .iter()
            .filter_map(Row::message)
            .all(|m| m.role != MessageRole::Sample));
    }

    #[test]
    fn test_only_samples_gives_empty_rows_not_placeholder() {
        let msgs = vec![sample("s1")];
        assert_eq!(build_rows(&msgs, false), ListView::Rows(vec![]));
    }

    #[test]
    fn test_player_row_text_is_extracted() {
        let msgs = vec![Message::new(
            "u1",
            MessageRole::User,
            "<input_message>Player Input: Hello</input_message>",
        )];
        let ListView::Rows(rows) = build_rows(&msgs, false) else {
            panic!("expected rows");
        };
        match &rows[0] {
            Row::Player { text, .. } => assert_eq!(text, "Hello"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_loading_only_for_blank_last_message_while_sending() {
        let msgs = vec![
            Message::assistant("a0", ""),
            Message::user("u1", "go"),
            Message::assistant("a1", "  "),
        ];
        assert!(!is_loading(&msgs, 0, true));
        assert!(is_loading(&msgs, 2, true));
        assert!(!is_loading(&msgs, 2, false));

        let ListView::Rows(rows) = build_rows(&msgs, true) else {
            panic!("expected rows");
        };
        let flags: Vec<bool> = rows
            .iter()
            .filter_map(|r| match r {
                Row::Reply { loading, .. } => Some(*loading),
                _ => None,
            })
            .collect();
        assert_eq!(flags, vec![false, true]);
        assert_eq!(rows.last(), Some(&Row::Typing));
    }

    #[test]
    fn test_trailing_sample_blocks_loading_flag() {
        let msgs = vec![Message::assistant("a1", ""), sample("s1")];
        assert!(!is_loading(&msgs, 0, true));
    }

    #[test]
    fn test_unknown_role_renders_as_reply() {
        let msgs = vec![Message::new(
            "n1",
            MessageRole::Other("narrator".into()),
            "The wind howls.",
        )];
        let ListView::Rows(rows) = build_rows(&msgs, false) else {
            panic!("expected rows");
        };
        assert!(matches!(rows[0], Row::Reply { index: 0, .. }));
    }

    #[test]
    fn test_no_typing_row_when_idle() {
        let msgs = vec![Message::assistant("a1", "done")];
        let ListView::Rows(rows) = build_rows(&msgs, false) else {
            panic!("expected rows");
        };
        assert!(!rows.contains(&Row::Typing));
    }
}
