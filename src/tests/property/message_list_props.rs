//! Property-based tests for the message list
//!
//! Tests invariants:
//! - Sample messages never produce a row or any rendered text
//! - Only the last message can be loading, and only while sending
//! - Marker-wrapped player input renders without its label

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use ratatui::{backend::TestBackend, Terminal};
use tokio::sync::mpsc;

use crate::core::chat::analytics::NoopAnalytics;
use crate::core::chat::player_input::extract_player_input;
use crate::core::chat::{build_rows, Catalog, Character, ListView, Message, MessageRole, ModeState, Row};
use crate::tui::views::chat_panel::{ChatPanel, PanelProps};

/// Never produced by the other strategies, which only use lowercase.
const SAMPLE_MARKER: &str = "SAMPLEONLY";

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_role() -> impl Strategy<Value = MessageRole> {
    prop_oneof![
        Just(MessageRole::User),
        Just(MessageRole::Assistant),
        Just(MessageRole::Sample),
        Just(MessageRole::Other("narrator".to_string())),
    ]
}

/// Content that may be blank, so loading rows come up often.
fn arb_content() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-z ]{1,40}"]
}

fn arb_messages() -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec((arb_role(), arb_content()), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (role, content))| match role {
                MessageRole::User => Message::user(format!("m{i}"), content),
                MessageRole::Sample => {
                    Message::new(format!("m{i}"), role, format!("{SAMPLE_MARKER}{i}"))
                }
                other => Message::new(format!("m{i}"), other, content),
            })
            .collect()
    })
}

fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Player Input:".to_string()),
        Just("PLAYER INPUT：".to_string()),
        Just("player input: ".to_string()),
        Just("<b>Player Input: ".to_string()),
        Just("<p><span>玩家输入指令：".to_string()),
        Just("\n  Player Input:\t".to_string()),
    ]
}

fn render_text(messages: &[Message], is_sending: bool) -> String {
    let (tx, _rx) = mpsc::unbounded_channel();
    let panel = ChatPanel::new(
        Arc::new(Catalog::for_locale("en")),
        Arc::new(NoopAnalytics),
        Duration::from_millis(300),
        tx,
    );
    let character = Character::new("elowen", "Elowen");
    let props = PanelProps {
        character: &character,
        messages,
        draft: "",
        is_sending,
        suggestions: &[],
        modes: ModeState::default(),
    };

    let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
    terminal
        .draw(|frame| panel.render(frame, frame.area(), &props))
        .unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn samples_never_become_rows(messages in arb_messages(), is_sending in any::<bool>()) {
        let shown = messages.iter().filter(|m| m.role != MessageRole::Sample).count();
        match build_rows(&messages, is_sending) {
            ListView::Empty => prop_assert!(messages.is_empty()),
            ListView::Rows(rows) => {
                let message_rows: Vec<_> = rows.iter().filter_map(Row::message).collect();
                prop_assert_eq!(message_rows.len(), shown);
                prop_assert!(message_rows.iter().all(|m| m.role != MessageRole::Sample));
                prop_assert_eq!(rows.iter().any(|r| matches!(r, Row::Typing)), is_sending);
            }
        }
    }

    #[test]
    fn samples_never_rendered(messages in arb_messages(), is_sending in any::<bool>()) {
        let text = render_text(&messages, is_sending);
        prop_assert!(!text.contains(SAMPLE_MARKER));
    }

    #[test]
    fn only_last_blank_message_loads(messages in arb_messages(), is_sending in any::<bool>()) {
        let ListView::Rows(rows) = build_rows(&messages, is_sending) else {
            return Ok(());
        };
        for row in rows {
            if let Row::Reply { index, message, loading } = row {
                let expected = is_sending && index + 1 == messages.len() && message.is_blank();
                prop_assert_eq!(loading, expected);
            }
        }
    }

    #[test]
    fn player_label_is_stripped(
        label in arb_label(),
        input in "[A-Za-z0-9][A-Za-z0-9 ,.!?]{0,60}",
    ) {
        let content = format!("<input_message>{label}{input}</input_message>");
        prop_assert_eq!(extract_player_input(&content), input);
    }

    #[test]
    fn missing_markers_render_empty(content in "[^<]{0,80}") {
        prop_assert_eq!(extract_player_input(&content), "");
    }
}
