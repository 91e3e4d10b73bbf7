//! Scripted local narrator.
//!
//! Stands in for a reply backend so the binary is usable on its own. A
//! reply is composed from the player's input and the active modes, then
//! streamed back word by word as [`AppEvent::ReplyChunk`]s followed by a
//! single [`AppEvent::ReplyDone`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::events::AppEvent;
use crate::core::chat::{Character, MessageId, ModeState, Perspective};

pub struct Narrator {
    character: Character,
    chunk_delay: Duration,
}

impl Narrator {
    pub fn new(character: Character, chunk_delay: Duration) -> Self {
        Self {
            character,
            chunk_delay,
        }
    }

    /// Build the full reply markup for one player turn.
    pub fn compose(&self, player_input: &str, modes: ModeState) -> String {
        let name = escape_html(&self.character.name);
        let said = escape_html(player_input.trim());
        let mut reply = String::new();

        if modes.scene_setting {
            reply.push_str(
                "<p><i>Lamplight pools on the scarred oak tables; rain needles the \
                 shutters.</i></p>",
            );
        }

        let beat = match modes.perspective {
            Perspective::Off => format!("{name} leans on the bar. <q>{said}?</q> she repeats."),
            Perspective::Novel => format!(
                "{name} considers the stranger's words, <q>{said}</q>, and lets the \
                 silence stretch before answering."
            ),
            Perspective::Protagonist => format!(
                "You watch {name} turn your words over: <q>{said}</q>. Her eyes narrow."
            ),
        };
        reply.push_str(&format!("<p>{beat}</p>"));
        reply.push_str("<p><b>Hm.</b> Ask me again when the caravan is back.</p>");

        if modes.story_progress {
            reply.push_str(
                "<p>A bell rings from the watchtower. Whatever happens next, it happens \
                 tonight.</p>",
            );
        }
        reply
    }

    /// Stream `reply` into the message `message_id`. Aborting the handle
    /// stops the stream without a `ReplyDone`.
    pub fn spawn(
        &self,
        message_id: MessageId,
        reply: String,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> JoinHandle<()> {
        let delay = self.chunk_delay;
        tokio::spawn(async move {
            for chunk in chunks(&reply) {
                tokio::time::sleep(delay).await;
                let event = AppEvent::ReplyChunk {
                    message_id: message_id.clone(),
                    text: chunk.to_string(),
                };
                if event_tx.send(event).is_err() {
                    log::debug!("Reply receiver dropped; stopping narrator");
                    return;
                }
            }
            let _ = event_tx.send(AppEvent::ReplyDone { message_id });
        })
    }
}

/// Split into word-sized pieces that concatenate back to the input.
fn chunks(text: &str) -> Vec<&str> {
    text.split_inclusive(' ').collect()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
