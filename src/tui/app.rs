use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::events::{AppEvent, Notification, NotificationLevel, PanelAction};
use super::layout::AppLayout;
use super::narrator::Narrator;
use super::theme;
use super::views::chat_panel::{ChatPanel, PanelProps};
use crate::config::AppConfig;
use crate::error::Error;
use crate::core::chat::analytics::TracingAnalytics;
use crate::core::chat::{Catalog, Character, Message, MessageId, ModeState};

/// Most notifications shown at once.
const MAX_NOTIFICATIONS: usize = 3;

/// A reply being streamed into an assistant message.
struct PendingReply {
    message_id: MessageId,
    task: JoinHandle<()>,
}

/// Owner of the conversation (Elm architecture).
///
/// Holds every piece of state the chat panel reads, applies the panel's
/// [`PanelAction`]s, and drives the narrator.
pub struct App {
    /// Whether the app is still running.
    pub running: bool,
    character: Character,
    messages: Vec<Message>,
    draft: String,
    is_sending: bool,
    suggestions: Vec<String>,
    modes: ModeState,
    panel: ChatPanel,
    narrator: Narrator,
    pending: Option<PendingReply>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        config: &AppConfig,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let character = config.character.to_character();
        let panel = ChatPanel::new(
            Arc::new(Catalog::for_locale(&config.panel.locale)),
            Arc::new(TracingAnalytics),
            config.autoscroll_delay(),
            event_tx.clone(),
        );
        let narrator = Narrator::new(character.clone(), config.narrator_chunk_delay());

        Self {
            running: true,
            character,
            messages: Vec::new(),
            draft: String::new(),
            is_sending: false,
            suggestions: config.panel.suggestions.clone(),
            modes: ModeState::default(),
            panel,
            narrator,
            pending: None,
            notifications: Vec::new(),
            notification_counter: 0,
            event_rx,
            event_tx,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: sync → render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        log::info!("Chat with {} opened", self.character.name);

        while self.running {
            self.sync_panel();

            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        self.cancel_reply();
        Ok(())
    }

    /// Hand the current snapshot to the panel.
    fn sync_panel(&mut self) {
        let props = PanelProps {
            character: &self.character,
            messages: &self.messages,
            draft: &self.draft,
            is_sending: self.is_sending,
            suggestions: &self.suggestions,
            modes: self.modes,
        };
        self.panel.sync(&props);
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                if is_quit_key(&crossterm_event) {
                    self.running = false;
                    return;
                }
                let props = PanelProps {
                    character: &self.character,
                    messages: &self.messages,
                    draft: &self.draft,
                    is_sending: self.is_sending,
                    suggestions: &self.suggestions,
                    modes: self.modes,
                };
                if let Some(action) = self.panel.handle_input(&crossterm_event, &props) {
                    self.apply_action(action);
                }
            }
            AppEvent::ScrollDue { generation } => {
                self.panel.on_scroll_due(generation);
            }
            AppEvent::ReplyChunk { message_id, text } => {
                match self.messages.iter_mut().find(|m| m.id == message_id) {
                    Some(message) => message.content.push_str(&text),
                    None => log::debug!("Dropping chunk for vanished message {message_id}"),
                }
            }
            AppEvent::ReplyDone { message_id } => {
                if self
                    .pending
                    .as_ref()
                    .is_some_and(|p| p.message_id == message_id)
                {
                    self.pending = None;
                    self.is_sending = false;
                    log::info!("Reply {message_id} complete");
                }
            }
        }
    }

    /// Apply one change requested by the panel.
    pub fn apply_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::Submit(text) => self.send(&text),
            PanelAction::SetDraft(text) | PanelAction::SelectSuggestion(text) => {
                self.draft = text;
            }
            PanelAction::TruncateAt(id) => self.truncate_at(&id),
            PanelAction::ReplaceModes(modes) => {
                log::debug!("Modes now {modes:?}");
                self.modes = modes;
            }
        }
    }

    fn send(&mut self, text: &str) {
        let input = text.trim();
        if self.is_sending || input.is_empty() {
            return;
        }

        let now = Utc::now();
        let user_id = Uuid::new_v4().to_string();
        let reply_id = Uuid::new_v4().to_string();
        self.messages
            .push(Message::user(user_id, input).with_timestamp(now));
        self.messages
            .push(Message::assistant(reply_id.clone(), "").with_timestamp(now));
        self.draft.clear();
        self.is_sending = true;

        let reply = self.narrator.compose(input, self.modes);
        let task = self
            .narrator
            .spawn(reply_id.clone(), reply, self.event_tx.clone());
        log::info!("Sent player input; streaming reply {reply_id}");
        self.pending = Some(PendingReply {
            message_id: reply_id,
            task,
        });
    }

    /// Keep messages up to and including `id`.
    fn truncate_at(&mut self, id: &str) {
        let Some(pos) = self.messages.iter().position(|m| m.id == id) else {
            log::warn!("Truncate target {id} not found");
            return;
        };
        let dropped = self.messages.len() - pos - 1;
        if dropped == 0 {
            return;
        }

        let streaming_dropped = self
            .pending
            .as_ref()
            .is_some_and(|p| self.messages[pos + 1..].iter().any(|m| m.id == p.message_id));
        if streaming_dropped {
            self.cancel_reply();
        }

        self.messages.truncate(pos + 1);
        log::info!("Rewound conversation by {dropped} message(s)");
        self.push_notification(
            format!("Rewound {dropped} message(s)"),
            NotificationLevel::Info,
        );
    }

    fn cancel_reply(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
            log::debug!("Cancelled reply {}", pending.message_id);
        }
        self.is_sending = false;
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Surface a config file that could not be used; defaults are in effect.
    pub fn report_config_error(&mut self, error: &Error) {
        log::warn!("{error}; using defaults");
        self.push_notification(
            format!("{error}; using defaults"),
            NotificationLevel::Warning,
        );
    }

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        let mut notification = Notification::new(message, level);
        notification.id = self.notification_counter;
        self.notifications.push(notification);

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        let props = PanelProps {
            character: &self.character,
            messages: &self.messages,
            draft: &self.draft,
            is_sending: self.is_sending,
            suggestions: &self.suggestions,
            modes: self.modes,
        };
        self.panel.render(frame, layout.main, &props);
        self.render_status_bar(frame, layout.status);
        self.render_notifications(frame, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let reply_status = if self.is_sending {
            Span::styled("replying", Style::default().fg(theme::GOLD))
        } else {
            Span::styled("ready", theme::muted())
        };

        let status = Line::from(vec![
            Span::styled(" CHAT ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(self.character.name.clone(), theme::speaker()),
            Span::raw(" │ "),
            reply_status,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":focus "),
            Span::styled("Alt+1/2/3", theme::key_hint()),
            Span::raw(":modes "),
            Span::styled("PgUp/PgDn", theme::key_hint()),
            Span::raw(":scroll "),
            Span::styled("Ctrl+C", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height).intersection(area);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INK),
                    NotificationLevel::Warning => ("⚠", theme::GOLD),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }
}

fn is_quit_key(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c') | KeyCode::Char('q'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::{MessageRole, Perspective};

    fn app() -> App {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut config = AppConfig::default();
        config.panel.narrator_chunk_ms = 5;
        App::new(&config, rx, tx)
    }

    /// Feed queued events back into the app until the channel is empty.
    fn pump(app: &mut App) {
        while let Ok(event) = app.event_rx.try_recv() {
            app.handle_event(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_streams_reply() {
        let mut app = app();
        app.apply_action(PanelAction::SetDraft("Hello there".to_string()));
        app.apply_action(PanelAction::Submit("Hello there".to_string()));

        assert!(app.is_sending());
        assert!(app.draft.is_empty());
        assert_eq!(app.messages().len(), 2);
        assert_eq!(app.messages()[0].role, MessageRole::User);
        assert_eq!(app.messages()[0].player_input.as_deref(), Some("Hello there"));
        assert!(app.messages()[1].is_blank());

        // a second submit while sending is ignored
        app.apply_action(PanelAction::Submit("again".to_string()));
        assert_eq!(app.messages().len(), 2);

        tokio::time::sleep(Duration::from_secs(30)).await;
        pump(&mut app);
        assert!(!app.is_sending());
        assert!(app.messages()[1].content.contains("Hello there"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_truncate_cancels_streaming_reply() {
        let mut app = app();
        app.apply_action(PanelAction::Submit("first".to_string()));
        tokio::time::sleep(Duration::from_secs(30)).await;
        pump(&mut app);

        let first_reply = app.messages()[1].id.clone();
        app.apply_action(PanelAction::Submit("second".to_string()));
        assert_eq!(app.messages().len(), 4);

        app.apply_action(PanelAction::TruncateAt(first_reply.clone()));
        assert_eq!(app.messages().len(), 2);
        assert_eq!(app.messages()[1].id, first_reply);
        assert!(!app.is_sending());
        assert_eq!(app.notifications.len(), 1);

        // nothing from the aborted stream lands anywhere
        tokio::time::sleep(Duration::from_secs(30)).await;
        pump(&mut app);
        assert_eq!(app.messages().len(), 2);
    }

    #[test]
    fn test_truncate_at_last_message_is_noop() {
        let mut app = app();
        app.messages = vec![
            Message::assistant("a1", "hi"),
            Message::user("u1", "hello"),
        ];
        app.apply_action(PanelAction::TruncateAt("u1".to_string()));
        app.apply_action(PanelAction::TruncateAt("missing".to_string()));
        assert_eq!(app.messages().len(), 2);
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_replace_modes_and_suggestion() {
        let mut app = app();
        let modes = ModeState::default().toggled(crate::core::chat::ModeToggle::Perspective);
        app.apply_action(PanelAction::ReplaceModes(modes));
        assert_eq!(app.modes.perspective, Perspective::Novel);

        app.apply_action(PanelAction::SelectSuggestion("Order a drink".to_string()));
        assert_eq!(app.draft, "Order a drink");
        assert!(!app.is_sending());
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        app.handle_event(AppEvent::Input(ctrl_c));
        assert!(!app.running);
    }

    #[test]
    fn test_config_error_becomes_warning() {
        let mut app = app();
        let error = Error::config("/tmp/config.toml", "expected `]`");
        app.report_config_error(&error);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].level, NotificationLevel::Warning);
        assert!(app.notifications[0].message.ends_with("using defaults"));
    }

    #[test]
    fn test_notifications_dedup_and_expire() {
        let mut app = app();
        for i in 0..5 {
            app.push_notification(format!("note {i}"), NotificationLevel::Info);
        }
        app.push_notification("note 4".to_string(), NotificationLevel::Info);
        assert_eq!(app.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(app.notifications[0].message, "note 2");

        for _ in 0..100 {
            app.on_tick();
        }
        assert!(app.notifications.is_empty());
    }
}
