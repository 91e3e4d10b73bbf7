//! Character chat panel: message list, suggestion chips, draft input and
//! mode toggles.
//!
//! Conversation state is never held here. Every call takes a [`PanelProps`]
//! snapshot from the owner, and every change the user asks for comes back
//! out as a [`PanelAction`]. The panel keeps only view state: focus,
//! selections, scroll position and the pending autoscroll timer.

use std::cell::Cell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use tokio::sync::mpsc;

use crate::core::chat::i18n::{keys, tr, tr_key};
use crate::core::chat::{
    build_rows, notify, Analytics, AnalyticsEvent, Character, ListView, Message, MessageId,
    MessageRole, ModeState, ModeToggle, Perspective, Row, Translator,
};
use crate::tui::autoscroll::ScrollScheduler;
use crate::tui::events::{AppEvent, PanelAction};
use crate::tui::layout::PanelLayout;
use crate::tui::theme;
use crate::tui::widgets::draft_input::DraftInput;
use crate::tui::widgets::rich_text::{bubble_lines, rich_to_lines};
use crate::tui::widgets::wrap::wrap_lines;

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

// ============================================================================
// Props
// ============================================================================

/// Everything the panel reads from its owner for one call.
#[derive(Debug, Clone, Copy)]
pub struct PanelProps<'a> {
    pub character: &'a Character,
    pub messages: &'a [Message],
    pub draft: &'a str,
    pub is_sending: bool,
    pub suggestions: &'a [String],
    pub modes: ModeState,
}

impl PanelProps<'_> {
    /// Chips are hidden while a send is in flight.
    pub fn chips_visible(&self) -> bool {
        !self.is_sending && !self.suggestions.is_empty()
    }

    /// Whether the send control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_sending && !self.draft.trim().is_empty()
    }
}

// ============================================================================
// View state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusZone {
    Input,
    Suggestions,
    Toggles,
    Messages,
}

impl FocusZone {
    fn next(self, chips_visible: bool) -> Self {
        match self {
            Self::Input if chips_visible => Self::Suggestions,
            Self::Input | Self::Suggestions => Self::Toggles,
            Self::Toggles => Self::Messages,
            Self::Messages => Self::Input,
        }
    }

    fn prev(self, chips_visible: bool) -> Self {
        match self {
            Self::Input => Self::Messages,
            Self::Suggestions => Self::Input,
            Self::Toggles if chips_visible => Self::Suggestions,
            Self::Toggles => Self::Input,
            Self::Messages => Self::Toggles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollPosition {
    /// Pinned to the newest line.
    Bottom,
    /// First visible wrapped line.
    At(usize),
}

/// Change detector for the message sequence. Any edit to any message,
/// not only the newest, counts as a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListFingerprint {
    len: usize,
    digest: u64,
}

impl ListFingerprint {
    fn of(messages: &[Message]) -> Self {
        let mut hasher = DefaultHasher::new();
        for message in messages {
            message.id.hash(&mut hasher);
            message.content.hash(&mut hasher);
        }
        Self {
            len: messages.len(),
            digest: hasher.finish(),
        }
    }
}

pub struct ChatPanel {
    translator: Arc<dyn Translator>,
    analytics: Arc<dyn Analytics>,
    input: DraftInput,
    focus: FocusZone,
    chip_index: usize,
    toggle_index: usize,
    selected_reply: Option<MessageId>,
    scroll: ScrollPosition,
    autoscroll: ScrollScheduler,
    fingerprint: Option<ListFingerprint>,
    // Measured during render, read back by scroll commands.
    last_offset: Cell<usize>,
    last_max_scroll: Cell<usize>,
    last_viewport: Cell<usize>,
}

impl ChatPanel {
    pub fn new(
        translator: Arc<dyn Translator>,
        analytics: Arc<dyn Analytics>,
        autoscroll_delay: Duration,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            translator,
            analytics,
            input: DraftInput::new(),
            focus: FocusZone::Input,
            chip_index: 0,
            toggle_index: 0,
            selected_reply: None,
            scroll: ScrollPosition::Bottom,
            autoscroll: ScrollScheduler::new(autoscroll_delay, event_tx),
            fingerprint: None,
            last_offset: Cell::new(0),
            last_max_scroll: Cell::new(0),
            last_viewport: Cell::new(1),
        }
    }

    pub fn focus(&self) -> FocusZone {
        self.focus
    }

    /// Whether the list is pinned to the newest message.
    #[cfg(test)]
    fn is_following(&self) -> bool {
        self.scroll == ScrollPosition::Bottom
    }

    #[cfg(test)]
    fn is_autoscroll_pending(&self) -> bool {
        self.autoscroll.is_pending()
    }

    /// Take in a new snapshot. When the message sequence changed, the view
    /// holds its position and a scroll to the bottom is (re)scheduled.
    ///
    /// Must run inside a tokio runtime.
    pub fn sync(&mut self, props: &PanelProps<'_>) {
        self.reconcile(props);

        let fingerprint = ListFingerprint::of(props.messages);
        if self.fingerprint.as_ref() == Some(&fingerprint) {
            return;
        }
        self.fingerprint = Some(fingerprint);

        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::At(self.last_offset.get());
        }
        self.autoscroll.schedule();
    }

    /// Handle a due autoscroll. Returns `true` if the view moved.
    pub fn on_scroll_due(&mut self, generation: u64) -> bool {
        if !self.autoscroll.fire(generation) {
            return false;
        }
        self.scroll = ScrollPosition::Bottom;
        true
    }

    /// Clamp view state against the snapshot.
    fn reconcile(&mut self, props: &PanelProps<'_>) {
        self.input.set_text(props.draft);

        if !props.chips_visible() && self.focus == FocusZone::Suggestions {
            self.focus = FocusZone::Input;
        }
        self.chip_index = self
            .chip_index
            .min(props.suggestions.len().saturating_sub(1));

        if let Some(id) = &self.selected_reply {
            if !reply_ids(props.messages).any(|reply| reply == id) {
                self.selected_reply = None;
            }
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Translate one terminal event. Returns the change the owner should
    /// apply, if any.
    pub fn handle_input(&mut self, event: &Event, props: &PanelProps<'_>) -> Option<PanelAction> {
        self.reconcile(props);

        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(*code, *modifiers, props),
            Event::Mouse(MouseEvent { kind, .. }) => {
                match kind {
                    MouseEventKind::ScrollUp => self.scroll_up(WHEEL_STEP),
                    MouseEventKind::ScrollDown => self.scroll_down(WHEEL_STEP),
                    _ => {}
                }
                None
            }
            _ => None,
        }
    }

    fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        props: &PanelProps<'_>,
    ) -> Option<PanelAction> {
        // Zone-independent keys first
        match (modifiers, code) {
            (m, KeyCode::Char(c @ '1'..='3')) if m.contains(KeyModifiers::ALT) => {
                let toggle = ModeToggle::from_index(c as usize - '1' as usize);
                return Some(self.press_toggle(toggle, props));
            }
            (_, KeyCode::Tab) => {
                self.set_focus(self.focus.next(props.chips_visible()), props);
                return None;
            }
            (_, KeyCode::BackTab) => {
                self.set_focus(self.focus.prev(props.chips_visible()), props);
                return None;
            }
            (_, KeyCode::PageUp) => {
                self.scroll_up(self.last_viewport.get().max(1));
                return None;
            }
            (_, KeyCode::PageDown) => {
                self.scroll_down(self.last_viewport.get().max(1));
                return None;
            }
            (KeyModifiers::NONE, KeyCode::Esc) if self.focus != FocusZone::Input => {
                self.focus = FocusZone::Input;
                return None;
            }
            _ => {}
        }

        match self.focus {
            FocusZone::Input => self.handle_draft_key(code, modifiers, props),
            FocusZone::Suggestions => self.handle_chip_key(code, props),
            FocusZone::Toggles => self.handle_toggle_key(code, props),
            FocusZone::Messages => self.handle_message_key(code, props),
        }
    }

    fn handle_draft_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        props: &PanelProps<'_>,
    ) -> Option<PanelAction> {
        // Cursor movement stays available while sending; edits do not
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Left) => {
                self.input.move_left();
                return None;
            }
            (KeyModifiers::NONE, KeyCode::Right) => {
                self.input.move_right();
                return None;
            }
            (KeyModifiers::NONE, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                self.input.move_home();
                return None;
            }
            (KeyModifiers::NONE, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
                self.input.move_end();
                return None;
            }
            _ => {}
        }

        if props.is_sending {
            return None;
        }

        let before = self.input.text().to_string();
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Enter) => return self.submit(props),
            (KeyModifiers::NONE, KeyCode::Backspace) => self.input.backspace(),
            (KeyModifiers::NONE, KeyCode::Delete) => self.input.delete(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.input.delete_to_start(),
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => self.input.delete_word(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.input.insert_char(c)
            }
            _ => return None,
        }

        (self.input.text() != before).then(|| PanelAction::SetDraft(self.input.text().to_string()))
    }

    fn submit(&mut self, props: &PanelProps<'_>) -> Option<PanelAction> {
        if !props.can_submit() {
            return None;
        }
        notify(self.analytics.as_ref(), AnalyticsEvent::submit("submit_form"));
        Some(PanelAction::Submit(props.draft.to_string()))
    }

    fn handle_chip_key(&mut self, code: KeyCode, props: &PanelProps<'_>) -> Option<PanelAction> {
        let count = props.suggestions.len();
        match code {
            KeyCode::Left => {
                self.chip_index = self.chip_index.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.chip_index = (self.chip_index + 1).min(count.saturating_sub(1));
                None
            }
            KeyCode::Enter => {
                let text = props.suggestions.get(self.chip_index)?.clone();
                notify(self.analytics.as_ref(), AnalyticsEvent::click("suggested_input"));
                self.focus = FocusZone::Input;
                Some(PanelAction::SelectSuggestion(text))
            }
            _ => None,
        }
    }

    fn handle_toggle_key(&mut self, code: KeyCode, props: &PanelProps<'_>) -> Option<PanelAction> {
        match code {
            KeyCode::Left => {
                self.toggle_index = self.toggle_index.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.toggle_index = (self.toggle_index + 1).min(ModeToggle::ALL.len() - 1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let toggle = ModeToggle::from_index(self.toggle_index);
                Some(self.press_toggle(toggle, props))
            }
            _ => None,
        }
    }

    fn handle_message_key(&mut self, code: KeyCode, props: &PanelProps<'_>) -> Option<PanelAction> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_reply(props, -1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_reply(props, 1);
                None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.scroll_to_top();
                None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.scroll_to_bottom();
                None
            }
            KeyCode::Enter => {
                let id = self.selected_reply.clone()?;
                notify(self.analytics.as_ref(), AnalyticsEvent::click("jump_to_message"));
                Some(PanelAction::TruncateAt(id))
            }
            _ => None,
        }
    }

    fn press_toggle(&self, toggle: ModeToggle, props: &PanelProps<'_>) -> PanelAction {
        notify(self.analytics.as_ref(), AnalyticsEvent::click(toggle.analytics_name()));
        PanelAction::ReplaceModes(props.modes.toggled(toggle))
    }

    fn set_focus(&mut self, focus: FocusZone, props: &PanelProps<'_>) {
        self.focus = focus;
        if focus == FocusZone::Messages && self.selected_reply.is_none() {
            self.selected_reply = reply_ids(props.messages).last().cloned();
        }
    }

    fn select_reply(&mut self, props: &PanelProps<'_>, step: isize) {
        let ids: Vec<&MessageId> = reply_ids(props.messages).collect();
        if ids.is_empty() {
            return;
        }
        let current = self
            .selected_reply
            .as_ref()
            .and_then(|sel| ids.iter().position(|id| *id == sel));
        let next = match current {
            Some(pos) => pos.saturating_add_signed(step).min(ids.len() - 1),
            None => ids.len() - 1,
        };
        self.selected_reply = Some(ids[next].clone());
    }

    // ── Scrolling ────────────────────────────────────────────────────

    fn scroll_up(&mut self, n: usize) {
        self.scroll = ScrollPosition::At(self.last_offset.get().saturating_sub(n));
    }

    fn scroll_down(&mut self, n: usize) {
        let target = self.last_offset.get().saturating_add(n);
        self.scroll = if target >= self.last_max_scroll.get() {
            ScrollPosition::Bottom
        } else {
            ScrollPosition::At(target)
        };
    }

    fn scroll_to_top(&mut self) {
        self.scroll = ScrollPosition::At(0);
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll = ScrollPosition::Bottom;
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, props: &PanelProps<'_>) {
        let layout = PanelLayout::compute(area, props.chips_visible());

        if let Some(header) = layout.header {
            frame.render_widget(Paragraph::new(self.header_line(props.character)), header);
        }
        self.render_messages(frame, layout.messages, props);
        if let Some(chips) = layout.chips {
            self.render_chips(frame, chips, props);
        }
        self.render_input(frame, layout.input, props);
        self.render_toggles(frame, layout.toggles, props);
    }

    fn header_line(&self, character: &Character) -> Line<'static> {
        let mut spans = vec![
            avatar_badge(character),
            Span::raw(" "),
            Span::styled(character.name.clone(), theme::speaker()),
        ];
        if let Some(personality) = character.personality.as_deref().filter(|p| !p.is_empty()) {
            spans.push(Span::styled(format!("  · {personality}"), theme::dim()));
        }
        Line::from(spans)
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, props: &PanelProps<'_>) {
        let focused = self.focus == FocusZone::Messages;
        let block = theme::panel_block(focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible_height = inner.height as usize;
        self.last_viewport.set(visible_height);

        let rows = match build_rows(props.messages, props.is_sending) {
            ListView::Empty => {
                self.last_offset.set(0);
                self.last_max_scroll.set(0);
                let text = tr(
                    self.translator.as_ref(),
                    keys::START_CONVERSATION,
                    "Start a conversation...",
                );
                let mut lines = vec![Line::raw(""); visible_height / 2];
                lines.push(Line::styled(text, theme::muted()).alignment(Alignment::Center));
                frame.render_widget(Paragraph::new(lines), inner);
                return;
            }
            ListView::Rows(rows) => rows,
        };

        let (all_lines, selected_line) = self.list_lines(&rows, props, inner.width as usize);
        let total = all_lines.len();
        let max_scroll = total.saturating_sub(visible_height);
        let mut effective_scroll = match self.scroll {
            ScrollPosition::Bottom => max_scroll,
            ScrollPosition::At(offset) => offset.min(max_scroll),
        };
        // Keep the selected reply's header on screen
        if let (true, Some(line)) = (focused, selected_line) {
            if line < effective_scroll || line >= effective_scroll + visible_height {
                effective_scroll = line.min(max_scroll);
            }
        }
        self.last_offset.set(effective_scroll);
        self.last_max_scroll.set(max_scroll);

        let visible: Vec<Line> = all_lines
            .into_iter()
            .skip(effective_scroll)
            .take(visible_height)
            .collect();
        frame.render_widget(Paragraph::new(visible), inner);

        // Scrollbar
        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(total)
                .position(effective_scroll)
                .viewport_content_length(visible_height);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut scrollbar_state,
            );
        }

        // "New messages below" indicator
        if effective_scroll < max_scroll {
            let label = tr(
                self.translator.as_ref(),
                keys::NEW_MESSAGES_BELOW,
                "new messages below",
            );
            let indicator = Line::styled(
                format!(" ↓ {label} "),
                Style::default()
                    .fg(theme::BG_BASE)
                    .bg(theme::GOLD)
                    .add_modifier(Modifier::BOLD),
            );
            let indicator_width = (indicator.width() as u16).min(inner.width);
            let indicator_area = Rect::new(
                inner.x + inner.width - indicator_width,
                inner.y + inner.height.saturating_sub(1),
                indicator_width,
                1,
            );
            frame.render_widget(Paragraph::new(indicator), indicator_area);
        }
    }

    /// Wrapped lines for every row, plus the line index of the selected
    /// reply's header.
    fn list_lines(
        &self,
        rows: &[Row<'_>],
        props: &PanelProps<'_>,
        width: usize,
    ) -> (Vec<Line<'static>>, Option<usize>) {
        let translator = self.translator.as_ref();
        let pending_label = tr(translator, keys::GENERATING, "Writing...");
        let jump_label = tr(translator, keys::JUMP_TO_MESSAGE, "Jump to this message");
        let bubble_width = width.saturating_sub(2);

        let mut lines = Vec::new();
        let mut selected_line = None;

        for row in rows {
            match row {
                Row::Player { text, .. } => {
                    let player: Vec<Line<'static>> = rich_to_lines(text)
                        .into_iter()
                        .map(|l| l.alignment(Alignment::Right))
                        .collect();
                    lines.extend(wrap_lines(&player, width));
                    lines.push(Line::raw(""));
                }
                Row::Reply {
                    message, loading, ..
                } => {
                    let selected = self.selected_reply.as_ref() == Some(&message.id);
                    if selected {
                        selected_line = Some(lines.len());
                    }
                    lines.push(self.reply_header(props.character, &jump_label, selected));

                    let bubble = bubble_lines(&message.content, *loading, &pending_label);
                    for line in wrap_lines(&bubble, bubble_width) {
                        let mut spans = vec![Span::raw("  ")];
                        spans.extend(line.spans);
                        lines.push(Line::from(spans).style(line.style));
                    }
                    lines.push(Line::raw(""));
                }
                Row::Typing => {
                    let typing = tr(translator, keys::IS_TYPING, "is typing...");
                    lines.push(Line::from(vec![
                        Span::styled("● ", theme::spinner()),
                        Span::styled(format!("{} {typing}", props.character.name), theme::muted()),
                    ]));
                }
            }
        }

        (lines, selected_line)
    }

    fn reply_header(&self, character: &Character, jump_label: &str, selected: bool) -> Line<'static> {
        let jump_style = match (selected, self.focus == FocusZone::Messages) {
            (true, true) => Style::default()
                .fg(theme::JUMP)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            (true, false) => Style::default().fg(theme::JUMP),
            _ => theme::dim(),
        };
        Line::from(vec![
            avatar_badge(character),
            Span::raw(" "),
            Span::styled(character.name.clone(), theme::speaker()),
            Span::raw("  "),
            Span::styled(format!("↥ {jump_label}"), jump_style),
        ])
    }

    fn render_chips(&self, frame: &mut Frame, area: Rect, props: &PanelProps<'_>) {
        let focused = self.focus == FocusZone::Suggestions;
        let mut spans = Vec::with_capacity(props.suggestions.len() * 2);
        for (i, suggestion) in props.suggestions.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {suggestion} "),
                theme::chip(focused && i == self.chip_index),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, props: &PanelProps<'_>) {
        let focused = self.focus == FocusZone::Input;

        let send = if props.is_sending {
            Line::styled(" ◐ ", theme::spinner())
        } else {
            let label = tr(self.translator.as_ref(), keys::SEND, "Send");
            let style = if props.can_submit() {
                Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD)
            } else {
                theme::disabled()
            };
            Line::styled(format!(" {label} "), style)
        };
        let block = theme::panel_block(focused).title(send.alignment(Alignment::Right));

        let text = props.draft;
        let display = if text.is_empty() {
            let placeholder = tr(self.translator.as_ref(), keys::TYPE_MESSAGE, "Type a message...");
            Line::styled(placeholder, theme::dim())
        } else if focused && !props.is_sending {
            let cursor = if self.input.text() == text {
                self.input.cursor_position()
            } else {
                text.len()
            };
            let before = &text[..cursor];
            let cursor_char = text[cursor..]
                .chars()
                .next()
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after_cursor = text.get(cursor + cursor_char.len()..).unwrap_or("");
            Line::from(vec![
                Span::styled(before.to_string(), theme::player()),
                Span::styled(
                    cursor_char,
                    Style::default().bg(theme::PARCHMENT).fg(theme::BG_BASE),
                ),
                Span::styled(after_cursor.to_string(), theme::player()),
            ])
        } else {
            let style = if props.is_sending {
                theme::dim()
            } else {
                theme::player()
            };
            Line::styled(text.to_string(), style)
        };

        frame.render_widget(Paragraph::new(display).block(block), area);
    }

    fn render_toggles(&self, frame: &mut Frame, area: Rect, props: &PanelProps<'_>) {
        let focused = self.focus == FocusZone::Toggles;
        let mut spans = Vec::new();
        for toggle in ModeToggle::ALL {
            let active = props.modes.is_active(toggle);
            let (label, accent) = self.toggle_label(toggle, props.modes);
            let marker = if active { '◆' } else { '◇' };
            spans.push(Span::styled(
                format!(" {marker} {label} "),
                theme::toggle(accent, active, focused && toggle.index() == self.toggle_index),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("alt+1/2/3", theme::dim()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn toggle_label(&self, toggle: ModeToggle, modes: ModeState) -> (String, ratatui::style::Color) {
        let t = self.translator.as_ref();
        match toggle {
            ModeToggle::StoryProgress => (tr(t, keys::STORY_PROGRESS, "剧情推进"), theme::STORY),
            ModeToggle::Perspective => match modes.perspective {
                Perspective::Off => (tr(t, keys::PERSPECTIVE, "视角设计"), theme::PERSPECTIVE_NOVEL),
                Perspective::Novel => (
                    tr(t, keys::NOVEL_PERSPECTIVE, "小说视角"),
                    theme::PERSPECTIVE_NOVEL,
                ),
                Perspective::Protagonist => (
                    tr(t, keys::PROTAGONIST_PERSPECTIVE, "主角视角"),
                    theme::PERSPECTIVE_PROTAGONIST,
                ),
            },
            ModeToggle::SceneSetting => (tr_key(t, keys::SCENE_TRANSITION), theme::SCENE),
        }
    }
}

/// Initial badge when the character has an avatar, a placeholder otherwise.
fn avatar_badge(character: &Character) -> Span<'static> {
    if character.avatar_path.is_some() {
        Span::styled(
            format!("[{}]", character.initial()),
            Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[◌]", theme::dim())
    }
}

/// Ids of messages drawn as reply bubbles, in order.
fn reply_ids(messages: &[Message]) -> impl DoubleEndedIterator<Item = &MessageId> {
    messages
        .iter()
        .filter(|m| matches!(m.role, MessageRole::Assistant | MessageRole::Other(_)))
        .map(|m| &m.id)
}
