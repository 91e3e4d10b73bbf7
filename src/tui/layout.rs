//! Layout computation for the app frame and the chat panel.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the bordered draft input.
pub const INPUT_HEIGHT: u16 = 3;
/// Below this height the header row is dropped to leave room for messages.
pub const HIDE_HEADER_THRESHOLD: u16 = 10;

/// Computed regions of the whole terminal.
pub struct AppLayout {
    /// The chat panel.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);
        AppLayout {
            main: rows[0],
            status: rows[1],
        }
    }
}

/// Computed regions of the chat panel for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    /// Character name row (None on short terminals).
    pub header: Option<Rect>,
    /// Scrollable message list.
    pub messages: Rect,
    /// Suggested-input chips (None while hidden).
    pub chips: Option<Rect>,
    /// Draft input with the send control.
    pub input: Rect,
    /// Mode toggle buttons.
    pub toggles: Rect,
}

impl PanelLayout {
    /// `show_chips` is false while a send is in flight or there are no
    /// suggestions.
    pub fn compute(area: Rect, show_chips: bool) -> Self {
        let show_header = area.height >= HIDE_HEADER_THRESHOLD;

        let rows = Layout::vertical([
            Constraint::Length(u16::from(show_header)),
            Constraint::Min(1),
            Constraint::Length(u16::from(show_chips)),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

        PanelLayout {
            header: show_header.then_some(rows[0]),
            messages: rows[1],
            chips: show_chips.then_some(rows[2]),
            input: rows[3],
            toggles: rows[4],
        }
    }
}
