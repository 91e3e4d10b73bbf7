//! Parchment & candlelight color theme for the character chat panel.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Base palette ────────────────────────────────────────────────────────────

/// Candle gold: spinners, focused borders.
pub const GOLD: Color = Color::Rgb(0xF9, 0xC8, 0x6D);
/// Parchment: primary text.
pub const PARCHMENT: Color = Color::Rgb(0xF4, 0xE8, 0xC1);
/// Faded ink: secondary labels.
pub const INK: Color = Color::Rgb(0xC0, 0xA4, 0x80);
/// Worn leather: muted hints, icons.
pub const LEATHER: Color = Color::Rgb(0xA1, 0x8D, 0x6F);
/// Bark: borders.
pub const BARK: Color = Color::Rgb(0x53, 0x47, 0x41);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Hearth: base background.
pub const BG_BASE: Color = Color::Rgb(0x1A, 0x18, 0x16);
/// Table: inputs, chips.
pub const BG_SURFACE: Color = Color::Rgb(0x2A, 0x26, 0x1F);

// ── Mode accents ────────────────────────────────────────────────────────────

/// Story progress: amber.
pub const STORY: Color = Color::Rgb(0xD1, 0xA3, 0x5C);
/// Perspective (novel): sea green.
pub const PERSPECTIVE_NOVEL: Color = Color::Rgb(0x56, 0xB3, 0xB4);
/// Perspective (protagonist): deep sea green.
pub const PERSPECTIVE_PROTAGONIST: Color = Color::Rgb(0x37, 0x83, 0x84);
/// Scene setting: violet.
pub const SCENE: Color = Color::Rgb(0xC0, 0x93, 0xFF);

/// Jump-to-message control when selected.
pub const JUMP: Color = Color::Rgb(0x4A, 0xDE, 0x80);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Player text.
pub fn player() -> Style {
    Style::default().fg(PARCHMENT)
}

/// Character name in reply headers.
pub fn speaker() -> Style {
    Style::default().fg(PARCHMENT).add_modifier(Modifier::BOLD)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(INK)
}

/// Dim text for disabled/faint items.
pub fn dim() -> Style {
    Style::default().fg(LEATHER)
}

/// Disabled control.
pub fn disabled() -> Style {
    Style::default().fg(BARK)
}

/// A mode toggle button, lit or unlit in its accent color.
pub fn toggle(accent: Color, active: bool, focused: bool) -> Style {
    let style = if active {
        Style::default()
            .fg(BG_SURFACE)
            .bg(accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent).bg(BG_SURFACE)
    };
    if focused {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

/// Suggestion chip.
pub fn chip(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(PARCHMENT)
            .bg(BG_SURFACE)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(INK).bg(BG_SURFACE)
    }
}

/// App name badge in the status bar.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(GOLD)
        .add_modifier(Modifier::BOLD)
}

/// Key names in hint text.
pub fn key_hint() -> Style {
    Style::default().fg(GOLD)
}

/// Spinner / typing indicator glyphs.
pub fn spinner() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered panel section; the border brightens while it has focus.
pub fn panel_block(focused: bool) -> Block<'static> {
    let color = if focused { GOLD } else { BARK };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}
