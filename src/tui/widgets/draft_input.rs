//! Cursor-aware editing over the chat draft.
//!
//! The draft text itself belongs to the conversation owner. The panel keeps
//! a `DraftInput` mirror so it can track the cursor, and re-syncs it with
//! [`DraftInput::set_text`] whenever the owner's draft changes underneath.

/// Draft text plus a byte cursor that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct DraftInput {
    content: String,
    cursor: usize,
}

impl DraftInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text if it differs from what we hold. The cursor moves to
    /// the end on replacement and is otherwise left alone.
    pub fn set_text(&mut self, text: &str) {
        if self.content != text {
            self.content = text.to_string();
            self.cursor = self.content.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Ctrl+U: drop everything before the cursor.
    pub fn delete_to_start(&mut self) {
        self.content.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Ctrl+W: drop the word before the cursor, plus the whitespace after it.
    pub fn delete_word(&mut self) {
        let before = &self.content[..self.cursor];
        let trimmed = before.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.content.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// Cursor as a byte offset.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Cursor as a char count, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}
