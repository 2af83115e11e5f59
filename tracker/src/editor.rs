//! Single-line text editing shared by card fields, the initiative form and
//! prompt popups.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A text buffer with a character-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
    cursor_position: usize,
}

impl LineEditor {
    /// Start editing `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor_position = buffer.chars().count();
        Self {
            buffer,
            cursor_position,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Take the text out, leaving the editor empty.
    pub fn take(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        // Convert cursor position (character index) to byte index
        let byte_pos = self
            .buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len());
        self.buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.remove_at_cursor();
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        if self.cursor_position < self.buffer.chars().count() {
            self.remove_at_cursor();
        }
    }

    fn remove_at_cursor(&mut self) {
        if let Some((byte_pos, ch)) = self.buffer.char_indices().nth(self.cursor_position) {
            self.buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.buffer.chars().count();
    }

    /// Apply an editing key. Returns false for keys that are not edits.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.take();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.type_char(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor_home(),
            KeyCode::End => self.cursor_end(),
            _ => return false,
        }
        true
    }
}
