//! Single-line text field.
//!
//! Handles raw character editing for the tag input:
//! - Character insertion at the cursor
//! - Backspace/Delete
//! - Cursor movement (left/right, home/end, Ctrl+A/Ctrl+E)
//! - Ctrl+U to clear, Ctrl+W to delete the previous word
//!
//! The cursor is tracked in characters, not bytes, so multi-byte input edits
//! correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A text field widget.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    /// The current value.
    value: String,
    /// Cursor position, in characters.
    cursor: usize,
}

impl TextField {
    /// Create a new empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    /// Clear the field.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the field is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of a character index.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_count();
                false
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    false
                } else {
                    self.clear();
                    true
                }
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return false;
                }
                let end = self.byte_index(self.cursor);
                let before = &self.value[..end];
                // Skip trailing separators, then the word itself
                let trimmed = before.trim_end_matches(|c: char| !c.is_alphanumeric());
                let start = trimmed
                    .rfind(|c: char| !c.is_alphanumeric())
                    .map(|i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8))
                    .unwrap_or(0);
                self.value.replace_range(start..end, "");
                self.cursor = self.value[..start].chars().count();
                true
            }
            _ => false,
        }
    }

    /// Render the field.
    ///
    /// Shows `placeholder` dimmed while empty, and places the terminal cursor
    /// when `focused`.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        placeholder: &str,
        style: Style,
        focused: bool,
    ) {
        let text = if self.value.is_empty() {
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.value.clone())
        };

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let field = Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(field, area);

        if focused && area.width > 2 && area.height > 2 {
            let width_before: usize = self
                .value
                .chars()
                .take(self.cursor)
                .map(|c| Span::raw(c.to_string()).width())
                .sum();
            let cursor_x = area.x + 1 + width_before as u16;
            if cursor_x < area.x + area.width - 1 {
                frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
            }
        }
    }
}
