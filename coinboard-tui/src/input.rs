//! Single-line search input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of feeding a key to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Text changed.
    Changed,
    /// Enter was pressed.
    Submitted,
    /// Cursor moved, text unchanged.
    Handled,
    /// Not an editing key.
    Ignored,
}

/// Text content and cursor for the search box.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    text: String,
    cursor: usize,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before the cursor, for placing the terminal cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => InputResult::Submitted,
            KeyCode::Char('u') if ctrl => {
                if self.text.is_empty() {
                    return InputResult::Handled;
                }
                self.text.clear();
                self.cursor = 0;
                InputResult::Changed
            }
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {
                InputResult::Ignored
            }
            KeyCode::Char(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                InputResult::Changed
            }
            KeyCode::Backspace => match self.prev_boundary() {
                Some(prev) => {
                    self.text.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                    InputResult::Changed
                }
                None => InputResult::Handled,
            },
            KeyCode::Delete => match self.next_boundary() {
                Some(next) => {
                    self.text.replace_range(self.cursor..next, "");
                    InputResult::Changed
                }
                None => InputResult::Handled,
            },
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                InputResult::Handled
            }
            KeyCode::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                InputResult::Handled
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputResult::Handled
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                InputResult::Handled
            }
            _ => InputResult::Ignored,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}
