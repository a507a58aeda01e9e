use crate::event::{Key, Modifiers};

/// Outcome of feeding a key into an [`InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    /// The text content changed.
    Changed,
    /// The cursor moved without a content change.
    Moved,
    /// The key is not an editing key.
    Ignored,
}

/// State for a single-line text input: content plus cursor position.
///
/// The cursor is a char index into the text; rendering and byte offsets are
/// derived from it. No selection support; the widget layer here only needs
/// plain line editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    text: String,
    cursor: usize,
}

impl InputState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the content, placing the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Feed a key press into the input.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> InputEdit {
        if modifiers.ctrl || modifiers.alt {
            return InputEdit::Ignored;
        }

        match key {
            Key::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                InputEdit::Changed
            }
            Key::Backspace => {
                if self.cursor == 0 {
                    InputEdit::Ignored
                } else {
                    let at = self.byte_offset(self.cursor - 1);
                    self.text.remove(at);
                    self.cursor -= 1;
                    InputEdit::Changed
                }
            }
            Key::Delete => {
                if self.cursor >= self.text.chars().count() {
                    InputEdit::Ignored
                } else {
                    let at = self.byte_offset(self.cursor);
                    self.text.remove(at);
                    InputEdit::Changed
                }
            }
            Key::Left => {
                if self.cursor == 0 {
                    InputEdit::Ignored
                } else {
                    self.cursor -= 1;
                    InputEdit::Moved
                }
            }
            Key::Right => {
                if self.cursor >= self.text.chars().count() {
                    InputEdit::Ignored
                } else {
                    self.cursor += 1;
                    InputEdit::Moved
                }
            }
            Key::Home => {
                self.cursor = 0;
                InputEdit::Moved
            }
            Key::End => {
                self.cursor = self.text.chars().count();
                InputEdit::Moved
            }
            _ => InputEdit::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace() {
        let mut input = InputState::default();
        input.handle_key(Key::Char('a'), Modifiers::new());
        input.handle_key(Key::Char('b'), Modifiers::new());
        assert_eq!(input.text(), "ab");
        input.handle_key(Key::Backspace, Modifiers::new());
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn insert_mid_text() {
        let mut input = InputState::new("ac");
        input.handle_key(Key::Left, Modifiers::new());
        input.handle_key(Key::Char('b'), Modifiers::new());
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn multibyte_editing_stays_on_boundaries() {
        let mut input = InputState::new("aé");
        input.handle_key(Key::Left, Modifiers::new());
        assert_eq!(input.handle_key(Key::Delete, Modifiers::new()), InputEdit::Changed);
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn ctrl_chords_are_ignored() {
        let mut input = InputState::new("x");
        assert_eq!(
            input.handle_key(Key::Char('c'), Modifiers::ctrl()),
            InputEdit::Ignored
        );
        assert_eq!(input.text(), "x");
    }
}
