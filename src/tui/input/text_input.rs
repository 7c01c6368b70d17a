//! Single-line text input field.

/// State for a text input field.
///
/// The cursor counts characters, not bytes, so non-ASCII input edits
/// cleanly.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    /// The current text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
}

impl TextInput {
    /// Creates a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset of the character at `index`.
    fn byte_offset(&self, index: usize) -> usize {
        self.content
            .char_indices()
            .nth(index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the current content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// The content with every character replaced by `*`.
    pub fn masked(&self) -> String {
        "*".repeat(self.char_len())
    }

    /// Returns whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }
}
