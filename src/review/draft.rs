//! UTF-8 aware editing state for the in-progress comment draft.
//!
//! The byte cursor only ever rests on character boundaries, so CJK and
//! emoji input survive insertion and deletion.

/// Text and cursor of the open new-comment form.
#[derive(Debug, Clone, Default)]
pub struct DraftBuffer {
    text: String,
    cursor: usize,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text, cursor at the end (used when editing a
    /// stored comment).
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
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

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary(self.cursor);
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    /// Delete the word before the cursor: trailing whitespace first,
    /// then the word itself.
    pub fn delete_word(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let mut pos = self.cursor;
        while pos > 0 {
            let prev = self.prev_boundary(pos);
            match self.text[prev..pos].chars().next() {
                Some(ch) if ch.is_whitespace() => pos = prev,
                _ => break,
            }
        }
        while pos > 0 {
            let prev = self.prev_boundary(pos);
            match self.text[prev..pos].chars().next() {
                Some(ch) if !ch.is_whitespace() => pos = prev,
                _ => break,
            }
        }

        self.text.replace_range(pos..self.cursor, "");
        self.cursor = pos;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary(self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary(self.cursor);
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Finish the draft: hand the text over and reset the buffer.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn prev_boundary(&self, from: usize) -> usize {
        if from == 0 {
            return 0;
        }
        let mut pos = from.min(self.text.len()) - 1;
        while pos > 0 && !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_boundary(&self, from: usize) -> usize {
        if from >= self.text.len() {
            return self.text.len();
        }
        let mut pos = from + 1;
        while pos < self.text.len() && !self.text.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}
