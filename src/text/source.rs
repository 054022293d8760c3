//! Char-addressable view over one rich-text run
//!
//! A `RunSource` is built fresh for each run a search visits and thrown away
//! afterwards. It gives pattern matchers O(1) char access and byte/char
//! offset conversion over the run's text.

use crate::models::document::RichText;

/// Transient char-addressable view over a [`RichText`] value
#[derive(Debug)]
pub struct RunSource<'a> {
    text: &'a RichText,
    chars: Vec<char>,
}

impl<'a> RunSource<'a> {
    pub fn new(text: &'a RichText) -> Self {
        Self {
            text,
            chars: text.text.chars().collect(),
        }
    }

    /// Length in chars
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Char at a given offset
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// The underlying text
    pub fn as_str(&self) -> &str {
        &self.text.text
    }

    /// Style name covering a char offset, if any
    pub fn style_at(&self, offset: usize) -> Option<&str> {
        self.text.style_at(offset)
    }

    /// Convert a byte offset into the text to a char offset
    ///
    /// The byte offset must lie on a char boundary.
    pub fn byte_to_char(&self, byte: usize) -> usize {
        self.as_str()[..byte].chars().count()
    }

    /// Convert a char offset to a byte offset into the text
    pub fn char_to_byte(&self, offset: usize) -> usize {
        self.as_str()
            .char_indices()
            .nth(offset)
            .map(|(b, _)| b)
            .unwrap_or_else(|| self.as_str().len())
    }
}
