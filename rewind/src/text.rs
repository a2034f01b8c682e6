use std::ops::Deref;

use crate::MalformedLog;

/// The text that was typed during the recording.
///
/// Stored as unicode scalar values, so every index in this crate is a character index and
/// never a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceText {
    characters: Vec<char>,
}

impl ReferenceText {
    pub fn new(text: &str) -> Result<Self, MalformedLog> {
        if text.is_empty() {
            return Err(MalformedLog::EmptyText);
        }

        Ok(Self {
            characters: text.chars().collect(),
        })
    }

    /// Returns the amount of characters in the text.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Always false, as empty texts are rejected on construction.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn as_chars(&self) -> &[char] {
        &self.characters
    }

    /// Length of the longest prefix of `input` that matches the text.
    ///
    /// This is the "clean index": how far the typist is correct through the text. The
    /// comparison is exact (case and symbol sensitive) and stops at the first mismatch or at
    /// the end of either sequence, so the result is in `0..=min(input.len(), self.len())`.
    ///
    /// ```rust
    /// use rewind::ReferenceText;
    ///
    /// let text = ReferenceText::new("cat").unwrap();
    /// assert_eq!(text.clean_prefix_len(&['c', 'a']), 2);
    /// assert_eq!(text.clean_prefix_len(&['c', 'x', 't']), 1);
    /// assert_eq!(text.clean_prefix_len(&['c', 'a', 't', 's']), 3);
    /// ```
    pub fn clean_prefix_len(&self, input: &[char]) -> usize {
        input
            .iter()
            .zip(&self.characters)
            .take_while(|(typed, expected)| typed == expected)
            .count()
    }

    /// Splits a typed buffer into its clean prefix and everything after the first mistake.
    pub fn split_input<'a>(&self, input: &'a [char]) -> (&'a [char], &'a [char]) {
        input.split_at(self.clean_prefix_len(input))
    }
}

impl Deref for ReferenceText {
    type Target = [char];

    fn deref(&self) -> &Self::Target {
        &self.characters
    }
}
