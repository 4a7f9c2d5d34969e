use crate::MarkupError;
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` byte range into the message source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Creates a span, rejecting inverted ranges.
    pub fn new(start: usize, end: usize) -> Result<Self, MarkupError> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(MarkupError::InvalidSpan { start, end })
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns the text covered by this span.
    ///
    /// Never panics: the end is clamped to the text length, the start to the
    /// end, and both are moved down to the nearest char boundary. A span from
    /// a malformed tree therefore yields a shorter (possibly empty) slice
    /// instead of reading out of bounds.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let end = floor_char_boundary(text, self.end.min(text.len()));
        let start = floor_char_boundary(text, self.start.min(end));
        &text[start..end]
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Maps UTF-16 code unit offsets (as produced by JavaScript parsers) to byte
/// offsets into the same text.
#[derive(Debug, Clone)]
pub struct Utf16Offsets {
    bytes: Vec<usize>,
}

impl Utf16Offsets {
    /// Builds the offset table for `text`.
    pub fn new(text: &str) -> Self {
        let mut bytes = Vec::with_capacity(text.len() + 1);
        for (byte, c) in text.char_indices() {
            // Both halves of a surrogate pair map to the start of the char.
            for _ in 0..c.len_utf16() {
                bytes.push(byte);
            }
        }
        bytes.push(text.len());
        Self { bytes }
    }

    /// Converts a UTF-16 offset to a byte offset, clamping past-the-end values.
    pub fn to_byte(&self, utf16: usize) -> usize {
        let last = self.bytes.len() - 1;
        self.bytes[utf16.min(last)]
    }

    /// Converts both ends of a UTF-16 span.
    pub fn span(&self, span: Span) -> Span {
        Span {
            start: self.to_byte(span.start),
            end: self.to_byte(span.end),
        }
    }
}
