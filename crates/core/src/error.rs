use thiserror::Error;

/// Source location information for parser error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in chars)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Resolve a byte offset in `text` to a line/column pair.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (index, c) in text.char_indices() {
            if index >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur before or around a markup render.
///
/// Reference resolution never produces an error; unresolved mentions,
/// quotes, and links degrade to fallback nodes instead.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// A span whose start lies after its end.
    #[error("Invalid span {start}..{end}: start is after end")]
    InvalidSpan {
        /// Start offset
        start: usize,
        /// End offset
        end: usize,
    },
    /// Entity tree JSON that does not match the entity model, including
    /// entity kinds outside the closed kind set.
    #[error("Invalid entity tree: {0}")]
    InvalidEntityTree(#[from] serde_json::Error),
    /// Failure reported by a markup parser.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Configuration that could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MarkupError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Parse {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Create a parse error located at a byte offset of `text`
    pub fn parse_error_at(message: impl Into<String>, text: &str, offset: usize) -> Self {
        Self::Parse {
            message: message.into(),
            location: SourceLocation::from_offset(text, offset),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl std::fmt::Display) -> Self {
        Self::Config(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_from_offset_counts_lines_and_columns() {
        let text = "ab\ncde\nf";
        assert_eq!(SourceLocation::from_offset(text, 0), SourceLocation::new(1, 1));
        assert_eq!(SourceLocation::from_offset(text, 4), SourceLocation::new(2, 2));
        assert_eq!(SourceLocation::from_offset(text, 7), SourceLocation::new(3, 1));
    }

    #[test]
    fn parse_error_display_includes_location() {
        let err = MarkupError::parse_error("unclosed tag", 2, 5);
        assert_eq!(err.to_string(), "Parse error at 2:5: unclosed tag");
    }
}
