//! Markup parser seam.
//!
//! Tokenizing markup syntax is the parser's job; the renderer only consumes
//! the entity tree it returns.

use crate::entity::Entity;
use crate::span::Span;
use crate::MarkupError;

/// A markup parser: raw text in, entity tree out.
pub trait MarkupParser: Send + Sync {
    /// Parse `text` into a root entity.
    fn parse(&self, text: &str) -> Result<Entity, MarkupError>;

    /// Annotate a parsed tree with normalized text spans.
    ///
    /// Parsers whose output already carries final spans keep the default.
    fn annotate_spans(&self, root: Entity) -> Entity {
        root
    }
}

impl<F> MarkupParser for F
where
    F: Fn(&str) -> Result<Entity, MarkupError> + Send + Sync,
{
    fn parse(&self, text: &str) -> Result<Entity, MarkupError> {
        (self)(text)
    }
}

/// Parser that recognizes no markup: the whole input becomes one `text`
/// entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl MarkupParser for PlainTextParser {
    fn parse(&self, text: &str) -> Result<Entity, MarkupError> {
        Ok(Entity::text(Span {
            start: 0,
            end: text.len(),
        }))
    }
}

/// Parse `text` and annotate the result, as the renderer does before every
/// recomputation.
pub fn parse_markup<P: MarkupParser + ?Sized>(parser: &P, text: &str) -> Result<Entity, MarkupError> {
    let root = parser.parse(text)?;
    Ok(parser.annotate_spans(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    #[test]
    fn plain_text_parser_covers_whole_input() {
        let root = parse_markup(&PlainTextParser, "hello there").unwrap();
        assert_eq!(root.kind, EntityKind::Text);
        assert_eq!(root.inner_span, Span { start: 0, end: 11 });
        assert!(root.entities.is_empty());
    }

    #[test]
    fn closures_act_as_parsers() {
        let failing = |text: &str| -> Result<Entity, MarkupError> {
            Err(MarkupError::parse_error_at("boom", text, 0))
        };
        let err = parse_markup(&failing, "x").unwrap_err();
        assert_eq!(err.to_string(), "Parse error at 1:1: boom");
    }

    #[test]
    fn annotate_spans_runs_after_parse() {
        struct Shifted;
        impl MarkupParser for Shifted {
            fn parse(&self, text: &str) -> Result<Entity, MarkupError> {
                PlainTextParser.parse(text)
            }
            fn annotate_spans(&self, mut root: Entity) -> Entity {
                root.inner_span.start = 1;
                root
            }
        }
        let root = parse_markup(&Shifted, "abc").unwrap();
        assert_eq!(root.inner_span, Span { start: 1, end: 3 });
    }
}
