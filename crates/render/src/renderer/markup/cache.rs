//! Memoizing renderer.

use super::context::Lookups;
use super::types::RenderOutput;
use super::{Options, Props, render_markup};
use chatmark_core::{MarkupError, MarkupParser};

/// Everything a render output depends on besides the lookup stores.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    text: String,
    options: Options,
    /// Hosting message ID and version.
    message: Option<(String, u64)>,
}

impl CacheKey {
    fn from_props(props: &Props) -> Self {
        Self {
            text: props.text.to_string(),
            options: props.options,
            message: props
                .message
                .map(|message| (message.id.clone(), message.version)),
        }
    }
}

struct Cached {
    key: CacheKey,
    output: RenderOutput,
}

/// Renders message text, recomputing only when its inputs change.
///
/// The cache key is the text, the rendering flags, and the hosting
/// message's ID and version. Changes to the lookup stores are not tracked;
/// call [`Markup::invalidate`] after updating them.
pub struct Markup<P> {
    parser: P,
    cache: Option<Cached>,
}

impl<P: MarkupParser> Markup<P> {
    /// Creates a renderer with an empty cache.
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            cache: None,
        }
    }

    /// Returns the render output for `props`, reusing the previous output
    /// when the inputs are unchanged.
    ///
    /// A parse failure clears the cache.
    pub fn render(&mut self, props: &Props, lookups: &Lookups) -> Result<&RenderOutput, MarkupError> {
        let key = CacheKey::from_props(props);
        let cached = match self.cache.take() {
            Some(cached) if cached.key == key => {
                log::debug!("Reusing cached render ({} bytes)", props.text.len());
                cached
            }
            _ => {
                log::debug!("Rendering markup ({} bytes)", props.text.len());
                let output = render_markup(props, &self.parser, lookups)?;
                Cached { key, output }
            }
        };
        Ok(&self.cache.insert(cached).output)
    }

    /// The most recent output, if any.
    pub fn output(&self) -> Option<&RenderOutput> {
        self.cache.as_ref().map(|cached| &cached.output)
    }

    /// Drops the cached output so the next render recomputes.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_core::{
        Entity, HostingMessage, MemoryStore, PlainTextParser, RenderConfig, TwemojiCodec,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingParser<'a> {
        calls: &'a AtomicUsize,
    }

    impl MarkupParser for CountingParser<'_> {
        fn parse(&self, text: &str) -> Result<Entity, MarkupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            PlainTextParser.parse(text)
        }
    }

    #[test]
    fn test_recomputes_only_on_input_change() {
        let store = MemoryStore::new();
        let config = RenderConfig::default();
        let codec = TwemojiCodec::from_config(&config);
        let lookups = Lookups::from_store(&store, &codec, &config);
        let calls = AtomicUsize::new(0);
        let mut markup = Markup::new(CountingParser { calls: &calls });

        let first = markup.render(&Props::new("hello"), &lookups).unwrap().clone();
        let second = markup.render(&Props::new("hello"), &lookups).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        markup.render(&Props::new("hello!"), &lookups).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(markup.output().map(|o| o.text_count), Some(6));

        let inline = Props::new("hello!").with_options(Options {
            inline: true,
            ..Default::default()
        });
        markup.render(&inline, &lookups).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        markup.invalidate();
        assert!(markup.output().is_none());
        markup.render(&inline, &lookups).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_message_version_is_part_of_key() {
        let store = MemoryStore::new();
        let config = RenderConfig::default();
        let codec = TwemojiCodec::from_config(&config);
        let lookups = Lookups::from_store(&store, &codec, &config);
        let calls = AtomicUsize::new(0);
        let mut markup = Markup::new(CountingParser { calls: &calls });

        let mut message = HostingMessage {
            id: "m1".to_string(),
            ..Default::default()
        };
        markup
            .render(&Props::new("hi").with_message(&message), &lookups)
            .unwrap();
        markup
            .render(&Props::new("hi").with_message(&message), &lookups)
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        message.version += 1;
        markup
            .render(&Props::new("hi").with_message(&message), &lookups)
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_parse_failure_clears_cache() {
        let store = MemoryStore::new();
        let config = RenderConfig::default();
        let codec = TwemojiCodec::from_config(&config);
        let lookups = Lookups::from_store(&store, &codec, &config);
        let parser = |text: &str| -> Result<Entity, MarkupError> {
            if text.contains('\0') {
                Err(MarkupError::parse_error_at("nul byte", text, 0))
            } else {
                PlainTextParser.parse(text)
            }
        };
        let mut markup = Markup::new(parser);
        markup.render(&Props::new("ok"), &lookups).unwrap();
        assert!(markup.render(&Props::new("bad\0"), &lookups).is_err());
        assert!(markup.output().is_none());
    }
}
