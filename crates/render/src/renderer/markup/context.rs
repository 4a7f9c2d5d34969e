//! Rendering context for the markup renderer.

use super::Options;
use super::types::{RenderNode, RenderOutput};
use chatmark_core::{
    ChannelStore, EmojiCodec, HostingMessage, MemoryStore, RenderConfig, Span, UserStore,
};

/// Most emoji a message may contain and still be shown enlarged.
pub const LARGE_EMOJI_LIMIT: usize = 5;

/// External collaborators consulted while resolving references.
#[derive(Clone, Copy)]
pub struct Lookups<'a> {
    /// Channel lookup for `#` mentions.
    pub channels: &'a dyn ChannelStore,
    /// Global user lookup for `@` mentions.
    pub users: &'a dyn UserStore,
    /// Emoji codec.
    pub emoji: &'a dyn EmojiCodec,
    /// Image URL configuration.
    pub config: &'a RenderConfig,
}

impl<'a> Lookups<'a> {
    /// Bundles separate stores.
    pub fn new(
        channels: &'a dyn ChannelStore,
        users: &'a dyn UserStore,
        emoji: &'a dyn EmojiCodec,
        config: &'a RenderConfig,
    ) -> Self {
        Self {
            channels,
            users,
            emoji,
            config,
        }
    }

    /// Uses one memory store for both channels and users.
    pub fn from_store(
        store: &'a MemoryStore,
        emoji: &'a dyn EmojiCodec,
        config: &'a RenderConfig,
    ) -> Self {
        Self::new(store, store, emoji, config)
    }
}

/// Per-render accumulator threaded through the entity walk.
///
/// One context exists per top-level render and never outlives it, so
/// concurrent renders of different messages share no counters.
pub struct RenderContext<'a> {
    text: &'a str,
    options: &'a Options,
    message: Option<&'a HostingMessage>,
    lookups: &'a Lookups<'a>,
    text_count: usize,
    emoji_count: usize,
}

impl<'a> RenderContext<'a> {
    /// Creates a zeroed context for rendering `text`.
    pub fn new(
        text: &'a str,
        options: &'a Options,
        message: Option<&'a HostingMessage>,
        lookups: &'a Lookups<'a>,
    ) -> Self {
        Self {
            text,
            options,
            message,
            lookups,
            text_count: 0,
            emoji_count: 0,
        }
    }

    /// Returns the source text for `span`, counting it as visible text unless
    /// it is whitespace only.
    ///
    /// Every branch that shows source text to the reader goes through here;
    /// structural text (mention keys, shortcodes) uses [`Self::slice_raw`].
    pub fn slice_text(&mut self, span: Span) -> &'a str {
        let text = span.slice(self.text);
        if !text.chars().all(char::is_whitespace) {
            self.text_count += text.chars().count();
        }
        text
    }

    /// Returns the source text for `span` without counting it.
    pub fn slice_raw(&self, span: Span) -> &'a str {
        span.slice(self.text)
    }

    /// Attributes `len` visible characters produced by a chip.
    pub fn add_text(&mut self, len: usize) {
        self.text_count += len;
    }

    /// Records one emoji chip.
    pub fn add_emoji(&mut self) {
        self.emoji_count += 1;
    }

    /// Visible text attributed so far.
    pub fn text_count(&self) -> usize {
        self.text_count
    }

    /// Emoji chips produced so far.
    pub fn emoji_count(&self) -> usize {
        self.emoji_count
    }

    /// Rendering flags for this call.
    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// The message whose text is rendered, if any.
    pub fn message(&self) -> Option<&'a HostingMessage> {
        self.message
    }

    /// External lookups.
    pub fn lookups(&self) -> &'a Lookups<'a> {
        self.lookups
    }

    /// Consumes the context, computing the large-emoji flag from the final
    /// counts.
    ///
    /// Inline renders (previews) never get enlarged emoji.
    pub fn finish(self, root: RenderNode) -> RenderOutput {
        let large_emoji = !self.options.inline
            && self.emoji_count <= LARGE_EMOJI_LIMIT
            && self.text_count == 0;
        RenderOutput {
            root,
            text_count: self.text_count,
            emoji_count: self.emoji_count,
            large_emoji,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_core::TwemojiCodec;

    fn with_context<R>(text: &str, options: Options, f: impl FnOnce(RenderContext<'_>) -> R) -> R {
        let store = MemoryStore::new();
        let codec = TwemojiCodec::new("https://img.test/");
        let config = RenderConfig::default();
        let lookups = Lookups::from_store(&store, &codec, &config);
        f(RenderContext::new(text, &options, None, &lookups))
    }

    #[test]
    fn slice_text_counts_visible_chars() {
        with_context("héllo  ", Options::default(), |mut ctx| {
            assert_eq!(ctx.slice_text(Span { start: 0, end: 6 }), "héllo");
            assert_eq!(ctx.text_count(), 5);
            assert_eq!(ctx.slice_text(Span { start: 6, end: 8 }), "  ");
            assert_eq!(ctx.text_count(), 5);
        });
    }

    #[test]
    fn slice_raw_does_not_count() {
        with_context("abc", Options::default(), |ctx| {
            assert_eq!(ctx.slice_raw(Span { start: 0, end: 3 }), "abc");
            assert_eq!(ctx.text_count(), 0);
        });
    }

    #[test]
    fn finish_computes_large_emoji() {
        with_context("", Options::default(), |mut ctx| {
            for _ in 0..LARGE_EMOJI_LIMIT {
                ctx.add_emoji();
            }
            let output = ctx.finish(RenderNode::Fragment { children: vec![] });
            assert!(output.large_emoji);
            assert_eq!(output.emoji_count, 5);
        });

        with_context("", Options::default(), |mut ctx| {
            for _ in 0..=LARGE_EMOJI_LIMIT {
                ctx.add_emoji();
            }
            assert!(!ctx.finish(RenderNode::Fragment { children: vec![] }).large_emoji);
        });

        with_context("", Options::default(), |mut ctx| {
            ctx.add_emoji();
            ctx.add_text(1);
            assert!(!ctx.finish(RenderNode::Fragment { children: vec![] }).large_emoji);
        });

        let inline = Options {
            inline: true,
            ..Default::default()
        };
        with_context("", inline, |mut ctx| {
            ctx.add_emoji();
            assert!(!ctx.finish(RenderNode::Fragment { children: vec![] }).large_emoji);
        });
    }
}
