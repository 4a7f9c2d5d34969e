//! Markup entity tree to render tree transform.
//!
//! An external parser turns message text into an entity tree; this module
//! walks that tree and produces renderable nodes plus the counts used for the
//! large-emoji heuristic.
//!
//! # Module Structure
//!
//! - `types` - Render node and output types
//! - `context` - Per-render accumulator and lookup bundle
//! - `render` - Entity transform dispatcher
//! - `custom` - Custom entity resolver (mentions, quotes, emoji, links)
//! - `cache` - Memoizing renderer

mod cache;
mod context;
mod custom;
pub mod render;
mod types;

pub use cache::Markup;
pub use context::{LARGE_EMOJI_LIMIT, Lookups, RenderContext};
pub use types::{RenderNode, RenderOutput, TextStyle};

use chatmark_core::{Entity, HostingMessage, MarkupError, MarkupParser, parse_markup};
use render::transform_entity;
use serde::{Deserialize, Serialize};

/// Rendering flags for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Inline mode (previews): code blocks degrade to inline code and emoji
    /// are never enlarged.
    #[serde(default)]
    pub inline: bool,
    /// Rendering inside a quote: nested quotes are hidden.
    #[serde(default)]
    pub is_quote: bool,
    /// Whether animated custom emoji may animate.
    #[serde(default = "default_animate_emoji")]
    pub animate_emoji: bool,
}

fn default_animate_emoji() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inline: false,
            is_quote: false,
            animate_emoji: default_animate_emoji(),
        }
    }
}

/// Inputs of one render: the text and the context it is shown in.
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    /// Raw message text.
    pub text: &'a str,
    /// The message the text belongs to, when rendering a chat message.
    pub message: Option<&'a HostingMessage>,
    /// Rendering flags.
    pub options: Options,
}

impl<'a> Props<'a> {
    /// Props for `text` with default options and no hosting message.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            message: None,
            options: Options::default(),
        }
    }

    /// Sets the hosting message.
    pub fn with_message(mut self, message: &'a HostingMessage) -> Self {
        self.message = Some(message);
        self
    }

    /// Sets the rendering flags.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// Renders an already-parsed entity tree.
///
/// `root` must have been parsed from `props.text`; spans are byte offsets
/// into it. Spans outside the text are clamped, never read out of bounds.
pub fn render_entities(props: &Props, root: &Entity, lookups: &Lookups) -> RenderOutput {
    let mut ctx = RenderContext::new(props.text, &props.options, props.message, lookups);
    let node = transform_entity(root, &mut ctx);
    ctx.finish(node)
}

/// Parses and renders message text (entry point).
///
/// # Examples
///
/// ```
/// use chatmark_core::{MemoryStore, PlainTextParser, RenderConfig, TwemojiCodec};
/// use chatmark_render::renderer::markup::{Lookups, Props, render_markup};
///
/// let store = MemoryStore::new();
/// let config = RenderConfig::default();
/// let codec = TwemojiCodec::from_config(&config);
/// let lookups = Lookups::from_store(&store, &codec, &config);
///
/// let output = render_markup(&Props::new("hello"), &PlainTextParser, &lookups).unwrap();
/// assert_eq!(output.root.plain_text(), "hello");
/// assert_eq!(output.text_count, 5);
/// ```
pub fn render_markup<P: MarkupParser + ?Sized>(
    props: &Props,
    parser: &P,
    lookups: &Lookups,
) -> Result<RenderOutput, MarkupError> {
    let root = parse_markup(parser, props.text)?;
    Ok(render_entities(props, &root, lookups))
}
