#![deny(missing_docs)]
//! chatmark core: markup entity model, parser seam, lookup stores, and emoji codec.

/// Render configuration (CDN locations).
pub mod config;
/// Emoji shortcode/unicode codec.
pub mod emoji;
/// Markup entity tree.
pub mod entity;
/// Core error types.
pub mod error;
/// Markup parser seam.
pub mod parse;
/// Source text spans.
pub mod span;
/// Channel, user, and message lookups.
pub mod store;

pub use config::{DEFAULT_CDN_BASE_URL, DEFAULT_TWEMOJI_BASE_URL, RenderConfig};
pub use emoji::{EmojiCodec, EmojiEntry, TwemojiCodec, twemoji_codepoints};
pub use entity::{CustomType, Entity, EntityKind, EntityParams};
pub use error::{MarkupError, SourceLocation};
pub use parse::{MarkupParser, PlainTextParser, parse_markup};
pub use span::{Span, Utf16Offsets};
pub use store::{
    Channel, ChannelStore, HostingMessage, MemoryStore, QuotedMessage, User, UserStore,
};
