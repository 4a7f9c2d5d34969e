//! Emoji shortcode/unicode codec and image URLs.

use crate::config::RenderConfig;
use crate::MarkupError;
use serde::Deserialize;
use std::collections::HashMap;

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Converts between emoji shortcodes and unicode, and locates emoji images.
pub trait EmojiCodec: Send + Sync {
    /// Resolves a shortcode (without colons) to its unicode emoji.
    fn shortcode_to_unicode(&self, shortcode: &str) -> Option<String>;

    /// Resolves a unicode emoji to its canonical shortcode.
    fn unicode_to_shortcode(&self, unicode: &str) -> Option<String>;

    /// Image URL for a unicode emoji.
    fn image_url(&self, unicode: &str) -> String;
}

/// One entry of an emoji table.
#[derive(Debug, Clone, Deserialize)]
pub struct EmojiEntry {
    /// The unicode emoji.
    pub emoji: String,
    /// Shortcodes; the first one is canonical.
    pub short_names: Vec<String>,
}

/// Table-backed codec producing Twemoji image URLs.
#[derive(Debug, Clone)]
pub struct TwemojiCodec {
    base_url: String,
    by_shortcode: HashMap<String, String>,
    by_unicode: HashMap<String, String>,
}

impl TwemojiCodec {
    /// Creates an empty codec serving images from `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            by_shortcode: HashMap::new(),
            by_unicode: HashMap::new(),
        }
    }

    /// Creates an empty codec using the configured Twemoji base URL.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.twemoji_base_url.clone())
    }

    /// Adds an emoji under a shortcode. The first shortcode registered for an
    /// emoji becomes its canonical name.
    pub fn with_emoji(mut self, shortcode: impl Into<String>, unicode: impl Into<String>) -> Self {
        self.insert(shortcode.into(), unicode.into());
        self
    }

    /// Adds every entry of an emoji table.
    pub fn extend<I: IntoIterator<Item = EmojiEntry>>(&mut self, entries: I) {
        for entry in entries {
            for name in entry.short_names {
                self.insert(name, entry.emoji.clone());
            }
        }
    }

    /// Loads entries from a JSON array of `{ "emoji", "short_names" }`.
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), MarkupError> {
        let entries: Vec<EmojiEntry> = serde_json::from_str(json).map_err(MarkupError::config)?;
        self.extend(entries);
        Ok(())
    }

    /// Number of registered shortcodes.
    pub fn len(&self) -> usize {
        self.by_shortcode.len()
    }

    /// Returns true if no emoji are registered.
    pub fn is_empty(&self) -> bool {
        self.by_shortcode.is_empty()
    }

    fn insert(&mut self, shortcode: String, unicode: String) {
        self.by_unicode
            .entry(unicode.clone())
            .or_insert_with(|| shortcode.clone());
        self.by_shortcode.insert(shortcode, unicode);
    }
}

impl EmojiCodec for TwemojiCodec {
    fn shortcode_to_unicode(&self, shortcode: &str) -> Option<String> {
        self.by_shortcode.get(shortcode).cloned()
    }

    fn unicode_to_shortcode(&self, unicode: &str) -> Option<String> {
        self.by_unicode.get(unicode).cloned()
    }

    fn image_url(&self, unicode: &str) -> String {
        format!("{}{}.svg", self.base_url, twemoji_codepoints(unicode))
    }
}

/// Twemoji file stem for an emoji: lowercase hex codepoints joined by `-`.
///
/// U+FE0F is dropped unless the sequence contains a zero-width joiner, which
/// matches how Twemoji names its assets.
pub fn twemoji_codepoints(unicode: &str) -> String {
    let keep_selector = unicode.contains(ZERO_WIDTH_JOINER);
    unicode
        .chars()
        .filter(|&c| keep_selector || c != VARIATION_SELECTOR_16)
        .map(|c| format!("{:x}", c as u32))
        .collect::<Vec<_>>()
        .join("-")
}
