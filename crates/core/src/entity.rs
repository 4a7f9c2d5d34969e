//! Markup entity tree produced by a markup parser.
//!
//! The shape mirrors the JSON emitted by chat markup parsers:
//!
//! ```json
//! { "type": "bold", "outerSpan": {"start": 0, "end": 8},
//!   "innerSpan": {"start": 2, "end": 6}, "entities": [], "params": {} }
//! ```

use crate::span::{Span, Utf16Offsets};
use crate::MarkupError;
use serde::{Deserialize, Serialize};

/// The closed set of entity kinds a parser may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Plain text, or a grouping of child entities.
    Text,
    /// A bare URL.
    Link,
    /// Inline code span.
    Code,
    /// Content hidden until revealed.
    Spoiler,
    /// Fenced code block, optionally with a `lang` param.
    Codeblock,
    /// Quoted block of text.
    Blockquote,
    /// Colored span; the color lives in the `color` param.
    Color,
    /// Bold text.
    Bold,
    /// Italic text.
    Italic,
    /// Underlined text.
    Underline,
    /// Struck-through text.
    Strikethrough,
    /// `:shortcode:` emoji reference.
    EmojiName,
    /// Literal unicode emoji.
    Emoji,
    /// Reference whose meaning is selected by the `type` param.
    Custom,
}

/// Kind-specific auxiliary data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityParams {
    /// Language identifier of a code block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Raw color value of a color entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Sub-protocol tag of a custom entity.
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_type: Option<String>,
}

/// One syntactic unit of parsed markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity kind.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Span including syntax markers.
    pub outer_span: Span,
    /// Span of the semantic content only.
    pub inner_span: Span,
    /// Child entities in document order.
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Kind-specific parameters.
    #[serde(default)]
    pub params: EntityParams,
}

impl Entity {
    /// Creates a childless entity with distinct outer and inner spans.
    pub fn new(kind: EntityKind, outer_span: Span, inner_span: Span) -> Self {
        Self {
            kind,
            outer_span,
            inner_span,
            entities: Vec::new(),
            params: EntityParams::default(),
        }
    }

    /// Creates a marker-less entity whose inner and outer spans coincide.
    pub fn leaf(kind: EntityKind, span: Span) -> Self {
        Self::new(kind, span, span)
    }

    /// Creates a childless `text` entity.
    pub fn text(span: Span) -> Self {
        Self::leaf(EntityKind::Text, span)
    }

    /// Creates a `custom` entity with the given sub-protocol tag.
    pub fn custom(custom_type: impl Into<String>, outer_span: Span, inner_span: Span) -> Self {
        let mut entity = Self::new(EntityKind::Custom, outer_span, inner_span);
        entity.params.custom_type = Some(custom_type.into());
        entity
    }

    /// Replaces the children of this entity.
    pub fn with_children(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    /// Sets the `lang` param.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.params.lang = Some(lang.into());
        self
    }

    /// Sets the `color` param.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.params.color = Some(color.into());
        self
    }

    /// Parses an entity tree from its JSON representation.
    ///
    /// Unknown entity kinds are rejected here, so a successfully parsed
    /// tree only ever contains kinds from [`EntityKind`].
    pub fn from_json(json: &str) -> Result<Self, MarkupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses the custom sub-protocol of this entity, if it has a known one.
    pub fn custom_kind(&self) -> Option<CustomType> {
        self.params.custom_type.as_deref().and_then(CustomType::from_tag)
    }

    /// Rewrites every span in the tree from UTF-16 code unit offsets into
    /// byte offsets of `text`.
    pub fn remap_utf16(&mut self, text: &str) {
        let offsets = Utf16Offsets::new(text);
        self.remap_with(&offsets);
    }

    fn remap_with(&mut self, offsets: &Utf16Offsets) {
        self.outer_span = offsets.span(self.outer_span);
        self.inner_span = offsets.span(self.inner_span);
        for child in &mut self.entities {
            child.remap_with(offsets);
        }
    }
}

/// Sub-protocols of the `custom` entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomType {
    /// `#`: channel mention.
    Channel,
    /// `@`: user mention, or `e`/`s` for everyone/someone.
    User,
    /// `q`: quoted message reference.
    Quote,
    /// `ace`: animated custom emoji, `id:name`.
    AnimatedEmoji,
    /// `ce`: static custom emoji, `id:name`.
    Emoji,
    /// `link`: `url -> text` link with display text.
    Link,
}

impl CustomType {
    /// Maps a `type` param to its sub-protocol.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "#" => Some(Self::Channel),
            "@" => Some(Self::User),
            "q" => Some(Self::Quote),
            "ace" => Some(Self::AnimatedEmoji),
            "ce" => Some(Self::Emoji),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    /// The `type` param value for this sub-protocol.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Channel => "#",
            Self::User => "@",
            Self::Quote => "q",
            Self::AnimatedEmoji => "ace",
            Self::Emoji => "ce",
            Self::Link => "link",
        }
    }
}
