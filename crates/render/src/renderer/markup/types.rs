//! Type definitions for the markup renderer.

use chatmark_core::{Channel, QuotedMessage, User};
use serde::Serialize;

/// Text decoration applied by a [`RenderNode::Style`] node.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    /// Bold text.
    Bold,
    /// Italic text.
    Italic,
    /// Underlined text.
    Underline,
    /// Struck-through text.
    Strikethrough,
}

impl TextStyle {
    /// Class name used by presentation layers.
    pub fn as_str(self) -> &'static str {
        match self {
            TextStyle::Bold => "bold",
            TextStyle::Italic => "italic",
            TextStyle::Underline => "underline",
            TextStyle::Strikethrough => "strikethrough",
        }
    }
}

/// A renderable node handed to presentation layers.
///
/// The tree is owned by the caller and holds no reference back to the
/// entity tree it was built from.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderNode {
    /// A run of plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// A text span grouping child nodes.
    Group {
        /// Child nodes in document order.
        children: Vec<RenderNode>,
    },
    /// Child nodes rendered without any wrapper.
    Fragment {
        /// Child nodes in document order.
        children: Vec<RenderNode>,
    },
    /// A link chip.
    Link {
        /// Link target.
        url: String,
        /// Display text.
        text: String,
    },
    /// Inline code wrapping child nodes.
    InlineCode {
        /// Child nodes in document order.
        children: Vec<RenderNode>,
    },
    /// Inline code holding raw text (a code block rendered inline).
    CodeLeaf {
        /// Raw code.
        code: String,
    },
    /// A code block for the code block renderer.
    CodeBlock {
        /// Raw code.
        code: String,
        /// Language identifier, passed through unvalidated.
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    /// Content hidden until the reader reveals it.
    Spoiler {
        /// Child nodes in document order.
        children: Vec<RenderNode>,
    },
    /// A quoted block of text.
    Blockquote {
        /// Child nodes in document order.
        children: Vec<RenderNode>,
    },
    /// Child nodes drawn in a color.
    Color {
        /// CSS color value, passed through uninterpreted.
        color: String,
        /// Child nodes in document order.
        children: Vec<RenderNode>,
    },
    /// Child nodes with a text decoration.
    Style {
        /// The decoration.
        style: TextStyle,
        /// Child nodes in document order.
        children: Vec<RenderNode>,
    },
    /// An emoji chip (unicode or custom).
    Emoji {
        /// Display name.
        name: String,
        /// Image URL.
        url: String,
        /// Whether the image is animated.
        animated: bool,
    },
    /// A channel mention chip.
    ChannelMention {
        /// The resolved channel.
        channel: Channel,
    },
    /// A user mention chip.
    UserMention {
        /// The resolved user.
        user: User,
    },
    /// An `@everyone` / `@someone` chip.
    GenericMention {
        /// `everyone` or `someone`.
        name: String,
    },
    /// A quoted message chip.
    Quote {
        /// ID of the message doing the quoting.
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        /// The quoted message.
        quote: QuotedMessage,
    },
    /// Placeholder for a quote nested inside another quote.
    QuoteHidden,
    /// Indicator for a quote whose target cannot be found.
    QuoteInvalid,
    /// Raw source text shown in place of an unresolvable entity.
    Fallback {
        /// The raw source text.
        text: String,
    },
}

impl RenderNode {
    pub(crate) fn text(text: &str) -> Self {
        RenderNode::Text {
            text: text.to_string(),
        }
    }

    pub(crate) fn fallback(text: &str) -> Self {
        RenderNode::Fallback {
            text: text.to_string(),
        }
    }

    /// Child nodes of a container node; empty for leaves.
    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Group { children }
            | RenderNode::Fragment { children }
            | RenderNode::InlineCode { children }
            | RenderNode::Spoiler { children }
            | RenderNode::Blockquote { children }
            | RenderNode::Color { children, .. }
            | RenderNode::Style { children, .. } => children.as_slice(),
            _ => &[],
        }
    }

    /// Flattens the tree into a plain-text preview.
    ///
    /// Text, fallback, and code content appear verbatim; chips appear in
    /// their textual form (`#channel`, `@user`, `:emoji:`).
    pub fn plain_text(&self) -> String {
        let mut buffer = String::new();
        self.write_plain_text(&mut buffer);
        buffer
    }

    fn write_plain_text(&self, buffer: &mut String) {
        match self {
            RenderNode::Text { text } | RenderNode::Fallback { text } => buffer.push_str(text),
            RenderNode::Link { text, .. } => buffer.push_str(text),
            RenderNode::CodeLeaf { code } | RenderNode::CodeBlock { code, .. } => {
                buffer.push_str(code)
            }
            RenderNode::Emoji { name, .. } => {
                buffer.push(':');
                buffer.push_str(name);
                buffer.push(':');
            }
            RenderNode::ChannelMention { channel } => {
                buffer.push('#');
                buffer.push_str(&channel.name);
            }
            RenderNode::UserMention { user } => {
                buffer.push('@');
                buffer.push_str(&user.username);
            }
            RenderNode::GenericMention { name } => {
                buffer.push('@');
                buffer.push_str(name);
            }
            RenderNode::Quote { .. } | RenderNode::QuoteHidden | RenderNode::QuoteInvalid => {}
            _ => {
                for child in self.children() {
                    child.write_plain_text(buffer);
                }
            }
        }
    }
}

/// Result of rendering one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    /// Root of the render tree.
    pub root: RenderNode,
    /// Visible non-whitespace text length attributed during the walk.
    pub text_count: usize,
    /// Emoji chips produced during the walk.
    pub emoji_count: usize,
    /// Whether the message should be displayed with enlarged emoji.
    pub large_emoji: bool,
}
