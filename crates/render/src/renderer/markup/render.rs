//! Entity transform dispatcher.

use super::context::RenderContext;
use super::custom::transform_custom_entity;
use super::types::{RenderNode, TextStyle};
use chatmark_core::{Entity, EntityKind};

/// Transforms the children of `entity` in document order.
pub fn transform_children(entity: &Entity, ctx: &mut RenderContext) -> Vec<RenderNode> {
    entity
        .entities
        .iter()
        .map(|child| transform_entity(child, ctx))
        .collect()
}

/// Renders an emoji_name entity, falling back to its raw source when the
/// shortcode is unknown.
fn render_emoji_name(entity: &Entity, ctx: &mut RenderContext) -> RenderNode {
    let name = ctx.slice_raw(entity.inner_span);
    let emoji = ctx.lookups().emoji;
    match emoji.shortcode_to_unicode(name) {
        Some(unicode) => {
            ctx.add_emoji();
            RenderNode::Emoji {
                name: name.to_string(),
                url: emoji.image_url(&unicode),
                animated: false,
            }
        }
        None => RenderNode::fallback(ctx.slice_text(entity.outer_span)),
    }
}

/// Renders a color entity.
///
/// Colors starting with `#` wrap the children; anything else is ignored.
/// If the children produced no visible text the raw source is shown instead,
/// so an empty color tag stays visible.
fn render_color(entity: &Entity, ctx: &mut RenderContext) -> RenderNode {
    let last_count = ctx.text_count();
    let children = transform_children(entity, ctx);
    let node = match entity.params.color.as_deref() {
        Some(color) if color.starts_with('#') => RenderNode::Color {
            color: color.to_string(),
            children,
        },
        _ => RenderNode::Fragment { children },
    };

    if ctx.text_count() != last_count {
        node
    } else {
        RenderNode::fallback(ctx.slice_text(entity.outer_span))
    }
}

fn render_style(style: TextStyle, entity: &Entity, ctx: &mut RenderContext) -> RenderNode {
    // TODO: skip the wrapper when the styled span has no adjacent content
    RenderNode::Style {
        style,
        children: transform_children(entity, ctx),
    }
}

/// Recursively renders an entity, updating the context counts.
pub fn transform_entity(entity: &Entity, ctx: &mut RenderContext) -> RenderNode {
    match entity.kind {
        EntityKind::Text => {
            if entity.entities.is_empty() {
                RenderNode::text(ctx.slice_text(entity.inner_span))
            } else {
                RenderNode::Group {
                    children: transform_children(entity, ctx),
                }
            }
        }
        EntityKind::Link => {
            let url = ctx.slice_text(entity.inner_span);
            RenderNode::Link {
                url: url.to_string(),
                text: url.to_string(),
            }
        }
        EntityKind::Code => RenderNode::InlineCode {
            children: transform_children(entity, ctx),
        },
        EntityKind::Spoiler => RenderNode::Spoiler {
            children: transform_children(entity, ctx),
        },
        EntityKind::Codeblock => {
            let code = ctx.slice_text(entity.inner_span).to_string();
            if ctx.options().inline {
                RenderNode::CodeLeaf { code }
            } else {
                RenderNode::CodeBlock {
                    code,
                    lang: entity.params.lang.clone(),
                }
            }
        }
        EntityKind::Blockquote => RenderNode::Blockquote {
            children: transform_children(entity, ctx),
        },
        EntityKind::Color => render_color(entity, ctx),
        EntityKind::Bold => render_style(TextStyle::Bold, entity, ctx),
        EntityKind::Italic => render_style(TextStyle::Italic, entity, ctx),
        EntityKind::Underline => render_style(TextStyle::Underline, entity, ctx),
        EntityKind::Strikethrough => render_style(TextStyle::Strikethrough, entity, ctx),
        EntityKind::EmojiName => render_emoji_name(entity, ctx),
        EntityKind::Emoji => {
            let emoji = ctx.slice_raw(entity.inner_span);
            ctx.add_emoji();
            let codec = ctx.lookups().emoji;
            RenderNode::Emoji {
                name: codec
                    .unicode_to_shortcode(emoji)
                    .unwrap_or_else(|| emoji.to_string()),
                url: codec.image_url(emoji),
                animated: false,
            }
        }
        EntityKind::Custom => transform_custom_entity(entity, ctx),
    }
}
