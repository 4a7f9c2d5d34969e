//! Resolution of `custom` entities: mentions, quotes, custom emoji, and
//! links with display text.

use super::context::RenderContext;
use super::types::RenderNode;
use chatmark_core::{CustomType, Entity};

/// Renders a custom entity.
///
/// The inner text is raw syntax (an ID or an encoded payload) and is never
/// counted as visible text itself. Resolved chips attribute their own
/// length; unresolved references fall back to the raw outer source, except
/// quotes, which always end in a quote chip.
pub fn transform_custom_entity(entity: &Entity, ctx: &mut RenderContext) -> RenderNode {
    let expr = ctx.slice_raw(entity.inner_span);

    let resolved = match entity.custom_kind() {
        Some(CustomType::Channel) => resolve_channel(expr, ctx),
        Some(CustomType::User) => resolve_user(expr, ctx),
        Some(CustomType::Quote) => return resolve_quote(expr, ctx),
        Some(CustomType::AnimatedEmoji) => resolve_custom_emoji(expr, true, ctx),
        Some(CustomType::Emoji) => resolve_custom_emoji(expr, false, ctx),
        Some(CustomType::Link) => resolve_link(expr, ctx),
        None => {
            log::warn!(
                "Unknown custom entity: {:?}",
                entity.params.custom_type.as_deref().unwrap_or_default()
            );
            None
        }
    };

    resolved.unwrap_or_else(|| RenderNode::fallback(ctx.slice_text(entity.outer_span)))
}

fn resolve_channel(expr: &str, ctx: &mut RenderContext) -> Option<RenderNode> {
    let Some(channel) = ctx
        .lookups()
        .channels
        .channel(expr)
        .filter(|channel| channel.is_server_channel())
    else {
        log::debug!("Channel mention {:?} did not resolve", expr);
        return None;
    };
    ctx.add_text(expr.chars().count());
    Some(RenderNode::ChannelMention { channel })
}

fn resolve_user(expr: &str, ctx: &mut RenderContext) -> Option<RenderNode> {
    let user = ctx
        .message()
        .and_then(|message| message.mentioned_user(expr).cloned())
        .or_else(|| ctx.lookups().users.user(expr));

    if let Some(user) = user {
        ctx.add_text(expr.chars().count());
        return Some(RenderNode::UserMention { user });
    }

    let name = match expr {
        "e" => "everyone",
        "s" => "someone",
        _ => {
            log::debug!("User mention {:?} did not resolve", expr);
            return None;
        }
    };
    ctx.add_text(expr.chars().count());
    Some(RenderNode::GenericMention {
        name: name.to_string(),
    })
}

/// Quotes never fall back to raw syntax, which would expose message IDs.
fn resolve_quote(expr: &str, ctx: &mut RenderContext) -> RenderNode {
    if ctx.options().is_quote {
        return RenderNode::QuoteHidden;
    }
    let message = ctx.message();
    match message.and_then(|message| message.quoted_message(expr)) {
        Some(quote) => RenderNode::Quote {
            message_id: message.map(|message| message.id.clone()),
            quote: quote.clone(),
        },
        None => RenderNode::QuoteInvalid,
    }
}

/// `id:name`. A payload without a name has nothing to display and falls
/// back; empty parts still render, with a broken image URL.
fn resolve_custom_emoji(expr: &str, animated: bool, ctx: &mut RenderContext) -> Option<RenderNode> {
    let mut parts = expr.split(':');
    let (Some(id), Some(name)) = (parts.next(), parts.next()) else {
        log::debug!("Custom emoji {:?} is missing its name", expr);
        return None;
    };
    ctx.add_emoji();
    let url = ctx
        .lookups()
        .config
        .custom_emoji_url(id, animated, ctx.options().animate_emoji);
    Some(RenderNode::Emoji {
        name: name.to_string(),
        url,
        animated,
    })
}

/// `url -> text`, both sides trimmed and required.
fn resolve_link(expr: &str, ctx: &mut RenderContext) -> Option<RenderNode> {
    let mut parts = expr.split("->").map(str::trim);
    match (parts.next(), parts.next()) {
        (Some(url), Some(text)) if !url.is_empty() && !text.is_empty() => {
            ctx.add_text(text.chars().count());
            Some(RenderNode::Link {
                url: url.to_string(),
                text: text.to_string(),
            })
        }
        _ => {
            log::debug!("Link {:?} is missing its url or text", expr);
            None
        }
    }
}
