#![allow(dead_code)]

use chatmark_core::{
    Channel, Entity, EntityKind, MemoryStore, RenderConfig, Span, TwemojiCodec, User,
};
use chatmark_render::Lookups;
use once_cell::sync::Lazy;

pub static STORE: Lazy<MemoryStore> = Lazy::new(|| {
    let mut store = MemoryStore::new();
    store.insert_channel(Channel {
        id: "10".to_string(),
        name: "general".to_string(),
        server_id: Some("1".to_string()),
    });
    store.insert_channel(Channel {
        id: "11".to_string(),
        name: "dm".to_string(),
        server_id: None,
    });
    store.insert_user(user("20", "ada"));
    store
});

pub static CODEC: Lazy<TwemojiCodec> = Lazy::new(|| {
    TwemojiCodec::new("https://img.test/")
        .with_emoji("smile", "😄")
        .with_emoji("wave", "👋")
});

pub static CONFIG: Lazy<RenderConfig> = Lazy::new(|| RenderConfig {
    cdn_base_url: "https://cdn.test/".to_string(),
    ..Default::default()
});

pub fn lookups() -> Lookups<'static> {
    Lookups::from_store(&STORE, &*CODEC, &CONFIG)
}

pub fn user(id: &str, username: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        tag: "0001".to_string(),
        hex_color: None,
        avatar: None,
    }
}

/// Builds message text and its entity tree side by side so spans always
/// line up with the text.
#[derive(Default)]
pub struct Doc {
    text: String,
    children: Vec<Entity>,
}

impl Doc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(mut self, text: &str) -> Self {
        let span = self.push(text);
        self.children.push(Entity::text(span));
        self
    }

    /// `[type:inner]`
    pub fn custom(mut self, custom_type: &str, inner: &str) -> Self {
        let start = self.text.len();
        self.push(&format!("[{}:", custom_type));
        let inner_span = self.push(inner);
        self.push("]");
        let outer_span = Span {
            start,
            end: self.text.len(),
        };
        self.children
            .push(Entity::custom(custom_type, outer_span, inner_span));
        self
    }

    /// `:name:`
    pub fn emoji_name(mut self, name: &str) -> Self {
        let start = self.text.len();
        self.push(":");
        let inner_span = self.push(name);
        self.push(":");
        let outer_span = Span {
            start,
            end: self.text.len(),
        };
        self.children
            .push(Entity::new(EntityKind::EmojiName, outer_span, inner_span));
        self
    }

    /// `open` + plain `inner` + `close`, as one entity of `kind` wrapping a
    /// text child.
    pub fn wrapped(mut self, kind: EntityKind, open: &str, inner: &str, close: &str) -> Self {
        let start = self.text.len();
        self.push(open);
        let inner_span = self.push(inner);
        self.push(close);
        let outer_span = Span {
            start,
            end: self.text.len(),
        };
        self.children.push(
            Entity::new(kind, outer_span, inner_span).with_children(vec![Entity::text(inner_span)]),
        );
        self
    }

    pub fn build(self) -> (String, Entity) {
        let root = Entity::text(Span {
            start: 0,
            end: self.text.len(),
        })
        .with_children(self.children);
        (self.text, root)
    }

    fn push(&mut self, text: &str) -> Span {
        let start = self.text.len();
        self.text.push_str(text);
        Span {
            start,
            end: self.text.len(),
        }
    }
}
