//! Lookup stores for mention and quote resolution.
//!
//! Stores are synchronous, pre-populated caches. Resolution never blocks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A chat channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Channel ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning server; `None` for direct-message channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
}

impl Channel {
    /// Returns true if the channel belongs to a server.
    pub fn is_server_channel(&self) -> bool {
        self.server_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// A chat user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Discriminator tag.
    #[serde(default)]
    pub tag: String,
    /// Profile color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_color: Option<String>,
    /// Avatar image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A message quoted by the hosting message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotedMessage {
    /// Message ID.
    pub id: String,
    /// Raw message text.
    #[serde(default)]
    pub content: String,
    /// Message author.
    pub created_by: User,
    /// Creation time, milliseconds since the epoch.
    #[serde(default)]
    pub created_at: i64,
}

/// The chat message whose text is being rendered.
///
/// Its mention and quote lists take priority over the global stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingMessage {
    /// Message ID.
    pub id: String,
    /// Bumped whenever the message's mentions or quotes change.
    #[serde(default)]
    pub version: u64,
    /// Users mentioned by the message.
    #[serde(default)]
    pub mentions: Vec<User>,
    /// Messages quoted by the message.
    #[serde(default)]
    pub quoted_messages: Vec<QuotedMessage>,
}

impl HostingMessage {
    /// Finds a mentioned user by ID.
    pub fn mentioned_user(&self, id: &str) -> Option<&User> {
        self.mentions.iter().find(|user| user.id == id)
    }

    /// Finds a quoted message by ID.
    pub fn quoted_message(&self, id: &str) -> Option<&QuotedMessage> {
        self.quoted_messages.iter().find(|message| message.id == id)
    }
}

/// Keyed channel lookup.
pub trait ChannelStore: Send + Sync {
    /// Returns the channel with the given ID.
    fn channel(&self, id: &str) -> Option<Channel>;
}

/// Keyed user lookup.
pub trait UserStore: Send + Sync {
    /// Returns the user with the given ID.
    fn user(&self, id: &str) -> Option<User>;
}

/// In-memory store backing both channel and user lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    /// Channels keyed by ID.
    #[serde(default)]
    pub channels: HashMap<String, Channel>,
    /// Users keyed by ID.
    #[serde(default)]
    pub users: HashMap<String, User>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a channel.
    pub fn insert_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id.clone(), channel);
    }

    /// Adds or replaces a user.
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Loads a store snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, crate::MarkupError> {
        serde_json::from_str(json).map_err(crate::MarkupError::config)
    }
}

impl ChannelStore for MemoryStore {
    fn channel(&self, id: &str) -> Option<Channel> {
        self.channels.get(id).cloned()
    }
}

impl UserStore for MemoryStore {
    fn user(&self, id: &str) -> Option<User> {
        self.users.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, username: &str) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            tag: "0001".to_string(),
            hex_color: None,
            avatar: None,
        }
    }

    #[test]
    fn memory_store_lookups() {
        let mut store = MemoryStore::new();
        store.insert_user(user("1", "ada"));
        store.insert_channel(Channel {
            id: "10".to_string(),
            name: "general".to_string(),
            server_id: Some("100".to_string()),
        });

        assert_eq!(store.user("1").map(|u| u.username), Some("ada".to_string()));
        assert!(store.user("2").is_none());
        assert!(store.channel("10").is_some_and(|c| c.is_server_channel()));
    }

    #[test]
    fn empty_server_id_is_not_a_server_channel() {
        let channel = Channel {
            id: "1".to_string(),
            name: "dm".to_string(),
            server_id: Some(String::new()),
        };
        assert!(!channel.is_server_channel());
    }

    #[test]
    fn store_snapshot_from_json() {
        let json = r#"{
            "channels": {"5": {"id": "5", "name": "lobby", "serverId": "9"}},
            "users": {"7": {"id": "7", "username": "grace", "tag": "1234"}}
        }"#;
        let store = MemoryStore::from_json(json).unwrap();
        assert_eq!(store.channel("5").and_then(|c| c.server_id), Some("9".to_string()));
        assert_eq!(store.user("7").map(|u| u.tag), Some("1234".to_string()));
        assert!(MemoryStore::from_json("[").is_err());
    }

    #[test]
    fn hosting_message_lookups() {
        let message = HostingMessage {
            id: "m1".to_string(),
            mentions: vec![user("3", "linus")],
            quoted_messages: vec![QuotedMessage {
                id: "q1".to_string(),
                content: "hi".to_string(),
                created_by: user("3", "linus"),
                created_at: 0,
            }],
            ..Default::default()
        };
        assert!(message.mentioned_user("3").is_some());
        assert!(message.mentioned_user("4").is_none());
        assert_eq!(message.quoted_message("q1").map(|q| q.content.as_str()), Some("hi"));
    }
}
