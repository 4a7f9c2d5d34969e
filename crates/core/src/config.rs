//! Render configuration shared by every render call.

use crate::MarkupError;
use serde::{Deserialize, Serialize};

/// Default CDN serving custom emoji images.
pub const DEFAULT_CDN_BASE_URL: &str = "https://cdn.nerimity.com/";
/// Default base URL for Twemoji SVG images.
pub const DEFAULT_TWEMOJI_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/jdecked/twemoji@15.1.0/assets/svg/";

/// Deployment-level settings for image URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// Base URL of the CDN hosting custom emoji, ending in `/`.
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,
    /// Base URL for unicode emoji images, ending in `/`.
    #[serde(default = "default_twemoji_base_url")]
    pub twemoji_base_url: String,
}

fn default_cdn_base_url() -> String {
    DEFAULT_CDN_BASE_URL.to_string()
}

fn default_twemoji_base_url() -> String {
    DEFAULT_TWEMOJI_BASE_URL.to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cdn_base_url: default_cdn_base_url(),
            twemoji_base_url: default_twemoji_base_url(),
        }
    }
}

impl RenderConfig {
    /// Loads a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, MarkupError> {
        serde_json::from_str(json).map_err(MarkupError::config)
    }

    /// Builds the image URL of a custom emoji.
    ///
    /// Animated emoji are served as `.gif`, static ones as `.webp`. When
    /// animation is disabled an animated emoji gets a `?type=webp` suffix so
    /// the CDN serves its first frame.
    pub fn custom_emoji_url(&self, id: &str, animated: bool, animate_emoji: bool) -> String {
        let extension = if animated { ".gif" } else { ".webp" };
        let suffix = if animated && !animate_emoji {
            "?type=webp"
        } else {
            ""
        };
        format!("{}emojis/{}{}{}", self.cdn_base_url, id, extension, suffix)
    }
}
