use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use chatmark_core::{Entity, EmojiEntry, HostingMessage, MemoryStore, RenderConfig, TwemojiCodec};
use chatmark_render::{Lookups, MarkupOptions, Props, render_entities};

// ============================================================================
// Renderer Config
// ============================================================================

/// Configuration accepted by the `MarkupRenderer` constructor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmRendererConfig {
    #[serde(default)]
    pub config: RenderConfig,
    #[serde(default)]
    pub store: MemoryStore,
    #[serde(default)]
    pub emojis: Vec<EmojiEntry>,
}

/// Per-call options for `MarkupRenderer::render`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmRenderOptions {
    #[serde(flatten)]
    pub options: MarkupOptions,
    #[serde(default)]
    pub message: Option<HostingMessage>,
    /// Spans from JavaScript parsers are UTF-16 offsets unless stated otherwise.
    #[serde(default = "default_utf16_spans")]
    pub utf16_spans: bool,
}

fn default_utf16_spans() -> bool {
    true
}

impl Default for WasmRenderOptions {
    fn default() -> Self {
        Self {
            options: MarkupOptions::default(),
            message: None,
            utf16_spans: default_utf16_spans(),
        }
    }
}

fn from_js<T: Default + for<'de> Deserialize<'de>>(value: JsValue, what: &str) -> Result<T, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
}

// ============================================================================
// Renderer API
// ============================================================================

/// Renders parsed markup against a store snapshot held on the Rust side.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { MarkupRenderer } from './chatmark_wasm';
/// import { addTextSpans, parseMarkup } from '@nerimity/nevula';
///
/// const renderer = new MarkupRenderer({ store: { users: { "1": { id: "1", username: "ada" } } } });
/// const text = "hi [@:1]";
/// const output = renderer.render(text, addTextSpans(parseMarkup(text)), { inline: false });
/// // output = { root: { type: "group", children: [...] }, textCount: 4, emojiCount: 0, largeEmoji: false }
/// ```
#[wasm_bindgen]
pub struct MarkupRenderer {
    config: RenderConfig,
    store: MemoryStore,
    codec: TwemojiCodec,
}

#[wasm_bindgen]
impl MarkupRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MarkupRenderer, JsError> {
        let cfg: WasmRendererConfig = from_js(config, "renderer config")?;
        let mut codec = TwemojiCodec::from_config(&cfg.config);
        codec.extend(cfg.emojis);
        Ok(MarkupRenderer {
            config: cfg.config,
            store: cfg.store,
            codec,
        })
    }

    /// Replaces the channel/user snapshot.
    #[wasm_bindgen(js_name = setStore)]
    pub fn set_store(&mut self, store: JsValue) -> Result<(), JsError> {
        self.store = from_js(store, "store")?;
        Ok(())
    }

    /// Renders `text` given the entity tree a parser produced for it.
    pub fn render(&self, text: &str, entities: JsValue, opts: JsValue) -> Result<JsValue, JsError> {
        let mut root: Entity = serde_wasm_bindgen::from_value(entities)
            .map_err(|e| JsError::new(&format!("Invalid entity tree: {}", e)))?;
        let opts: WasmRenderOptions = from_js(opts, "render options")?;
        if opts.utf16_spans {
            root.remap_utf16(text);
        }

        let lookups = Lookups::from_store(&self.store, &self.codec, &self.config);
        let mut props = Props::new(text).with_options(opts.options);
        if let Some(message) = &opts.message {
            props = props.with_message(message);
        }
        let output = render_entities(&props, &root, &lookups);

        serde_wasm_bindgen::to_value(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}
