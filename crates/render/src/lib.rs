#![deny(missing_docs)]
//! chatmark render engine: markup entity trees to render trees.

/// Parallel rendering of many messages.
pub mod batch;
/// Rendering layer (entity tree to render tree).
pub mod renderer;

pub use batch::{BatchInput, BatchOptions, BatchProcessingResult, BatchResult, render_batch};
pub use renderer::markup::{
    LARGE_EMOJI_LIMIT, Lookups, Markup, Options as MarkupOptions, Props, RenderContext,
    RenderNode, RenderOutput, TextStyle, render_entities, render_markup,
};
