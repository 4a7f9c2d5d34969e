#![allow(missing_docs)]
pub mod markup;

pub use markup::{
    Lookups, Markup, Options as MarkupOptions, Props, RenderNode, RenderOutput, TextStyle,
    render_entities, render_markup,
};
