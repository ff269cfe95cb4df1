//! Rendering primitives and text layout.
//!
//! This module defines the drawing side of the canvas:
//! - [`Color`]: RGBA color parsed from `#RGB` / `#RRGGBB`
//! - [`FontDescriptor`]: family, variant and pixel size for text
//! - [`layout`]: greedy word wrap and line alignment
//! - [`Renderer`]: the primitive operations the canvas issues, with a Cairo
//!   implementation and a recording one
//! - [`ImageLoader`]: background image decoding

pub mod cairo_renderer;
pub mod color;
pub mod font;
pub mod image;
pub mod layout;
pub mod recording;
pub mod render;

// Re-export commonly used types at module level
pub use cairo_renderer::CairoRenderer;
pub use color::Color;
pub use font::FontDescriptor;
pub use self::image::{DecodedImage, ImageError, ImageHandle, ImageLoader};
pub use layout::{Align, LayoutLine, TextLayout, layout_text, wrap_words};
pub use recording::{DrawCommand, RecordingRenderer};
pub use render::{OutlinePaint, Renderer, ShadowPaint, TextMeasure, TextPaint};
