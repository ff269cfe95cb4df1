//! The primitive drawing capability the canvas drives.
//!
//! The canvas never touches a raster API directly: every repaint is expressed
//! as rectangle fills/strokes, image blits and single-line glyph runs issued
//! through [`Renderer`]. [`super::CairoRenderer`] draws them for real,
//! [`super::RecordingRenderer`] keeps them as data.

use super::color::Color;
use super::font::FontDescriptor;
use super::image::DecodedImage;
use crate::util::Rect;

/// Text-width measurement under the currently selected font.
pub trait TextMeasure {
    /// Width in pixels of `text` rendered on a single line.
    fn measure_text(&mut self, text: &str) -> f64;
}

/// Drop shadow applied behind a glyph run or an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowPaint {
    pub offset_x: f64,
    pub offset_y: f64,
    pub color: Color,
    pub blur: f64,
}

/// Stroke drawn around glyphs after the fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlinePaint {
    pub color: Color,
    pub thickness: f64,
}

/// Everything needed to draw one line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPaint {
    pub fill: Color,
    pub shadow: Option<ShadowPaint>,
    /// When present the glyphs are also stroked, without the shadow.
    pub outline: Option<OutlinePaint>,
}

/// Primitive raster operations on a drawing surface.
///
/// Text is positioned by its baseline, like a 2D canvas `fillText`.
pub trait Renderer: TextMeasure {
    /// Erases the whole surface.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64);

    /// Scales `image` into `dest`.
    fn draw_image(&mut self, image: &DecodedImage, dest: Rect, shadow: Option<&ShadowPaint>);

    /// Selects the font used by subsequent `measure_text` and `draw_text_line` calls.
    fn set_font(&mut self, font: &FontDescriptor);

    fn draw_text_line(&mut self, text: &str, x: f64, baseline_y: f64, paint: &TextPaint);
}
