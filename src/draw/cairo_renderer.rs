//! Cairo/Pango implementation of [`Renderer`].

use super::color::Color;
use super::font::FontDescriptor;
use super::image::DecodedImage;
use super::render::{Renderer, ShadowPaint, TextMeasure, TextPaint};
use crate::util::Rect;

/// Draws onto any Cairo context (image surface, PDF, a compositor buffer...).
///
/// A single Pango layout is kept for the lifetime of the renderer so the font
/// selected through [`Renderer::set_font`] applies to both measuring and drawing.
pub struct CairoRenderer {
    ctx: cairo::Context,
    layout: pango::Layout,
}

impl CairoRenderer {
    pub fn new(ctx: cairo::Context) -> Self {
        // Best (gray) antialiasing; subpixel fringes on transparent surfaces
        ctx.set_antialias(cairo::Antialias::Best);
        let layout = pangocairo::functions::create_layout(&ctx);
        Self { ctx, layout }
    }

    fn set_source(&self, color: Color) {
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }
}

impl TextMeasure for CairoRenderer {
    fn measure_text(&mut self, text: &str) -> f64 {
        self.layout.set_text(text);
        let (_ink_rect, logical_rect) = self.layout.extents();
        logical_rect.width() as f64 / pango::SCALE as f64
    }
}

impl Renderer for CairoRenderer {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.save().ok();
        self.ctx.set_operator(cairo::Operator::Clear);
        self.ctx.rectangle(0.0, 0.0, width, height);
        let _ = self.ctx.fill();
        self.ctx.restore().ok();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_source(color);
        self.ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        let _ = self.ctx.fill();
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.set_source(color);
        self.ctx.set_line_width(line_width);
        self.ctx.set_line_join(cairo::LineJoin::Miter);
        self.ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        let _ = self.ctx.stroke();
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect, shadow: Option<&ShadowPaint>) {
        if image.width == 0 || image.height == 0 {
            return;
        }

        let surface = match argb32_surface(image) {
            Ok(surface) => surface,
            Err(err) => {
                log::warn!("Skipping image {}: {}", image.path.display(), err);
                return;
            }
        };

        // Blur is not emulated; the shadow is a hard offset silhouette of the box.
        if let Some(shadow) = shadow {
            self.fill_rect(
                Rect::new(
                    dest.x + shadow.offset_x,
                    dest.y + shadow.offset_y,
                    dest.width,
                    dest.height,
                ),
                shadow.color,
            );
        }

        self.ctx.save().ok();
        self.ctx.translate(dest.x, dest.y);
        self.ctx.scale(
            dest.width / image.width as f64,
            dest.height / image.height as f64,
        );
        if self.ctx.set_source_surface(&surface, 0.0, 0.0).is_ok() {
            let _ = self.ctx.paint();
        }
        self.ctx.restore().ok();
    }

    fn set_font(&mut self, font: &FontDescriptor) {
        let font_desc = pango::FontDescription::from_string(&font.to_pango_string());
        self.layout.set_font_description(Some(&font_desc));
    }

    fn draw_text_line(&mut self, text: &str, x: f64, baseline_y: f64, paint: &TextPaint) {
        self.layout.set_text(text);

        // Pango positions from the top-left; callers hand us the baseline
        let baseline = self.layout.baseline() as f64 / pango::SCALE as f64;
        let top = baseline_y - baseline;

        if let Some(shadow) = paint.shadow {
            self.ctx.move_to(x + shadow.offset_x, top + shadow.offset_y);
            self.set_source(shadow.color);
            pangocairo::functions::show_layout(&self.ctx, &self.layout);
        }

        self.ctx.move_to(x, top);
        self.set_source(paint.fill);
        pangocairo::functions::show_layout(&self.ctx, &self.layout);

        if let Some(outline) = paint.outline {
            self.ctx.move_to(x, top);
            pangocairo::functions::layout_path(&self.ctx, &self.layout);
            self.set_source(outline.color);
            self.ctx.set_line_width(outline.thickness);
            self.ctx.set_line_join(cairo::LineJoin::Round);
            let _ = self.ctx.stroke();
        }
    }
}

/// Converts straight RGBA8 into Cairo's premultiplied, native-endian ARGB32.
fn argb32_surface(image: &DecodedImage) -> Result<cairo::ImageSurface, cairo::Error> {
    let stride = cairo::Format::ARgb32.stride_for_width(image.width)?;
    let row_bytes = stride as usize;
    let mut data = vec![0u8; row_bytes * image.height as usize];

    // Extra trailing bytes in the buffer are ignored; missing rows stay transparent
    let rows = image
        .rgba
        .chunks_exact(image.width as usize * 4)
        .take(image.height as usize);
    for (row, pixels) in rows.enumerate() {
        let out = &mut data[row * row_bytes..];
        for (col, px) in pixels.chunks_exact(4).enumerate() {
            let a = px[3] as u32;
            let premultiply = |c: u8| (c as u32 * a + 127) / 255;
            let argb = (a << 24)
                | (premultiply(px[0]) << 16)
                | (premultiply(px[1]) << 8)
                | premultiply(px[2]);
            out[col * 4..col * 4 + 4].copy_from_slice(&argb.to_ne_bytes());
        }
    }

    cairo::ImageSurface::create_for_data(
        data,
        cairo::Format::ARgb32,
        image.width as i32,
        image.height as i32,
        stride,
    )
}
