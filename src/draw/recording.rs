//! Headless renderer that records draw calls instead of rasterizing them.

use serde::Serialize;

use super::color::Color;
use super::font::FontDescriptor;
use super::image::DecodedImage;
use super::render::{Renderer, ShadowPaint, TextMeasure, TextPaint};
use crate::util::Rect;

/// One primitive call, as issued by the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: [f64; 4],
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: [f64; 4],
        line_width: f64,
    },
    Image {
        path: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        shadow: bool,
    },
    SetFont {
        font: String,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        fill: [f64; 4],
        shadow: bool,
        outline: bool,
    },
}

/// Records every call; measures text as `chars * char_width` so layouts are
/// reproducible without any font installed.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub char_width: f64,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl RecordingRenderer {
    pub fn new(char_width: f64) -> Self {
        Self {
            char_width,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued since the most recent full clear.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }
}

fn rgba(color: Color) -> [f64; 4] {
    [color.r, color.g, color.b, color.a]
}

impl TextMeasure for RecordingRenderer {
    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: rgba(color),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: rgba(color),
            line_width,
        });
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect, shadow: Option<&ShadowPaint>) {
        self.commands.push(DrawCommand::Image {
            path: image.path.display().to_string(),
            x: dest.x,
            y: dest.y,
            width: dest.width,
            height: dest.height,
            shadow: shadow.is_some(),
        });
    }

    fn set_font(&mut self, font: &FontDescriptor) {
        self.commands.push(DrawCommand::SetFont {
            font: font.to_pango_string(),
        });
    }

    fn draw_text_line(&mut self, text: &str, x: f64, baseline_y: f64, paint: &TextPaint) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y: baseline_y,
            fill: rgba(paint.fill),
            shadow: paint.shadow.is_some(),
            outline: paint.outline.is_some(),
        });
    }
}
