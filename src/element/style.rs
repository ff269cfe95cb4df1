//! Optional styling carried by every element.
//!
//! Field names serialize in camelCase (`fontSize`, `textAlign`, ...) so the
//! JSON view lines up with the `style` schema.

use serde::{Deserialize, Serialize};

use crate::draw::{Align, Color, OutlinePaint, ShadowPaint};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

/// Overwrites `slot` only when it already holds a value.
fn overwrite<T: Clone>(slot: &mut Option<T>, update: &Option<T>) {
    if let (Some(current), Some(new)) = (slot.as_mut(), update) {
        *current = new.clone();
    }
}

impl Style {
    /// Copies every field of `update` that this style already has.
    ///
    /// Fields the stored style never had stay absent, and nested shadow and
    /// outline records merge key by key the same way.
    pub fn merge(&mut self, update: &Style) {
        overwrite(&mut self.font, &update.font);
        overwrite(&mut self.color, &update.color);
        overwrite(&mut self.font_size, &update.font_size);
        overwrite(&mut self.font_type, &update.font_type);
        overwrite(&mut self.line_height, &update.line_height);
        overwrite(&mut self.text_align, &update.text_align);

        if let (Some(shadow), Some(new)) = (self.shadow.as_mut(), &update.shadow) {
            shadow.merge(new);
        }
        if let (Some(outline), Some(new)) = (self.outline.as_mut(), &update.outline) {
            outline.merge(new);
        }
    }

    /// Shadow paint, or `None` when the shadow would be invisible (no color).
    pub fn shadow_paint(&self) -> Option<ShadowPaint> {
        let shadow = self.shadow.as_ref()?;
        let color = shadow.color.as_deref().and_then(Color::from_hex)?;
        Some(ShadowPaint {
            offset_x: shadow.x.unwrap_or(0.0),
            offset_y: shadow.y.unwrap_or(0.0),
            color,
            blur: shadow.blur.unwrap_or(0.0),
        })
    }

    /// Outline paint; black and one pixel wide unless the style says otherwise.
    pub fn outline_paint(&self) -> Option<OutlinePaint> {
        let outline = self.outline.as_ref()?;
        Some(OutlinePaint {
            color: outline
                .color
                .as_deref()
                .and_then(Color::from_hex)
                .unwrap_or(crate::draw::color::BLACK),
            thickness: outline.thickness.unwrap_or(1.0),
        })
    }
}

impl Shadow {
    fn merge(&mut self, update: &Shadow) {
        overwrite(&mut self.x, &update.x);
        overwrite(&mut self.y, &update.y);
        overwrite(&mut self.color, &update.color);
        overwrite(&mut self.blur, &update.blur);
    }
}

impl Outline {
    fn merge(&mut self, update: &Outline) {
        overwrite(&mut self.color, &update.color);
        overwrite(&mut self.thickness, &update.thickness);
    }
}
