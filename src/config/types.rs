//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::draw::Align;

/// Drawing surface used by the CLI when no size is given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface width in pixels (at least 1)
    #[serde(default = "default_surface_width")]
    pub width: u32,

    /// Surface height in pixels (at least 1)
    #[serde(default = "default_surface_height")]
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
        }
    }
}

/// Defaults applied to text elements whose style leaves a field out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Font family name used when a style has no `font` (e.g., "Sans", "Serif")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size in pixels used when a style has no `fontSize` (valid range: 1.0 - 512.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Added to the font size to get the default `lineHeight`
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,

    /// Alignment used when a style has no `textAlign`
    #[serde(default)]
    pub default_align: Align,

    /// Fill color used when a style has no `color` (`#RGB` or `#RRGGBB`)
    #[serde(default = "default_text_color")]
    pub default_color: String,

    /// Space kept free when an automatic text width would exceed the surface
    #[serde(default = "default_auto_width_margin")]
    pub auto_width_margin: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            line_spacing: default_line_spacing(),
            default_align: Align::default(),
            default_color: default_text_color(),
            auto_width_margin: default_auto_width_margin(),
        }
    }
}

/// Outline drawn around the element picked up by a drag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_selection_color")]
    pub color: String,

    /// Stroke width in pixels (valid range: 0.5 - 20.0)
    #[serde(default = "default_selection_line_width")]
    pub line_width: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            color: default_selection_color(),
            line_width: default_selection_line_width(),
        }
    }
}

/// Image loading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Accepted file extensions, compared case-insensitively
    #[serde(default = "default_image_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            extensions: default_image_extensions(),
        }
    }
}

fn default_surface_width() -> u32 {
    800
}

fn default_surface_height() -> u32 {
    600
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_size() -> f64 {
    10.0
}

fn default_line_spacing() -> f64 {
    10.0
}

pub(super) fn default_text_color() -> String {
    "#000000".to_string()
}

fn default_auto_width_margin() -> f64 {
    30.0
}

pub(super) fn default_selection_color() -> String {
    "#ffffff".to_string()
}

fn default_selection_line_width() -> f64 {
    1.0
}

pub(super) fn default_image_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif"].map(String::from).to_vec()
}
