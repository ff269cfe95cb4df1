//! Configuration file support for quotecanvas.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/quotecanvas/config.toml`. Settings include the default surface
//! size, text defaults, the selection outline and accepted image formats.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

// Re-export commonly used types at module level
pub use types::{ImageConfig, SelectionConfig, SurfaceConfig, TextConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::draw::color::is_hex_color;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [surface]
/// width = 1080
/// height = 1080
///
/// [text]
/// font_family = "Serif"
/// font_size = 32.0
/// default_align = "left"
///
/// [selection]
/// color = "#ff0000"
/// line_width = 2.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Fallbacks for text styles
    #[serde(default)]
    pub text: TextConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub images: ImageConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `surface.width`, `surface.height`: at least 1
    /// - `text.font_size`: 1.0 - 512.0
    /// - `text.line_spacing`, `text.auto_width_margin`: 0.0 or more
    /// - `selection.line_width`: 0.5 - 20.0
    pub fn validate_and_clamp(&mut self) {
        if self.surface.width == 0 || self.surface.height == 0 {
            log::warn!(
                "Invalid surface size {}x{}, clamping to at least 1x1",
                self.surface.width,
                self.surface.height
            );
            self.surface.width = self.surface.width.max(1);
            self.surface.height = self.surface.height.max(1);
        }

        if !(1.0..=512.0).contains(&self.text.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to 1.0-512.0 range",
                self.text.font_size
            );
            self.text.font_size = if self.text.font_size.is_nan() {
                1.0
            } else {
                self.text.font_size.clamp(1.0, 512.0)
            };
        }

        for (name, value) in [
            ("line_spacing", &mut self.text.line_spacing),
            ("auto_width_margin", &mut self.text.auto_width_margin),
        ] {
            if value.is_nan() || *value < 0.0 {
                log::warn!("Invalid {} {:.1}, clamping to 0.0", name, value);
                *value = 0.0;
            }
        }

        if !is_hex_color(&self.text.default_color) {
            log::warn!(
                "Invalid text default_color '{}', falling back to '{}'",
                self.text.default_color,
                types::default_text_color()
            );
            self.text.default_color = types::default_text_color();
        }

        if !is_hex_color(&self.selection.color) {
            log::warn!(
                "Invalid selection color '{}', falling back to '{}'",
                self.selection.color,
                types::default_selection_color()
            );
            self.selection.color = types::default_selection_color();
        }

        if !(0.5..=20.0).contains(&self.selection.line_width) {
            log::warn!(
                "Invalid selection line_width {:.1}, clamping to 0.5-20.0 range",
                self.selection.line_width
            );
            self.selection.line_width = if self.selection.line_width.is_nan() {
                0.5
            } else {
                self.selection.line_width.clamp(0.5, 20.0)
            };
        }

        self.images.extensions.retain(|ext| !ext.trim().is_empty());
        if self.images.extensions.is_empty() {
            log::warn!("No image extensions configured, falling back to defaults");
            self.images.extensions = types::default_image_extensions();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/quotecanvas/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("quotecanvas");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the config file at `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses TOML text and clamps the result.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(input)?;
        config.validate_and_clamp();
        Ok(config)
    }
}
