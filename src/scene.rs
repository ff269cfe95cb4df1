//! TOML scene files replayed through the canvas operations.
//!
//! A scene is a list of draw calls, one `[[elements]]` table each, tagged by
//! `kind`:
//!
//! ```toml
//! [[elements]]
//! kind = "background-image"
//! path = "sunset.jpg"
//!
//! [[elements]]
//! kind = "text"
//! text = "Stay hungry, stay foolish."
//! max_width = 600
//!
//! [elements.style]
//! font = "Georgia"
//! fontSize = 48
//! color = "#ffffff"
//! outline = { color = "#000000", thickness = 2 }
//! ```
//!
//! Omitted `x`/`y` center the element. Relative image paths are resolved
//! against the directory of the scene file.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

use crate::canvas::{Canvas, ImageReady, Position};
use crate::draw::Renderer;
use crate::element::{Element, Style};
use crate::error::CanvasError;
use crate::util::Size;

#[derive(Debug, Default, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub elements: Vec<SceneElement>,

    #[serde(skip)]
    base_dir: PathBuf,
}

/// One draw call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SceneElement {
    Background {
        color: String,
    },
    Rect {
        color: String,
        x: Option<f64>,
        y: Option<f64>,
        width: f64,
        height: f64,
        #[serde(default)]
        fixed: bool,
    },
    Text {
        text: String,
        #[serde(default)]
        style: Style,
        x: Option<f64>,
        y: Option<f64>,
        max_width: Option<f64>,
        #[serde(default)]
        fixed: bool,
    },
    Image {
        path: PathBuf,
        #[serde(default)]
        style: Style,
        x: Option<f64>,
        y: Option<f64>,
        width: f64,
        height: f64,
        #[serde(default)]
        fixed: bool,
    },
    BackgroundImage {
        path: PathBuf,
    },
}

impl SceneElement {
    pub fn kind(&self) -> &'static str {
        match self {
            SceneElement::Background { .. } => "background",
            SceneElement::Rect { .. } => "rect",
            SceneElement::Text { .. } => "text",
            SceneElement::Image { .. } => "image",
            SceneElement::BackgroundImage { .. } => "background-image",
        }
    }
}

impl Scene {
    /// Parses a scene; relative image paths stay relative to the working directory.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(input)?;
        Ok(scene)
    }

    /// Reads a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene from {}", path.display()))?;
        let mut scene = Self::from_toml_str(&input)
            .with_context(|| format!("Failed to parse scene from {}", path.display()))?;
        scene.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        info!(
            "Loaded scene {} ({} elements)",
            path.display(),
            scene.elements.len()
        );
        Ok(scene)
    }

    /// Replays every draw call in order.
    ///
    /// Each image is waited for before the next call, so the paint order
    /// matches the order of the file. Stops at the first failing call.
    pub fn apply<R: Renderer>(&self, canvas: &mut Canvas<R>) -> Result<()> {
        for (index, element) in self.elements.iter().enumerate() {
            self.apply_element(canvas, element)
                .with_context(|| format!("Scene element {} ({})", index, element.kind()))?;
        }
        Ok(())
    }

    fn apply_element<R: Renderer>(
        &self,
        canvas: &mut Canvas<R>,
        element: &SceneElement,
    ) -> Result<(), CanvasError> {
        match element {
            SceneElement::Background { color } => canvas.draw_background(color).map(drop),
            SceneElement::Rect {
                color,
                x,
                y,
                width,
                height,
                fixed,
            } => canvas
                .draw_rect(
                    color,
                    Position { x: *x, y: *y },
                    Size::new(*width, *height),
                    *fixed,
                )
                .map(drop),
            SceneElement::Text {
                text,
                style,
                x,
                y,
                max_width,
                fixed,
            } => canvas
                .draw_text(
                    text,
                    style.clone(),
                    Position { x: *x, y: *y },
                    *max_width,
                    *fixed,
                )
                .map(drop),
            SceneElement::Image {
                path,
                style,
                x,
                y,
                width,
                height,
                fixed,
            } => {
                let path = self.resolve(path);
                load_image(canvas, |canvas, on_ready| {
                    canvas.draw_image(
                        &path,
                        style.clone(),
                        Position { x: *x, y: *y },
                        Size::new(*width, *height),
                        Some(on_ready),
                        *fixed,
                    )
                })
            }
            SceneElement::BackgroundImage { path } => {
                let path = self.resolve(path);
                load_image(canvas, |canvas, on_ready| {
                    canvas.draw_background_image(&path, Some(on_ready))
                })
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Issues one image request and blocks until its callback has run.
fn load_image<R, F>(canvas: &mut Canvas<R>, request: F) -> Result<(), CanvasError>
where
    R: Renderer,
    F: FnOnce(&mut Canvas<R>, ImageReady) -> Result<(), CanvasError>,
{
    let outcome = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&outcome);
    request(
        canvas,
        Box::new(move |result: Result<Element, CanvasError>| {
            *slot.borrow_mut() = Some(result.map(drop));
        }),
    )?;
    canvas.wait_for_images();

    let result = outcome.borrow_mut().take();
    result.unwrap_or(Ok(()))
}
