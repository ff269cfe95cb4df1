//! The drawing surface state and its public operations.
//!
//! [`Canvas`] ties the pieces together: arguments are checked against the
//! schemas, text goes through the layout engine, primitives go to the
//! [`Renderer`], and the result lands in the [`ElementRegistry`]. Pointer input
//! is handled in [`crate::input`] on top of the same struct.
//!
//! Everything runs on the caller's thread. The one asynchronous path is image
//! decoding, whose results are collected by [`Canvas::dispatch_pending_images`]
//! or [`Canvas::wait_for_images`].

mod draw;
mod edit;
mod images;
mod paint;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{Config, SelectionConfig, TextConfig};
use crate::draw::{ImageLoader, Renderer};
use crate::element::{Element, ElementRegistry};
use crate::error::CanvasError;
use crate::input::DragState;
use crate::util::{Point, SurfaceSize};

use images::PendingImage;

/// Completion callback for an image draw; receives the created element or the
/// reason it could not be created.
pub type ImageReady = Box<dyn FnOnce(Result<Element, CanvasError>)>;

/// Requested top-left corner of a new element.
///
/// A `None` coordinate is centered on the surface once the element's size is
/// known. Centering happens once, at creation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Position {
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    pub const fn centered() -> Self {
        Self { x: None, y: None }
    }

    /// Fills missing coordinates so a `width` x `height` box sits in the middle
    /// of `surface`.
    pub fn resolve(self, surface: SurfaceSize, width: f64, height: f64) -> Point {
        let center = surface.centered_origin(width, height);
        Point::new(self.x.unwrap_or(center.x), self.y.unwrap_or(center.y))
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Self::at(point.x, point.y)
    }
}

/// A drawing surface with its elements.
pub struct Canvas<R: Renderer> {
    pub(crate) renderer: R,
    pub(crate) surface: SurfaceSize,
    pub(crate) registry: ElementRegistry,
    pub(crate) drag: DragState,
    pub(crate) loader: Option<ImageLoader>,
    pending: HashMap<u64, PendingImage>,
    next_request: u64,
    pub(crate) text: TextConfig,
    pub(crate) selection: SelectionConfig,
    image_extensions: Vec<String>,
}

impl<R: Renderer> Canvas<R> {
    /// Creates an empty canvas of the given size.
    ///
    /// Image draws fail with [`CanvasError::LoaderUnavailable`] until a loader
    /// is attached with [`Canvas::with_image_loader`].
    pub fn new(renderer: R, surface: SurfaceSize, config: &Config) -> Self {
        Self {
            renderer,
            surface,
            registry: ElementRegistry::new(),
            drag: DragState::Idle,
            loader: None,
            pending: HashMap::new(),
            next_request: 0,
            text: config.text.clone(),
            selection: config.selection.clone(),
            image_extensions: config.images.extensions.clone(),
        }
    }

    /// Canvas with the built-in defaults; convenient for tests.
    pub fn with_defaults(renderer: R, surface: SurfaceSize) -> Self {
        Self::new(renderer, surface, &Config::default())
    }

    pub fn with_image_loader(mut self, loader: ImageLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// All elements in creation order.
    pub fn elements(&self) -> &[Element] {
        self.registry.all()
    }

    pub fn element(&self, id: u64) -> Option<&Element> {
        self.registry.get(id)
    }

    /// The element picked up by the last pointer press, if any.
    pub fn active_element(&self) -> Option<&Element> {
        self.registry.active()
    }

    pub fn active_element_id(&self) -> Option<u64> {
        self.registry.active_id()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
