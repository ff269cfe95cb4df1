//! Library exports for quotecanvas.
//!
//! A small retained-mode canvas: filled rectangles, images and wrapped text
//! blocks are validated, painted through a [`draw::Renderer`] and kept in an
//! element registry so they can be updated, erased, repainted and dragged
//! around with a pointer.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod element;
pub mod error;
pub mod input;
pub mod scene;
pub mod schema;
pub mod util;

pub use canvas::{Canvas, ImageReady, Position};
pub use config::Config;
pub use element::{Element, ElementKind, ElementRegistry, Resource, Style};
pub use error::CanvasError;
pub use scene::Scene;
