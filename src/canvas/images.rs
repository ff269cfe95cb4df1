//! Deferred image elements.
//!
//! A draw request is parked here under a request id until the loader reports
//! back. Only then is the element created, painted and passed to the caller's
//! callback, so an image never shows up in the registry half-loaded.

use std::path::Path;

use log::{debug, warn};

use super::{Canvas, ImageReady, Position};
use crate::draw::Renderer;
use crate::draw::image::ImageLoadResult;
use crate::element::{ElementKind, Resource, Style};
use crate::error::CanvasError;
use crate::util::Size;

/// Arguments of an image draw waiting for its pixels.
pub(super) struct PendingImage {
    pub style: Style,
    pub position: Position,
    pub size: Size,
    pub fixed: bool,
    pub on_ready: Option<ImageReady>,
}

impl<R: Renderer> Canvas<R> {
    pub(super) fn request_image(
        &mut self,
        path: &Path,
        pending: PendingImage,
    ) -> Result<(), CanvasError> {
        let loader = self.loader.as_mut().ok_or(CanvasError::LoaderUnavailable)?;

        let request_id = self.next_request;
        self.next_request += 1;
        loader.request(request_id, path.to_path_buf());
        self.pending.insert(request_id, pending);
        Ok(())
    }

    /// Number of image draws whose decode has not been dispatched yet.
    pub fn pending_images(&self) -> usize {
        self.pending.len()
    }

    /// Completes every image decode that has already finished, without
    /// blocking. Meant to be called from the host's event loop.
    ///
    /// Returns the number of requests completed.
    pub fn dispatch_pending_images(&mut self) -> usize {
        let mut completed = 0;
        while let Some(result) = self.loader.as_mut().and_then(|loader| loader.try_next()) {
            self.complete_image(result);
            completed += 1;
        }
        completed
    }

    /// Blocks until every outstanding image request has completed.
    ///
    /// Must not be called from inside an async task.
    pub fn wait_for_images(&mut self) -> usize {
        let mut completed = 0;
        while let Some(result) = self.loader.as_mut().and_then(|loader| loader.next_blocking()) {
            self.complete_image(result);
            completed += 1;
        }
        completed
    }

    fn complete_image(&mut self, loaded: ImageLoadResult) {
        let Some(pending) = self.pending.remove(&loaded.request_id) else {
            warn!("Image result for unknown request {}", loaded.request_id);
            return;
        };

        let outcome = match loaded.result {
            Ok(handle) => {
                let origin =
                    pending
                        .position
                        .resolve(self.surface, pending.size.width, pending.size.height);
                let element = self
                    .registry
                    .create(
                        ElementKind::Image,
                        origin,
                        pending.size,
                        Resource::Image(handle),
                        pending.style,
                        pending.fixed,
                    )
                    .clone();
                self.paint(&element);
                Ok(element)
            }
            Err(err) => {
                warn!("Image load failed: {}", err);
                Err(CanvasError::from(err))
            }
        };

        match pending.on_ready {
            Some(on_ready) => on_ready(outcome),
            None => debug!("Image request {} completed without a callback", loaded.request_id),
        }
    }
}
