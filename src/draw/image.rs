//! Image resources and the background decoder that produces them.

use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while turning a path into pixels.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Decoder panicked on image {0}")]
    DecoderPanicked(PathBuf),
}

/// Straight (non-premultiplied) RGBA8 pixels plus the path they came from.
#[derive(Debug)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes. Renderers read at most
    /// `height` rows from it.
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Reads and decodes a PNG/JPEG/GIF file. Blocking; run it off the event loop.
    pub fn decode(path: &Path) -> Result<Self, ImageError> {
        let decoded = image::open(path)
            .map_err(|source| ImageError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = decoded.dimensions();

        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            rgba: decoded.into_raw(),
        })
    }

    pub fn from_rgba(path: impl Into<PathBuf>, width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            rgba,
        }
    }
}

/// Shared handle to a decoded image, stored as an image element's resource.
///
/// Two handles are equal only when they point at the same decode.
#[derive(Debug, Clone)]
pub struct ImageHandle(Arc<DecodedImage>);

impl ImageHandle {
    pub fn new(image: DecodedImage) -> Self {
        Self(Arc::new(image))
    }
}

impl Deref for ImageHandle {
    type Target = DecodedImage;

    fn deref(&self) -> &DecodedImage {
        &self.0
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Serialize for ImageHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.path.display())
    }
}

/// Returns true when `path` ends in one of `extensions` (case-insensitive).
pub fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

/// Completion message for one load request.
#[derive(Debug)]
pub struct ImageLoadResult {
    pub request_id: u64,
    pub result: Result<ImageHandle, ImageError>,
}

/// Decodes images on the runtime's blocking pool and hands results back to
/// the single-threaded canvas through a channel.
///
/// Requests are fire-and-forget: there is no cancellation. The canvas drains
/// finished decodes with [`ImageLoader::try_next`] from its own event loop.
pub struct ImageLoader {
    runtime: tokio::runtime::Handle,
    result_tx: mpsc::UnboundedSender<ImageLoadResult>,
    result_rx: mpsc::UnboundedReceiver<ImageLoadResult>,
    in_flight: usize,
}

impl ImageLoader {
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime handle whose blocking pool runs the decodes
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            runtime: runtime_handle.clone(),
            result_tx,
            result_rx,
            in_flight: 0,
        }
    }

    /// Starts decoding `path`; the result arrives tagged with `request_id`.
    pub fn request(&mut self, request_id: u64, path: PathBuf) {
        self.spawn_decode(request_id, path, DecodedImage::decode);
    }

    /// Every spawned decode sends exactly one result, even when `decode` panics.
    fn spawn_decode<F>(&mut self, request_id: u64, path: PathBuf, decode: F)
    where
        F: FnOnce(&Path) -> Result<DecodedImage, ImageError> + Send + 'static,
    {
        let tx = self.result_tx.clone();
        self.in_flight += 1;

        self.runtime.spawn_blocking(move || {
            log::debug!("Decoding image request {}: {}", request_id, path.display());
            let result = match panic::catch_unwind(AssertUnwindSafe(|| decode(&path))) {
                Ok(decoded) => decoded.map(ImageHandle::new),
                Err(_) => {
                    log::warn!("Image decoder panicked on {}", path.display());
                    Err(ImageError::DecoderPanicked(path))
                }
            };
            if tx.send(ImageLoadResult { request_id, result }).is_err() {
                log::debug!("Image loader dropped before request {} finished", request_id);
            }
        });
    }

    /// Number of requests whose result has not been taken yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Non-blocking: returns a finished decode if one is waiting.
    pub fn try_next(&mut self) -> Option<ImageLoadResult> {
        let result = self.result_rx.try_recv().ok()?;
        self.in_flight -= 1;
        Some(result)
    }

    /// Blocks the calling thread until the next decode finishes.
    ///
    /// Returns `None` immediately when nothing is in flight. Must not be
    /// called from inside an async task.
    pub fn next_blocking(&mut self) -> Option<ImageLoadResult> {
        if self.in_flight == 0 {
            return None;
        }
        let result = self.result_rx.blocking_recv()?;
        self.in_flight -= 1;
        Some(result)
    }
}
