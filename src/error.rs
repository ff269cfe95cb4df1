//! Error type for canvas operations.
//!
//! Every failure is local and recoverable: the registry is left exactly as it
//! was and the caller may retry with corrected input.

use thiserror::Error;

use crate::draw::ImageError;
use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum CanvasError {
    /// An argument failed its schema check.
    #[error("validation failed: {0}")]
    Validation(#[from] SchemaError),

    /// An argument failed a check that has no schema field, such as an image
    /// path without a known extension.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A patch passed validation but cannot be stored on the element.
    #[error("patch cannot be applied: {0}")]
    Patch(String),

    /// No live element has this id.
    #[error("no element with id {0}")]
    NotFound(u64),

    #[error("failed to build validation view: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("no image loader attached to this canvas")]
    LoaderUnavailable,
}

impl CanvasError {
    /// True for the validation family (schema, argument and patch failures).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CanvasError::Validation(_) | CanvasError::InvalidArgument(_) | CanvasError::Patch(_)
        )
    }
}
