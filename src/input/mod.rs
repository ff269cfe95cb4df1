//! Pointer input and the drag state machine.
//!
//! This module translates host pointer and touch events into element picks
//! and moves on a [`crate::canvas::Canvas`].

pub mod drag;
pub mod events;

#[cfg(test)]
mod tests;

// Re-export commonly used types at module level
pub use drag::DragState;
pub use events::{PointerEvent, PointerPhase, PointerSource};
