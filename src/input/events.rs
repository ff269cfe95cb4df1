//! Generic pointer event types for host-independent input handling.

use crate::util::Point;

/// Phase of a single pointer stream.
///
/// Hosts deliver these mutually exclusively, so at most one drag is ever in
/// progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Mouse button pressed or touch started
    Down,
    /// Mouse moved or touch moved
    Move,
    /// Mouse button released or touch ended
    Up,
}

/// Where the pointer is, in surface-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSource {
    Mouse(Point),
    /// Current touch points; only the first one is used
    Touch(Vec<Point>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse(Point::new(x, y)),
        }
    }

    pub fn touch(phase: PointerPhase, points: Vec<Point>) -> Self {
        Self {
            phase,
            source: PointerSource::Touch(points),
        }
    }

    /// The mouse position, or the first touch point. `None` for a touch event
    /// that carries no points (a touch end usually does not).
    pub fn position(&self) -> Option<Point> {
        match &self.source {
            PointerSource::Mouse(point) => Some(*point),
            PointerSource::Touch(points) => points.first().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_uses_first_point() {
        let event = PointerEvent::touch(
            PointerPhase::Move,
            vec![Point::new(3.0, 4.0), Point::new(50.0, 50.0)],
        );
        assert_eq!(event.position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(PointerEvent::touch(PointerPhase::Up, vec![]).position(), None);
    }
}
