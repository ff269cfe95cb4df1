//! Geometry helpers shared by the registry, the layout engine and the drag machine.
//!
//! All coordinates are surface-local pixels as `f64`; auto-centering produces
//! fractional origins, so nothing here is snapped to integers.

use serde::{Deserialize, Serialize};

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    pub fn delta_from(self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Width and height of an element box, as passed to the draw operations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle used for element bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive containment on all four edges, so a pointer resting exactly
    /// on an element's border still selects it.
    pub fn contains(&self, point: Point) -> bool {
        is_between(point.x, self.x, self.x + self.width)
            && is_between(point.y, self.y, self.y + self.height)
    }
}

/// Current pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Top-left origin that centers a box of the given size on the surface.
    pub fn centered_origin(&self, width: f64, height: f64) -> Point {
        Point::new((self.width - width) / 2.0, (self.height - height) / 2.0)
    }
}

fn is_between(value: f64, low: f64, high: f64) -> bool {
    value >= low && value <= high
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_inclusive_on_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(30.0, 15.0)));
        assert!(!rect.contains(Point::new(30.5, 15.0)));
        assert!(!rect.contains(Point::new(20.0, 9.0)));
    }

    #[test]
    fn centered_origin_splits_remaining_space() {
        let surface = SurfaceSize::new(800.0, 600.0);
        assert_eq!(
            surface.centered_origin(100.0, 50.0),
            Point::new(350.0, 275.0)
        );
    }

    #[test]
    fn delta_is_component_wise() {
        let anchor = Point::new(10.0, 10.0);
        assert_eq!(Point::new(15.0, 12.0).delta_from(anchor), (5.0, 2.0));
        assert_eq!(Point::new(5.0, 20.0).delta_from(anchor), (-5.0, 10.0));
    }
}
