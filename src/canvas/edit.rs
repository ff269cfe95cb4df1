use log::debug;
use serde_json::{Value, json};

use super::{Canvas, Position};
use crate::draw::Renderer;
use crate::element::Element;
use crate::error::CanvasError;
use crate::input::DragState;
use crate::schema::SchemaName;
use crate::util::Point;

impl<R: Renderer> Canvas<R> {
    /// Translates an element so that it follows `point`.
    ///
    /// While the element is being dragged the translation is relative to the
    /// drag anchor, which then advances to `point`. Otherwise the element's own
    /// origin is the anchor, so its top-left corner lands on `point`.
    ///
    /// Repaints and outlines the moved element. Returns it as stored after the
    /// move.
    pub fn move_element(&mut self, id: u64, point: Point) -> Result<Element, CanvasError> {
        self.check_schema(&Position::from(point), SchemaName::Element)?;
        let element = self.registry.get(id).ok_or(CanvasError::NotFound(id))?;

        let dragged = matches!(self.drag, DragState::Dragging { element_id, .. } if element_id == id);
        let anchor = match self.drag {
            DragState::Dragging { anchor, .. } if dragged => anchor,
            _ => element.origin(),
        };
        let (dx, dy) = point.delta_from(anchor);
        let patch = json!({ "x": element.x + dx, "y": element.y + dy });

        self.registry.update(id, &patch, self.surface)?;
        if dragged {
            self.drag = DragState::Dragging {
                element_id: id,
                anchor: point,
            };
        }

        self.redraw_with_selection(id);
        self.registry
            .get(id)
            .cloned()
            .ok_or(CanvasError::NotFound(id))
    }

    /// Merges `patch` into the element with `id` and returns the element as it
    /// was before. Does not repaint.
    pub fn update(&mut self, id: u64, patch: &Value) -> Result<Element, CanvasError> {
        self.registry.update(id, patch, self.surface)
    }

    /// Removes the element with `id` and repaints.
    ///
    /// Ends a drag of that element.
    pub fn erase(&mut self, id: u64) -> Result<Element, CanvasError> {
        let element = self.registry.erase(id).ok_or(CanvasError::NotFound(id))?;
        if matches!(self.drag, DragState::Dragging { element_id, .. } if element_id == id) {
            debug!("Erased element {} while dragging it", id);
            self.drag = DragState::Idle;
        }
        self.redraw();
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, RecordingRenderer};
    use crate::util::{Size, SurfaceSize};

    fn canvas_with_rect() -> (Canvas<RecordingRenderer>, u64) {
        let mut canvas =
            Canvas::with_defaults(RecordingRenderer::default(), SurfaceSize::new(800.0, 600.0));
        let rect = canvas
            .draw_rect("#00f", Position::at(10.0, 20.0), Size::new(30.0, 30.0), false)
            .unwrap();
        (canvas, rect.id)
    }

    #[test]
    fn move_without_drag_places_top_left_on_point() {
        let (mut canvas, id) = canvas_with_rect();
        let moved = canvas.move_element(id, Point::new(100.0, 200.0)).unwrap();
        assert_eq!((moved.x, moved.y), (100.0, 200.0));
        assert!(matches!(
            canvas.renderer().last_frame().last(),
            Some(DrawCommand::StrokeRect { x, y, .. }) if *x == 100.0 && *y == 200.0
        ));
    }

    #[test]
    fn move_off_surface_is_rejected_without_mutation() {
        let (mut canvas, id) = canvas_with_rect();
        let err = canvas.move_element(id, Point::new(900.0, 0.0)).unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(
            canvas.move_element(42, Point::new(1.0, 1.0)),
            Err(CanvasError::NotFound(42))
        ));
        let element = canvas.element(id).unwrap();
        assert_eq!((element.x, element.y), (10.0, 20.0));
    }

    #[test]
    fn update_returns_previous_and_does_not_repaint() {
        let (mut canvas, id) = canvas_with_rect();
        let commands_before = canvas.renderer().commands().len();
        let previous = canvas.update(id, &json!({ "resource": "#0f0" })).unwrap();
        assert_eq!(previous.resource, crate::element::Resource::Color("#00f".into()));
        assert_eq!(canvas.renderer().commands().len(), commands_before);
    }

    #[test]
    fn erase_repaints_without_the_element() {
        let (mut canvas, id) = canvas_with_rect();
        canvas.erase(id).unwrap();
        assert_eq!(
            canvas.renderer().last_frame(),
            &[DrawCommand::Clear {
                width: 800.0,
                height: 600.0
            }]
        );
        assert!(matches!(canvas.erase(id), Err(CanvasError::NotFound(_))));
    }
}
