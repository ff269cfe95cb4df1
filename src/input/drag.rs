use log::debug;

use super::events::{PointerEvent, PointerPhase};
use crate::canvas::Canvas;
use crate::draw::Renderer;
use crate::util::Point;

/// Pointer drag state machine.
///
/// Starts `Idle` and never terminates; the canvas lives as long as its host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No element is following the pointer
    #[default]
    Idle,
    /// An element was picked up and follows pointer moves
    Dragging {
        element_id: u64,
        /// Last pointer position applied to the element
        anchor: Point,
    },
}

impl<R: Renderer> Canvas<R> {
    /// Processes a pointer press.
    ///
    /// # Behavior
    /// - Topmost element under `point` is movable: it becomes active, a drag
    ///   starts with `point` as anchor, and the selection outline is drawn
    /// - Topmost element is fixed: the selection is cleared. Nothing beneath a
    ///   fixed element can be picked at that point
    /// - Nothing under `point`: the selection is cleared
    ///
    /// The surface is repainted in every case.
    pub fn on_pointer_down(&mut self, point: Point) {
        let hit = self.registry.hit_test(point).map(|e| (e.id, e.fixed));

        match hit {
            Some((id, false)) => {
                self.registry.set_active(Some(id));
                self.drag = DragState::Dragging {
                    element_id: id,
                    anchor: point,
                };
                self.redraw_with_selection(id);
            }
            Some((id, true)) => {
                debug!("Element {} is fixed; clearing selection", id);
                self.registry.set_active(None);
                self.drag = DragState::Idle;
                self.redraw();
            }
            None => {
                self.registry.set_active(None);
                self.drag = DragState::Idle;
                self.redraw();
            }
        }
    }

    /// Processes pointer motion.
    ///
    /// Moves the dragged element by the distance since the anchor. A move while
    /// idle does nothing; dragging only ever starts from a press.
    ///
    /// Returns true if an element moved.
    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        let DragState::Dragging { element_id, .. } = self.drag else {
            return false;
        };

        match self.move_element(element_id, point) {
            Ok(_) => true,
            Err(err) => {
                debug!("Drag of element {} to {:?} refused: {}", element_id, point, err);
                false
            }
        }
    }

    /// Processes a pointer release: stops the drag, keeps the selection.
    pub fn on_pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Routes a host event to the matching handler.
    ///
    /// Press and motion events without a position are ignored.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match (event.phase, event.position()) {
            (PointerPhase::Up, _) => self.on_pointer_up(),
            (PointerPhase::Down, Some(point)) => self.on_pointer_down(point),
            (PointerPhase::Move, Some(point)) => {
                self.on_pointer_move(point);
            }
            (phase, None) => debug!("Ignoring {:?} event without a position", phase),
        }
    }
}
