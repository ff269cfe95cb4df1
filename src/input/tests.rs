use super::*;
use crate::canvas::{Canvas, Position};
use crate::draw::{DrawCommand, RecordingRenderer};
use crate::util::{Point, Size, SurfaceSize};

fn create_test_canvas() -> Canvas<RecordingRenderer> {
    Canvas::with_defaults(RecordingRenderer::default(), SurfaceSize::new(800.0, 600.0))
}

fn rect(canvas: &mut Canvas<RecordingRenderer>, x: f64, y: f64, size: f64, fixed: bool) -> u64 {
    canvas
        .draw_rect("#808080", Position::at(x, y), Size::new(size, size), fixed)
        .unwrap()
        .id
}

fn position_of(canvas: &Canvas<RecordingRenderer>, id: u64) -> (f64, f64) {
    let element = canvas.element(id).unwrap();
    (element.x, element.y)
}

#[test]
fn test_pointer_down_picks_highest_zindex() {
    let mut canvas = create_test_canvas();
    rect(&mut canvas, 0.0, 0.0, 200.0, false);
    let low = rect(&mut canvas, 0.0, 0.0, 100.0, false);
    rect(&mut canvas, 400.0, 400.0, 10.0, false);
    rect(&mut canvas, 500.0, 500.0, 10.0, false);
    let high = rect(&mut canvas, 0.0, 0.0, 100.0, false);

    assert_eq!(canvas.element(low).unwrap().zindex, 2);
    assert_eq!(canvas.element(high).unwrap().zindex, 5);

    canvas.on_pointer_down(Point::new(50.0, 50.0));
    assert_eq!(canvas.active_element_id(), Some(high));
    assert_eq!(
        canvas.drag_state(),
        DragState::Dragging {
            element_id: high,
            anchor: Point::new(50.0, 50.0)
        }
    );
}

#[test]
fn test_fixed_element_blocks_selection_beneath() {
    let mut canvas = create_test_canvas();
    let movable = rect(&mut canvas, 0.0, 0.0, 200.0, false);
    rect(&mut canvas, 0.0, 0.0, 100.0, true);

    canvas.on_pointer_down(Point::new(10.0, 10.0));
    assert!(canvas.active_element().is_none());
    assert_eq!(canvas.drag_state(), DragState::Idle);

    // outside the fixed element the movable one is reachable
    canvas.on_pointer_down(Point::new(150.0, 150.0));
    assert_eq!(canvas.active_element_id(), Some(movable));
}

#[test]
fn test_pointer_down_on_fixed_clears_previous_selection() {
    let mut canvas = create_test_canvas();
    let movable = rect(&mut canvas, 0.0, 0.0, 50.0, false);
    rect(&mut canvas, 100.0, 100.0, 50.0, true);

    canvas.on_pointer_down(Point::new(10.0, 10.0));
    assert_eq!(canvas.active_element_id(), Some(movable));

    canvas.on_pointer_down(Point::new(120.0, 120.0));
    assert_eq!(canvas.active_element_id(), None);
}

#[test]
fn test_pointer_down_on_empty_space_clears_selection() {
    let mut canvas = create_test_canvas();
    let id = rect(&mut canvas, 0.0, 0.0, 50.0, false);
    canvas.on_pointer_down(Point::new(10.0, 10.0));
    assert_eq!(canvas.active_element_id(), Some(id));

    canvas.on_pointer_down(Point::new(700.0, 500.0));
    assert_eq!(canvas.active_element_id(), None);
    assert_eq!(canvas.drag_state(), DragState::Idle);
}

#[test]
fn test_drag_translates_by_delta_from_anchor() {
    let mut canvas = create_test_canvas();
    let id = rect(&mut canvas, 0.0, 0.0, 50.0, false);

    canvas.on_pointer_down(Point::new(10.0, 10.0));
    assert!(canvas.on_pointer_move(Point::new(15.0, 12.0)));
    assert_eq!(position_of(&canvas, id), (5.0, 2.0));
    assert_eq!(
        canvas.drag_state(),
        DragState::Dragging {
            element_id: id,
            anchor: Point::new(15.0, 12.0)
        }
    );

    assert!(canvas.on_pointer_move(Point::new(20.0, 10.0)));
    assert_eq!(position_of(&canvas, id), (10.0, 0.0));
}

#[test]
fn test_drag_redraws_selection_outline_at_new_position() {
    let mut canvas = create_test_canvas();
    rect(&mut canvas, 0.0, 0.0, 50.0, false);

    canvas.on_pointer_down(Point::new(10.0, 10.0));
    canvas.on_pointer_move(Point::new(30.0, 40.0));

    let frame = canvas.renderer().last_frame();
    assert!(matches!(frame.first(), Some(DrawCommand::Clear { .. })));
    assert!(matches!(
        frame.last(),
        Some(DrawCommand::StrokeRect { x, y, width, line_width, .. })
            if *x == 20.0 && *y == 30.0 && *width == 50.0 && *line_width == 1.0
    ));
}

#[test]
fn test_move_while_idle_is_noop() {
    let mut canvas = create_test_canvas();
    let id = rect(&mut canvas, 0.0, 0.0, 50.0, false);

    assert!(!canvas.on_pointer_move(Point::new(30.0, 30.0)));
    assert_eq!(position_of(&canvas, id), (0.0, 0.0));
}

#[test]
fn test_pointer_up_stops_drag_but_keeps_selection() {
    let mut canvas = create_test_canvas();
    let id = rect(&mut canvas, 0.0, 0.0, 50.0, false);

    canvas.on_pointer_down(Point::new(10.0, 10.0));
    canvas.on_pointer_up();
    assert_eq!(canvas.drag_state(), DragState::Idle);
    assert_eq!(canvas.active_element_id(), Some(id));

    assert!(!canvas.on_pointer_move(Point::new(40.0, 40.0)));
    assert_eq!(position_of(&canvas, id), (0.0, 0.0));
}

#[test]
fn test_drag_off_surface_keeps_anchor() {
    let mut canvas = create_test_canvas();
    let id = rect(&mut canvas, 0.0, 0.0, 50.0, false);

    canvas.on_pointer_down(Point::new(10.0, 10.0));
    assert!(!canvas.on_pointer_move(Point::new(900.0, 10.0)));
    assert_eq!(position_of(&canvas, id), (0.0, 0.0));

    assert!(canvas.on_pointer_move(Point::new(20.0, 10.0)));
    assert_eq!(position_of(&canvas, id), (10.0, 0.0));
}

#[test]
fn test_erasing_dragged_element_returns_to_idle() {
    let mut canvas = create_test_canvas();
    let id = rect(&mut canvas, 0.0, 0.0, 50.0, false);

    canvas.on_pointer_down(Point::new(10.0, 10.0));
    canvas.erase(id).unwrap();
    assert_eq!(canvas.drag_state(), DragState::Idle);
    assert!(canvas.active_element().is_none());
    assert!(!canvas.on_pointer_move(Point::new(20.0, 20.0)));
}

#[test]
fn test_handle_pointer_routes_touch_events() {
    let mut canvas = create_test_canvas();
    let id = rect(&mut canvas, 0.0, 0.0, 50.0, false);

    canvas.handle_pointer(&PointerEvent::touch(
        PointerPhase::Down,
        vec![Point::new(5.0, 5.0)],
    ));
    canvas.handle_pointer(&PointerEvent::touch(
        PointerPhase::Move,
        vec![Point::new(8.0, 9.0), Point::new(200.0, 200.0)],
    ));
    canvas.handle_pointer(&PointerEvent::touch(PointerPhase::Up, vec![]));

    assert_eq!(position_of(&canvas, id), (3.0, 4.0));
    assert_eq!(canvas.drag_state(), DragState::Idle);
}

#[test]
fn test_handle_pointer_ignores_touch_without_points() {
    let mut canvas = create_test_canvas();
    let id = rect(&mut canvas, 0.0, 0.0, 50.0, false);

    canvas.handle_pointer(&PointerEvent::mouse(PointerPhase::Down, 5.0, 5.0));
    canvas.handle_pointer(&PointerEvent::touch(PointerPhase::Move, vec![]));
    assert_eq!(position_of(&canvas, id), (0.0, 0.0));
    assert!(matches!(canvas.drag_state(), DragState::Dragging { .. }));
}
