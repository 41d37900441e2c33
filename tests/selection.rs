use eframe::egui;
use imagerenamer::selection::*;

fn rect(left: f32, top: f32, right: f32, bottom: f32) -> SelectionRect {
    SelectionRect {
        left,
        top,
        right,
        bottom,
    }
}

#[test]
fn drawing_gesture_creates_rect() {
    let mut selector = Selector::new();
    assert_eq!(selector.rect(), None);

    selector.pointer_down(egui::pos2(10.0, 10.0));
    assert!(matches!(selector.state(), DragState::Drawing { .. }));

    let live = selector.pointer_moved(egui::pos2(30.0, 40.0)).unwrap();
    assert_eq!(live, rect(10.0, 10.0, 30.0, 40.0));

    selector.pointer_up();
    assert_eq!(selector.state(), DragState::Idle);
    assert_eq!(selector.rect(), Some(rect(10.0, 10.0, 30.0, 40.0)));
}

#[test]
fn drawing_past_anchor_inverts_until_release() {
    let mut selector = Selector::new();
    selector.pointer_down(egui::pos2(50.0, 50.0));
    let live = selector.pointer_moved(egui::pos2(20.0, 10.0)).unwrap();
    // Mid-gesture the corners may cross; nothing is swapped yet.
    assert_eq!(live, rect(50.0, 50.0, 20.0, 10.0));

    selector.pointer_up();
    assert_eq!(selector.rect(), Some(rect(20.0, 10.0, 50.0, 50.0)));
}

#[test]
fn pointer_down_inside_translates_preserving_size() {
    let mut selector = Selector::new();
    selector.set_rect(Some(rect(10.0, 10.0, 50.0, 50.0)));

    selector.pointer_down(egui::pos2(30.0, 30.0));
    assert!(matches!(selector.state(), DragState::Moving { .. }));

    selector.pointer_moved(egui::pos2(35.0, 32.0));
    selector.pointer_moved(egui::pos2(40.0, 25.0));
    selector.pointer_up();

    let moved = selector.rect().unwrap();
    assert_eq!(moved, rect(20.0, 5.0, 60.0, 45.0));
    assert_eq!(moved.width(), 40.0);
    assert_eq!(moved.height(), 40.0);
}

#[test]
fn pointer_down_near_edge_resizes_only_that_edge() {
    let mut selector = Selector::new();
    selector.set_rect(Some(rect(10.0, 10.0, 50.0, 50.0)));

    selector.pointer_down(egui::pos2(50.0, 30.0));
    assert_eq!(selector.state(), DragState::Resizing { edge: Edge::E });

    selector.pointer_moved(egui::pos2(70.0, 45.0));
    selector.pointer_up();
    // Only the east coordinate follows the pointer.
    assert_eq!(selector.rect(), Some(rect(10.0, 10.0, 70.0, 50.0)));
}

#[test]
fn corner_takes_priority_over_single_edges() {
    let mut selector = Selector::new();
    selector.set_rect(Some(rect(10.0, 10.0, 50.0, 50.0)));

    assert_eq!(selector.hit_edge(egui::pos2(11.0, 12.0)), Some(Edge::NW));
    assert_eq!(selector.hit_edge(egui::pos2(49.0, 51.0)), Some(Edge::SE));
    assert_eq!(selector.hit_edge(egui::pos2(30.0, 10.0)), Some(Edge::N));
    assert_eq!(selector.hit_edge(egui::pos2(50.0, 30.0)), Some(Edge::E));
    assert_eq!(selector.hit_edge(egui::pos2(30.0, 30.0)), None);
}

#[test]
fn edge_grab_respects_threshold() {
    let mut selector = Selector::new();
    selector.set_rect(Some(rect(10.0, 10.0, 50.0, 50.0)));

    assert_eq!(
        selector.hit_edge(egui::pos2(10.0 + EDGE_GRAB_THRESHOLD, 30.0)),
        Some(Edge::W)
    );
    assert_eq!(
        selector.hit_edge(egui::pos2(10.0 + EDGE_GRAB_THRESHOLD + 1.0, 30.0)),
        None
    );

    selector.pointer_down(egui::pos2(10.0 + EDGE_GRAB_THRESHOLD + 1.0, 30.0));
    assert!(matches!(selector.state(), DragState::Moving { .. }));
}

#[test]
fn resize_crossing_opposite_edge_normalizes_on_release() {
    let mut selector = Selector::new();
    selector.set_rect(Some(rect(10.0, 10.0, 50.0, 50.0)));

    selector.pointer_down(egui::pos2(50.0, 30.0));
    let live = selector.pointer_moved(egui::pos2(0.0, 30.0)).unwrap();
    assert_eq!(live.right, 0.0);
    assert_eq!(live.left, 10.0);

    selector.pointer_up();
    assert_eq!(selector.rect(), Some(rect(0.0, 10.0, 10.0, 50.0)));
}

#[test]
fn out_of_viewport_positions_are_accepted() {
    let mut selector = Selector::new();
    selector.pointer_down(egui::pos2(5.0, 5.0));
    selector.pointer_moved(egui::pos2(-40.0, -30.0));
    selector.pointer_up();
    // No clamping here; the rename pipeline clamps in source space.
    assert_eq!(selector.rect(), Some(rect(-40.0, -30.0, 5.0, 5.0)));
}

#[test]
fn pointer_down_outside_replaces_rect() {
    let mut selector = Selector::new();
    selector.set_rect(Some(rect(10.0, 10.0, 50.0, 50.0)));

    selector.pointer_down(egui::pos2(200.0, 200.0));
    assert!(matches!(selector.state(), DragState::Drawing { .. }));
    assert_eq!(selector.rect(), Some(rect(200.0, 200.0, 200.0, 200.0)));
}

#[test]
fn clear_is_idempotent() {
    let mut selector = Selector::new();
    selector.set_rect(Some(rect(10.0, 10.0, 50.0, 50.0)));
    selector.pointer_down(egui::pos2(30.0, 30.0));

    selector.clear();
    assert_eq!(selector.rect(), None);
    assert_eq!(selector.state(), DragState::Idle);

    selector.clear();
    assert_eq!(selector.rect(), None);
    assert_eq!(selector.state(), DragState::Idle);
}

#[test]
fn moves_while_idle_report_nothing() {
    let mut selector = Selector::new();
    assert_eq!(selector.pointer_moved(egui::pos2(10.0, 10.0)), None);
    assert_eq!(selector.rect(), None);
}
