use eframe::egui;
use imagerenamer::app::canvas::Canvas;
use imagerenamer::selection::SelectionRect;

#[test]
fn new_canvas_has_no_selection() {
    let canvas = Canvas::new();
    assert_eq!(canvas.selector.rect(), None);
}

#[test]
fn clear_resets_selector_state() {
    let mut canvas = Canvas::new();
    canvas.selector.pointer_down(egui::pos2(10.0, 10.0));
    canvas.selector.pointer_moved(egui::pos2(40.0, 40.0));
    canvas.clear();
    assert_eq!(canvas.selector.rect(), None);

    canvas.clear();
    assert_eq!(canvas.selector.rect(), None);
}

#[test]
fn selector_rect_survives_between_frames() {
    let mut canvas = Canvas::new();
    canvas.selector.set_rect(Some(SelectionRect {
        left: 1.0,
        top: 2.0,
        right: 3.0,
        bottom: 4.0,
    }));
    assert!(canvas.selector.rect().is_some());
}
