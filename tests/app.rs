use eframe::egui::Vec2;
use imagerenamer::app::{carry_selection, to_color_image, SelectionCarry};
use imagerenamer::selection::SelectionRect;
use imagerenamer::ui::Placement;

mod common;
use common::solid_image;

fn rect(left: f32, top: f32, right: f32, bottom: f32) -> SelectionRect {
    SelectionRect {
        left,
        top,
        right,
        bottom,
    }
}

#[test]
fn discard_policy_drops_the_rect_on_image_change() {
    let from = Placement::fit(Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0), 1.0);
    let to = Placement::fit(Vec2::new(50.0, 100.0), Vec2::new(200.0, 200.0), 1.0);
    let carried = carry_selection(
        SelectionCarry::Discard,
        Some(from),
        Some(to),
        Some(rect(10.0, 10.0, 50.0, 50.0)),
    );
    assert_eq!(carried, None);
}

#[test]
fn rescale_policy_remaps_into_the_new_placement() {
    let from = Placement::fit(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0), 1.0);
    let to = Placement::fit(Vec2::new(200.0, 100.0), Vec2::new(200.0, 100.0), 1.0);
    let carried = carry_selection(
        SelectionCarry::Rescale,
        Some(from),
        Some(to),
        Some(rect(75.0, 25.0, 125.0, 75.0)),
    )
    .unwrap();
    assert!((carried.left - 50.0).abs() < 1e-3);
    assert!((carried.right - 150.0).abs() < 1e-3);
}

#[test]
fn rescale_without_a_rect_carries_nothing() {
    let placement = Placement::fit(Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0), 1.0);
    let carried = carry_selection(
        SelectionCarry::Rescale,
        Some(placement),
        Some(placement),
        None,
    );
    assert_eq!(carried, None);
}

#[test]
fn to_color_image_matches_source_dimensions() {
    let image = solid_image(12, 7, [10, 20, 30, 255]);
    let color = to_color_image(&image);
    assert_eq!(color.size, [12, 7]);
}
