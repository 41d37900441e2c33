use eframe::egui::{self, Color32, Painter, Response, Vec2};

use crate::selection::{SelectionRect, Selector};

/// Bridges egui pointer events on the image panel to the [`Selector`] and
/// paints the current rectangle.
///
/// The selector works in panel-local display coordinates; `origin` is the
/// panel's top-left in screen space and is stripped from incoming pointer
/// positions and re-applied when painting.
pub struct Canvas {
    pub selector: Selector,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            selector: Selector::new(),
        }
    }

    pub fn clear(&mut self) {
        self.selector.clear();
    }

    /// Feeds the response's drag phases into the state machine. Returns the
    /// live rect after a move so the host can refresh its status line.
    pub fn handle_pointer(&mut self, response: &Response, origin: Vec2) -> Option<SelectionRect> {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.selector.pointer_down(pos - origin);
            }
            None
        } else if response.dragged() {
            response
                .interact_pointer_pos()
                .and_then(|pos| self.selector.pointer_moved(pos - origin))
        } else if response.drag_stopped() {
            self.selector.pointer_up();
            None
        } else {
            None
        }
    }

    pub fn draw(&self, painter: &Painter, origin: Vec2) {
        let Some(rect) = self.selector.rect() else {
            return;
        };
        let rect = rect.normalized();
        let rect = egui::Rect::from_min_max(
            egui::pos2(rect.left, rect.top) + origin,
            egui::pos2(rect.right, rect.bottom) + origin,
        );
        painter.rect_filled(rect, 0.0, Color32::from_rgba_unmultiplied(255, 255, 255, 24));
        painter.rect_stroke(rect, 0.0, (2.0, Color32::RED), egui::StrokeKind::Middle);
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
