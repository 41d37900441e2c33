use std::time::{Duration, Instant};

use eframe::egui::{self, Pos2, Rect, Vec2};

use crate::selection::SelectionRect;

/// Fraction of the viewport the displayed image may occupy.
pub const DISPLAY_MARGIN: f32 = 0.95;

/// Quiet period before a burst of resize notifications is acted on.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// How one source image is scaled and centered into the viewport.
///
/// `offset` is the display-pixel origin of the image inside the viewport;
/// everything left/above it is letterbox. Recomputed whenever the active
/// image or the viewport changes, never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub scale: f32,
    pub offset: Vec2,
    pub display_size: Vec2,
    pub source_size: Vec2,
}

impl Placement {
    pub fn fit(source_size: Vec2, viewport: Vec2, margin: f32) -> Self {
        let safe_source = egui::vec2(source_size.x.max(1.0), source_size.y.max(1.0));
        let scale = (viewport.x / safe_source.x)
            .min(viewport.y / safe_source.y)
            .max(0.01)
            * margin.clamp(f32::EPSILON, 1.0);
        let display_size = safe_source * scale;
        let offset = (viewport - display_size) * 0.5;
        Self {
            scale,
            offset,
            display_size,
            source_size: safe_source,
        }
    }

    /// The letterboxed image area, in viewport coordinates.
    pub fn display_rect(&self) -> Rect {
        Rect::from_min_size(self.offset.to_pos2(), self.display_size)
    }

    /// Maps a display-space selection into this image's pixel space, clamped
    /// to the image bounds. The result may be degenerate; callers must check
    /// before cropping.
    pub fn to_source(&self, rect: &SelectionRect) -> SourceRegion {
        let rect = rect.normalized();
        SourceRegion {
            left: ((rect.left - self.offset.x) / self.scale).clamp(0.0, self.source_size.x),
            top: ((rect.top - self.offset.y) / self.scale).clamp(0.0, self.source_size.y),
            right: ((rect.right - self.offset.x) / self.scale).clamp(0.0, self.source_size.x),
            bottom: ((rect.bottom - self.offset.y) / self.scale).clamp(0.0, self.source_size.y),
        }
    }

    /// Inverse of [`Self::to_source`], without clamping.
    pub fn to_display(&self, region: &SourceRegion) -> SelectionRect {
        SelectionRect {
            left: region.left * self.scale + self.offset.x,
            top: region.top * self.scale + self.offset.y,
            right: region.right * self.scale + self.offset.x,
            bottom: region.bottom * self.scale + self.offset.y,
        }
    }

    /// Reinterprets a display-space rect drawn against `self` for a new
    /// placement, keeping its position relative to the displayed image area.
    pub fn rescale(&self, to: &Placement, rect: &SelectionRect) -> SelectionRect {
        let map = |p: Pos2| -> Pos2 {
            let rel = egui::vec2(
                (p.x - self.offset.x) / self.display_size.x.max(1.0),
                (p.y - self.offset.y) / self.display_size.y.max(1.0),
            );
            egui::pos2(
                to.offset.x + rel.x * to.display_size.x,
                to.offset.y + rel.y * to.display_size.y,
            )
        };
        let rect = rect.normalized();
        let min = map(egui::pos2(rect.left, rect.top));
        let max = map(egui::pos2(rect.right, rect.bottom));
        SelectionRect {
            left: min.x,
            top: min.y,
            right: max.x,
            bottom: max.y,
        }
    }
}

/// A selection mapped into one image's pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRegion {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SourceRegion {
    pub fn is_degenerate(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Integer crop window `(x, y, width, height)`, or `None` when the region
    /// collapses below one pixel.
    pub fn crop_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        if self.is_degenerate() {
            return None;
        }
        let x = self.left.round() as u32;
        let y = self.top.round() as u32;
        let w = (self.right - self.left).round() as u32;
        let h = (self.bottom - self.top).round() as u32;
        if w == 0 || h == 0 {
            return None;
        }
        Some((x, y, w, h))
    }
}

/// Coalesces viewport-resize notifications so a burst of them triggers one
/// placement recompute after a quiet period, not one per notification.
///
/// The caller supplies the clock; no timers run here.
pub struct ResizeDebouncer {
    pending: Option<Vec2>,
    deadline: Option<Instant>,
    quiet: Duration,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            pending: None,
            deadline: None,
            quiet,
        }
    }

    pub fn notify(&mut self, viewport: Vec2, now: Instant) {
        self.pending = Some(viewport);
        self.deadline = Some(now + self.quiet);
    }

    /// Returns the most recent viewport size once the quiet period has
    /// elapsed, at most once per burst.
    pub fn take_ready(&mut self, now: Instant) -> Option<Vec2> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}
