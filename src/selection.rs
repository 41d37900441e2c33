use eframe::egui::Pos2;

/// Pixel tolerance for grabbing an edge or corner.
pub const EDGE_GRAB_THRESHOLD: f32 = 8.0;

/// The live selection, in display-space pixels.
///
/// `left <= right` and `top <= bottom` hold whenever no gesture is in
/// progress; mid-gesture the rect may be transiently inverted (a corner
/// dragged past its opposite edge) and is normalized on pointer release.
/// Edges are never snapped to the image bounds here; the rename pipeline
/// clamps when mapping to source space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SelectionRect {
    pub fn from_corners(a: Pos2, b: Pos2) -> Self {
        Self {
            left: a.x,
            top: a.y,
            right: b.x,
            bottom: b.y,
        }
    }

    pub fn normalized(&self) -> Self {
        let (left, right) = if self.left <= self.right {
            (self.left, self.right)
        } else {
            (self.right, self.left)
        };
        let (top, bottom) = if self.top <= self.bottom {
            (self.top, self.bottom)
        } else {
            (self.bottom, self.top)
        };
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        let r = self.normalized();
        r.left <= pos.x && pos.x <= r.right && r.top <= pos.y && pos.y <= r.bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Edge {
    fn compose(vertical: Option<Edge>, horizontal: Option<Edge>) -> Option<Edge> {
        match (vertical, horizontal) {
            (Some(Edge::N), Some(Edge::E)) => Some(Edge::NE),
            (Some(Edge::N), Some(Edge::W)) => Some(Edge::NW),
            (Some(Edge::S), Some(Edge::E)) => Some(Edge::SE),
            (Some(Edge::S), Some(Edge::W)) => Some(Edge::SW),
            (Some(edge), None) | (None, Some(edge)) => Some(edge),
            _ => None,
        }
    }
}

/// Gesture in progress. Exactly one variant holds at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Drawing { anchor: Pos2 },
    Moving { last: Pos2 },
    Resizing { edge: Edge },
}

/// Owns the single selection rectangle and interprets pointer events.
///
/// Pointer coordinates are taken as-is, including positions outside the
/// viewport; nothing in here fails.
pub struct Selector {
    rect: Option<SelectionRect>,
    state: DragState,
}

impl Selector {
    pub fn new() -> Self {
        Self {
            rect: None,
            state: DragState::Idle,
        }
    }

    pub fn rect(&self) -> Option<SelectionRect> {
        self.rect
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Replaces the rect wholesale, e.g. when a carried-over selection is
    /// rescaled for a new image.
    pub fn set_rect(&mut self, rect: Option<SelectionRect>) {
        self.rect = rect;
        self.state = DragState::Idle;
    }

    /// Reports which edge or corner of the current rect `pos` grabs, if any.
    /// Distance is measured per axis; a corner wins when both axes match.
    pub fn hit_edge(&self, pos: Pos2) -> Option<Edge> {
        let rect = self.rect?.normalized();
        let vertical = if (pos.y - rect.top).abs() <= EDGE_GRAB_THRESHOLD {
            Some(Edge::N)
        } else if (pos.y - rect.bottom).abs() <= EDGE_GRAB_THRESHOLD {
            Some(Edge::S)
        } else {
            None
        };
        let horizontal = if (pos.x - rect.left).abs() <= EDGE_GRAB_THRESHOLD {
            Some(Edge::W)
        } else if (pos.x - rect.right).abs() <= EDGE_GRAB_THRESHOLD {
            Some(Edge::E)
        } else {
            None
        };
        Edge::compose(vertical, horizontal)
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        if let Some(edge) = self.hit_edge(pos) {
            self.state = DragState::Resizing { edge };
            return;
        }
        if self.rect.is_some_and(|rect| rect.contains(pos)) {
            self.state = DragState::Moving { last: pos };
            return;
        }
        // Start a fresh rectangle; any previous one is replaced.
        self.rect = Some(SelectionRect::from_corners(pos, pos));
        self.state = DragState::Drawing { anchor: pos };
    }

    /// Advances the active gesture and reports the current rect for redraw.
    pub fn pointer_moved(&mut self, pos: Pos2) -> Option<SelectionRect> {
        match self.state {
            DragState::Idle => return None,
            DragState::Drawing { anchor } => {
                self.rect = Some(SelectionRect::from_corners(anchor, pos));
            }
            DragState::Moving { last } => {
                if let Some(rect) = self.rect.as_mut() {
                    rect.translate(pos.x - last.x, pos.y - last.y);
                }
                self.state = DragState::Moving { last: pos };
            }
            DragState::Resizing { edge } => {
                if let Some(rect) = self.rect.as_mut() {
                    match edge {
                        Edge::N => rect.top = pos.y,
                        Edge::S => rect.bottom = pos.y,
                        Edge::W => rect.left = pos.x,
                        Edge::E => rect.right = pos.x,
                        Edge::NW => {
                            rect.top = pos.y;
                            rect.left = pos.x;
                        }
                        Edge::NE => {
                            rect.top = pos.y;
                            rect.right = pos.x;
                        }
                        Edge::SW => {
                            rect.bottom = pos.y;
                            rect.left = pos.x;
                        }
                        Edge::SE => {
                            rect.bottom = pos.y;
                            rect.right = pos.x;
                        }
                    }
                }
            }
        }
        self.rect
    }

    pub fn pointer_up(&mut self) {
        if let Some(rect) = self.rect {
            self.rect = Some(rect.normalized());
        }
        self.state = DragState::Idle;
    }

    /// Deletes the rectangle from any state. Calling this with no rectangle
    /// is a no-op.
    pub fn clear(&mut self) {
        self.rect = None;
        self.state = DragState::Idle;
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}
