//! Drag tracking and drop-to-quadrant classification.

/// 2D point / vector in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle (client coordinates for bounding rects).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Screen quadrant, each bound to one answer choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }
}

/// Classifies a point (container-relative) against the container's midlines.
/// Points exactly on a midline count as left / top.
pub fn resolve_quadrant(center: Point, width: f64, height: f64) -> Quadrant {
    let is_right = center.x > width / 2.0;
    let is_bottom = center.y > height / 2.0;
    match (is_right, is_bottom) {
        (false, false) => Quadrant::TopLeft,
        (true, false) => Quadrant::TopRight,
        (false, true) => Quadrant::BottomLeft,
        (true, true) => Quadrant::BottomRight,
    }
}

/// Transient per-drag state: grab offset and last tracked top-left position
/// of the dragged element, relative to the container.
#[derive(Clone, Debug, Default)]
pub struct DragState {
    active: bool,
    offset: Point,
    position: Point,
}

impl DragState {
    /// Pointer pressed on the element. Records the grab offset so the element
    /// does not jump under the cursor.
    pub fn begin(&mut self, pointer: Point, element: Rect, container: Rect) {
        self.active = true;
        self.offset = Point::new(pointer.x - element.left, pointer.y - element.top);
        self.position = self.follow(pointer, container);
    }

    /// Pointer moved; returns the new top-left if dragging.
    pub fn move_to(&mut self, pointer: Point, container: Rect) -> Option<Point> {
        if !self.active {
            return None;
        }
        self.position = self.follow(pointer, container);
        Some(self.position)
    }

    /// Pointer released; classifies the element's center. `None` if no drag
    /// was in progress.
    pub fn release(&mut self, element_width: f64, element_height: f64, container: Rect) -> Option<Quadrant> {
        if !self.active {
            return None;
        }
        let center = Point::new(
            self.position.x + element_width / 2.0,
            self.position.y + element_height / 2.0,
        );
        self.clear();
        Some(resolve_quadrant(center, container.width, container.height))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Option<Point> {
        self.active.then_some(self.position)
    }

    fn follow(&self, pointer: Point, container: Rect) -> Point {
        Point::new(
            pointer.x - container.left - self.offset.x,
            pointer.y - container.top - self.offset.y,
        )
    }
}
