//! Rubber-band rectangle for selecting several nodes at once.
//!
//! Works entirely in screen space; the editor converts the finished rectangle
//! to world space before testing it against nodes.

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone)]
pub struct SelectionBox {
    origin: Option<Point>,
    rect: Rect,
    visible: bool,
    start_margin: f32,
    min_size: f32,
}

impl Default for SelectionBox {
    fn default() -> Self {
        Self::new(10.0, 5.0)
    }
}

impl SelectionBox {
    /// `start_margin`: boxes that start this close to the top or left edge
    /// never grow. `min_size`: smaller boxes are discarded on release.
    pub fn new(start_margin: f32, min_size: f32) -> Self {
        Self {
            origin: None,
            rect: Rect::default(),
            visible: false,
            start_margin,
            min_size,
        }
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn begin(&mut self, p: Point) {
        self.origin = Some(p);
        self.rect = Rect::new(p.x, p.y, 0.0, 0.0);
        self.visible = true;
    }

    /// Stretch the box to `p`. Returns whether the rectangle changed.
    pub fn update(&mut self, p: Point) -> bool {
        let Some(origin) = self.origin else {
            return false;
        };
        if origin.x < self.start_margin || origin.y < self.start_margin {
            return false;
        }
        self.rect = Rect::from_corners(origin, p);
        true
    }

    /// End the gesture, yielding the rectangle if it is large enough.
    pub fn finish(&mut self) -> Option<Rect> {
        self.origin?;
        let rect = self.rect;
        self.cancel();
        if rect.width < self.min_size || rect.height < self.min_size {
            return None;
        }
        Some(rect)
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.visible = false;
    }
}
