//! Pan/zoom transform between screen space and world (canvas) space.
//!
//! The editor stores every node and line in world coordinates, which stay
//! unchanged under pan and zoom. The UI reports pointer positions in screen
//! coordinates:
//!
//! ```text
//! screen = world * zoom + pan
//! ```

use crate::geometry::{Point, Rect, Segment};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0, pan_x: 0.0, pan_y: 0.0 }
    }
}

impl Viewport {
    pub fn new(zoom: f32, pan_x: f32, pan_y: f32) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    fn effective_zoom(&self) -> f32 {
        if self.zoom > 0.0 {
            self.zoom
        } else {
            1.0
        }
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        let z = self.effective_zoom();
        Point::new((p.x - self.pan_x) / z, (p.y - self.pan_y) / z)
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        let z = self.effective_zoom();
        Point::new(p.x * z + self.pan_x, p.y * z + self.pan_y)
    }

    pub fn screen_rect_to_world(&self, r: &Rect) -> Rect {
        let z = self.effective_zoom();
        let origin = self.screen_to_world(Point::new(r.x, r.y));
        Rect::new(origin.x, origin.y, r.width / z, r.height / z)
    }

    pub fn world_rect_to_screen(&self, r: &Rect) -> Rect {
        let z = self.effective_zoom();
        let origin = self.world_to_screen(Point::new(r.x, r.y));
        Rect::new(origin.x, origin.y, r.width * z, r.height * z)
    }

    pub fn world_segment_to_screen(&self, s: &Segment) -> Segment {
        Segment::new(self.world_to_screen(s.start), self.world_to_screen(s.end))
    }

    /// Move the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Scale the zoom by `factor`, keeping the world point under `anchor` fixed.
    ///
    /// Returns `true` if the zoom level actually changed. The bounds may be
    /// given in either order; a NaN bound or factor leaves the view alone.
    pub fn zoom_at(&mut self, anchor: Point, factor: f32, min: f32, max: f32) -> bool {
        if min.is_nan() || max.is_nan() || factor.is_nan() {
            return false;
        }
        let (lo, hi) = (min.min(max), min.max(max));
        let old = self.effective_zoom();
        let new = (old * factor).clamp(lo, hi);
        if (new - old).abs() < f32::EPSILON {
            return false;
        }
        let world = self.screen_to_world(anchor);
        self.zoom = new;
        self.pan_x = anchor.x - world.x * new;
        self.pan_y = anchor.y - world.y * new;
        true
    }
}
