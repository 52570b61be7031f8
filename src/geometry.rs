//! Plain geometry used for hit testing, selection and sweep deletion.

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle stored as top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edge-inclusive point containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Strict overlap test; rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Zero-length segment anchored at `p`.
    pub const fn at(p: Point) -> Self {
        Self { start: p, end: p }
    }

    pub fn length(&self) -> f32 {
        self.start.distance_to(self.end)
    }
}

/// Orientation of `p` relative to the directed segment `a -> b`.
///
/// Returns 1 for one side, -1 for the other and 0 when `p` lies on the
/// segment itself. Points on the infinite line but beyond either endpoint get
/// a non-zero sign, so that collinear-but-disjoint segments do not intersect.
pub fn relative_ccw(a: Point, b: Point, p: Point) -> i32 {
    let (x1, y1) = (a.x as f64, a.y as f64);
    let x2 = b.x as f64 - x1;
    let y2 = b.y as f64 - y1;
    let mut px = p.x as f64 - x1;
    let mut py = p.y as f64 - y1;

    let mut ccw = px * y2 - py * x2;
    if ccw == 0.0 {
        ccw = px * x2 + py * y2;
        if ccw > 0.0 {
            px -= x2;
            py -= y2;
            ccw = px * x2 + py * y2;
            if ccw < 0.0 {
                ccw = 0.0;
            }
        }
    }

    if ccw < 0.0 {
        -1
    } else if ccw > 0.0 {
        1
    } else {
        0
    }
}

/// Whether two segments share at least one point.
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    relative_ccw(a.start, a.end, b.start) * relative_ccw(a.start, a.end, b.end) <= 0
        && relative_ccw(b.start, b.end, a.start) * relative_ccw(b.start, b.end, a.end) <= 0
}

/// Trait for anything that occupies a rectangle on the canvas.
pub trait NodeGeometry {
    fn id(&self) -> i32;
    fn rect(&self) -> Rect;
}

/// Find all nodes that intersect with a selection box.
pub fn nodes_in_selection_box<N, I>(selection: &Rect, nodes: I) -> Vec<i32>
where
    N: NodeGeometry,
    I: IntoIterator<Item = N>,
{
    nodes
        .into_iter()
        .filter(|node| node.rect().intersects(selection))
        .map(|node| node.id())
        .collect()
}
