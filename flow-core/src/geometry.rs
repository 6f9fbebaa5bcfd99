//! Pure geometry: points, rectangles, border points, segment intersection.
//!
//! Everything here is stateless math shared by hit-testing, placement, and
//! the connection resolver. Degenerate inputs (zero-length vectors,
//! coincident points) resolve to a safe value instead of erroring.

use serde::{Deserialize, Serialize};

/// Two segments whose cross product falls below this are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-10;

/// A point (or vector) in canvas space: unscaled, unpanned coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Vector from `a` to `b`.
#[must_use]
pub fn vector_between(a: Point, b: Point) -> Point {
    Point::new(b.x - a.x, b.y - a.y)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    let v = vector_between(a, b);
    v.x.hypot(v.y)
}

/// Unit vector in the direction of `v`.
///
/// A zero-length vector normalizes to the zero vector; consumers that need a
/// direction must special-case coincident points themselves.
#[must_use]
pub fn normalize(v: Point) -> Point {
    let len = v.x.hypot(v.y);
    if len == 0.0 {
        Point::default()
    } else {
        Point::new(v.x / len, v.y / len)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (non-negative).
    pub width: f64,
    /// Height (non-negative).
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanning two arbitrary corner points.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a point lies inside this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether two rectangles overlap (touching edges count as overlapping).
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    /// Whether two rectangles are fully separated along some axis when both
    /// are conceptually expanded by `gap` on all sides. Touching within the
    /// gap counts as overlap.
    #[must_use]
    pub fn overlaps_with_gap(&self, other: &Rect, gap: f64) -> bool {
        !(self.x > other.right() + gap
            || self.right() < other.x - gap
            || self.y > other.bottom() + gap
            || self.bottom() < other.y - gap)
    }
}

/// Point on the boundary of a circle inscribed in `bounds`, in the direction
/// of `towards`. Radius is `min(width, height) / 2`; if `towards` coincides
/// with the center, the center itself is returned.
#[must_use]
pub fn circle_border_point(bounds: Rect, towards: Point) -> Point {
    let center = bounds.center();
    let radius = bounds.width.min(bounds.height) / 2.0;
    let dir = vector_between(center, towards);
    let dist = dir.x.hypot(dir.y);
    if dist == 0.0 {
        return center;
    }
    Point::new(
        center.x + (dir.x / dist) * radius,
        center.y + (dir.y / dist) * radius,
    )
}

/// Point on the perimeter of `bounds` facing `towards`.
///
/// The edge is picked by comparing `|dx| / half_width` against
/// `|dy| / half_height`: the dominant ratio selects the left/right or
/// top/bottom edge. This is a cheap approximation of the true ray-rectangle
/// intersection; it always lands exactly on the boundary but is not
/// geometrically exact for extreme aspect ratios. Coincident centers return
/// the center point.
#[must_use]
pub fn rect_border_point(bounds: Rect, towards: Point) -> Point {
    let center = bounds.center();
    let dx = towards.x - center.x;
    let dy = towards.y - center.y;
    let half_w = bounds.width / 2.0;
    let half_h = bounds.height / 2.0;
    let abs_x = dx.abs();
    let abs_y = dy.abs();

    if abs_x == 0.0 && abs_y == 0.0 {
        return center;
    }

    if abs_x / half_w > abs_y / half_h {
        // Left or right edge.
        Point::new(
            center.x + if dx > 0.0 { half_w } else { -half_w },
            center.y + (dy / abs_x) * half_w,
        )
    } else {
        // Top or bottom edge.
        Point::new(
            center.x + (dx / abs_y) * half_h,
            center.y + if dy > 0.0 { half_h } else { -half_h },
        )
    }
}

/// Whether segment `a1`-`a2` intersects segment `b1`-`b2`.
///
/// Parametric test: solves for `t, u` and requires both in `[0, 1]`.
/// Parallel segments (cross product below the epsilon guard) never intersect.
fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let denom = (a2.x - a1.x) * (b2.y - b1.y) - (a2.y - a1.y) * (b2.x - b1.x);
    if denom.abs() < PARALLEL_EPSILON {
        return false;
    }

    let t = ((b1.x - a1.x) * (b2.y - b1.y) - (b1.y - a1.y) * (b2.x - b1.x)) / denom;
    let u = ((b1.x - a1.x) * (a2.y - a1.y) - (b1.y - a1.y) * (a2.x - a1.x)) / denom;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Whether the segment `p1`-`p2` touches `rect`: true if either endpoint is
/// inside the rectangle or the segment crosses any of its four edges.
#[must_use]
pub fn segment_intersects_rect(p1: Point, p2: Point, rect: Rect) -> bool {
    if rect.contains(p1) || rect.contains(p2) {
        return true;
    }

    let tl = Point::new(rect.x, rect.y);
    let tr = Point::new(rect.right(), rect.y);
    let br = Point::new(rect.right(), rect.bottom());
    let bl = Point::new(rect.x, rect.bottom());

    segments_intersect(p1, p2, tl, tr)
        || segments_intersect(p1, p2, tr, br)
        || segments_intersect(p1, p2, br, bl)
        || segments_intersect(p1, p2, bl, tl)
}

/// Shortest distance from `p` to the segment `a`-`b`.
///
/// Used for single-point hit-testing against connectors; a degenerate
/// segment (coincident endpoints) reduces to point distance.
#[must_use]
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = vector_between(a, b);
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    distance(p, Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_vector() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-12);
        assert_eq!(vector_between(a, b), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize(Point::default()), Point::default());
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r1 = Rect::from_corners(Point::new(10.0, 20.0), Point::new(-5.0, 5.0));
        let r2 = Rect::from_corners(Point::new(-5.0, 5.0), Point::new(10.0, 20.0));
        assert_eq!(r1, r2);
        assert!((r1.x - -5.0).abs() < f64::EPSILON);
        assert!((r1.width - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_border_point_lies_on_circumference() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let p = circle_border_point(bounds, Point::new(200.0, 50.0));
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_border_point_degenerate_center() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let center = bounds.center();
        assert_eq!(circle_border_point(bounds, center), center);
    }

    #[test]
    fn test_rect_border_point_picks_dominant_edge() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        // Target directly right: must land on the right edge.
        let right = rect_border_point(bounds, Point::new(300.0, 25.0));
        assert!((right.x - 100.0).abs() < 1e-9);
        assert!((right.y - 25.0).abs() < 1e-9);
        // Target directly below: must land on the bottom edge.
        let below = rect_border_point(bounds, Point::new(50.0, 300.0));
        assert!((below.x - 50.0).abs() < 1e-9);
        assert!((below.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_endpoint_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(segment_intersects_rect(
            Point::new(5.0, 5.0),
            Point::new(50.0, 50.0),
            rect
        ));
    }

    #[test]
    fn test_segment_crossing_rect() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        // Passes straight through without either endpoint inside.
        assert!(segment_intersects_rect(
            Point::new(0.0, 15.0),
            Point::new(30.0, 15.0),
            rect
        ));
    }

    #[test]
    fn test_segment_missing_rect() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!segment_intersects_rect(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            rect
        ));
    }

    #[test]
    fn test_parallel_segment_along_edge() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        // Parallel to the top edge, above the rect: parallel guard, no hit.
        assert!(!segment_intersects_rect(
            Point::new(0.0, 5.0),
            Point::new(40.0, 5.0),
            rect
        ));
    }

    #[test]
    fn test_overlaps_with_gap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let near = Rect::new(120.0, 0.0, 50.0, 50.0);
        let far = Rect::new(200.0, 0.0, 50.0, 50.0);
        assert!(a.overlaps_with_gap(&near, 30.0));
        assert!(!a.overlaps_with_gap(&far, 30.0));
    }

    #[test]
    fn test_point_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_segment_distance(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        // Beyond the endpoint clamps to the endpoint.
        assert!((point_segment_distance(Point::new(14.0, 3.0), a, b) - 5.0).abs() < 1e-12);
        // Degenerate segment.
        assert!((point_segment_distance(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-12);
    }
}
