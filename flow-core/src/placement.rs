//! Automatic placement for newly created elements.
//!
//! Given the current store and an optional anchor set (the selected
//! elements), [`find_position`] returns a spot for a new default-size element
//! that does not overlap any existing shape within a gap margin. The search
//! runs four tiers in order (anchor-relative candidates, radial sweep, grid,
//! random sampling) and finally degrades to a jittered fixed point, so it can
//! never fail to return a position.

use rand::Rng;

use crate::element::{Element, ElementId};
use crate::geometry::{Point, Rect};
use crate::store::ElementStore;

/// Default width of an auto-placed element.
pub const ELEMENT_WIDTH: f64 = 200.0;
/// Default height of an auto-placed element.
pub const ELEMENT_HEIGHT: f64 = 60.0;
/// Required clearance between the new element and existing shapes.
pub const MIN_GAP: f64 = 30.0;

/// Elements never auto-place closer than this to the canvas origin.
const CANVAS_MARGIN: f64 = 20.0;
/// Radial sweep stops at this distance from the anchor center.
const MAX_RADIUS: f64 = 300.0;
/// Radial sweep step.
const RADIUS_STEP: f64 = 40.0;
/// Grid/random tiers work within this fixed canvas area.
const CANVAS_WIDTH: f64 = 1200.0;
/// See [`CANVAS_WIDTH`].
const CANVAS_HEIGHT: f64 = 800.0;
/// How many uniform-random samples the fourth tier tries.
const RANDOM_ATTEMPTS: u32 = 50;

/// Find a position for a new `ELEMENT_WIDTH` x `ELEMENT_HEIGHT` element.
///
/// `anchors` biases the search: when non-empty, candidates around the
/// anchors' combined bounding box are tried first, then a radial sweep
/// around its center. Connectors among the anchors contribute their start
/// point; unknown anchor ids are ignored. Connectors never count as
/// obstacles for the overlap test.
///
/// Best-effort only: if every tier is exhausted the returned point may
/// overlap, but a point is always returned.
#[must_use]
pub fn find_position(store: &ElementStore, anchors: &[ElementId]) -> Point {
    let obstacles: Vec<Rect> = store.shapes().map(crate::element::Shape::bounds).collect();

    if let Some(bounds) = anchor_bounds(store, anchors) {
        if let Some(p) = anchored_candidates(bounds, &obstacles) {
            return p;
        }
        if let Some(p) = radial_sweep(bounds.center(), &obstacles) {
            return p;
        }
    }

    if let Some(p) = grid_scan(&obstacles) {
        return p;
    }
    if let Some(p) = random_scan(&obstacles) {
        return p;
    }

    // Every tier exhausted: return a jittered fixed point even if it
    // overlaps, so element creation always completes.
    let mut rng = rand::rng();
    let fallback = Point::new(
        (300.0 + rng.random_range(0.0_f64..100.0)).max(50.0),
        (200.0 + rng.random_range(0.0_f64..100.0)).max(50.0),
    );
    tracing::warn!(
        "placement search exhausted, falling back to ({:.0}, {:.0})",
        fallback.x,
        fallback.y
    );
    fallback
}

/// Combined bounding box of the anchor elements, if any resolve.
///
/// Shapes contribute their full box; connectors contribute their start point.
fn anchor_bounds(store: &ElementStore, anchors: &[ElementId]) -> Option<Rect> {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for &id in anchors {
        let Some(element) = store.get(id) else {
            continue;
        };
        let rect = match element {
            Element::Shape(s) => s.bounds(),
            Element::Connector(c) => Rect::new(c.position.x, c.position.y, 0.0, 0.0),
        };
        bounds = Some(match bounds {
            None => (rect.x, rect.y, rect.right(), rect.bottom()),
            Some((min_x, min_y, max_x, max_y)) => (
                min_x.min(rect.x),
                min_y.min(rect.y),
                max_x.max(rect.right()),
                max_y.max(rect.bottom()),
            ),
        });
    }
    bounds.map(|(min_x, min_y, max_x, max_y)| {
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    })
}

/// Tier 1: eight ranked candidates around the anchor bounding box, offset by
/// one to two gap widths: right, below, left, above, then the diagonals.
fn anchored_candidates(bounds: Rect, obstacles: &[Rect]) -> Option<Point> {
    let center = bounds.center();
    let candidates = [
        Point::new(bounds.right() + MIN_GAP * 2.0, center.y - ELEMENT_HEIGHT / 2.0),
        Point::new(center.x - ELEMENT_WIDTH / 2.0, bounds.bottom() + MIN_GAP * 2.0),
        Point::new(
            bounds.x - ELEMENT_WIDTH - MIN_GAP * 2.0,
            center.y - ELEMENT_HEIGHT / 2.0,
        ),
        Point::new(
            center.x - ELEMENT_WIDTH / 2.0,
            bounds.y - ELEMENT_HEIGHT - MIN_GAP * 2.0,
        ),
        Point::new(bounds.right() + MIN_GAP, bounds.bottom() + MIN_GAP),
        Point::new(bounds.right() + MIN_GAP, bounds.y - ELEMENT_HEIGHT - MIN_GAP),
        Point::new(bounds.x - ELEMENT_WIDTH - MIN_GAP, bounds.bottom() + MIN_GAP),
        Point::new(
            bounds.x - ELEMENT_WIDTH - MIN_GAP,
            bounds.y - ELEMENT_HEIGHT - MIN_GAP,
        ),
    ];

    candidates
        .into_iter()
        .find(|p| in_canvas(*p) && position_free(*p, obstacles))
}

/// Tier 2: sample expanding circles around the anchor center, eight angles
/// per radius.
fn radial_sweep(center: Point, obstacles: &[Rect]) -> Option<Point> {
    let mut radius = ELEMENT_HEIGHT + MIN_GAP;
    while radius <= MAX_RADIUS {
        for step in 0..8 {
            let radian = f64::from(step) * 45.0_f64.to_radians();
            let p = Point::new(
                center.x + radian.cos() * radius - ELEMENT_WIDTH / 2.0,
                center.y + radian.sin() * radius - ELEMENT_HEIGHT / 2.0,
            );
            if in_canvas(p) && position_free(p, obstacles) {
                return Some(p);
            }
        }
        radius += RADIUS_STEP;
    }
    None
}

/// Tier 3: tile the fixed canvas area from the top-left.
fn grid_scan(obstacles: &[Rect]) -> Option<Point> {
    let step_x = ELEMENT_WIDTH + MIN_GAP * 2.0;
    let step_y = ELEMENT_HEIGHT + MIN_GAP * 2.0;

    let mut y = 50.0;
    while y + step_y <= CANVAS_HEIGHT {
        let mut x = 50.0;
        while x + step_x <= CANVAS_WIDTH {
            let p = Point::new(x, y);
            if x + ELEMENT_WIDTH < CANVAS_WIDTH - 50.0
                && y + ELEMENT_HEIGHT < CANVAS_HEIGHT - 50.0
                && position_free(p, obstacles)
            {
                return Some(p);
            }
            x += step_x;
        }
        y += step_y;
    }
    None
}

/// Tier 4: uniform-random samples within the canvas area.
fn random_scan(obstacles: &[Rect]) -> Option<Point> {
    let mut rng = rand::rng();
    for _ in 0..RANDOM_ATTEMPTS {
        let p = Point::new(
            rng.random_range(0.0..1.0) * (CANVAS_WIDTH - ELEMENT_WIDTH - 100.0) + 50.0,
            rng.random_range(0.0..1.0) * (CANVAS_HEIGHT - ELEMENT_HEIGHT - 100.0) + 50.0,
        );
        if position_free(p, obstacles) {
            return Some(p);
        }
    }
    None
}

/// Whether a candidate top-left corner respects the canvas margins.
fn in_canvas(p: Point) -> bool {
    p.x >= CANVAS_MARGIN && p.y >= CANVAS_MARGIN
}

/// Whether a new default-size element at `p` keeps the gap margin to every
/// obstacle.
fn position_free(p: Point, obstacles: &[Rect]) -> bool {
    let candidate = Rect::new(p.x, p.y, ELEMENT_WIDTH, ELEMENT_HEIGHT);
    !obstacles
        .iter()
        .any(|rect| candidate.overlaps_with_gap(rect, MIN_GAP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Shape, ShapeKind};

    fn add_shape(store: &mut ElementStore, x: f64, y: f64, w: f64, h: f64) -> ElementId {
        store.create(Shape::new(ShapeKind::Box, Point::new(x, y), w, h).into())
    }

    fn overlaps_any(store: &ElementStore, p: Point) -> bool {
        let candidate = Rect::new(p.x, p.y, ELEMENT_WIDTH, ELEMENT_HEIGHT);
        store
            .shapes()
            .any(|s| candidate.overlaps_with_gap(&s.bounds(), MIN_GAP))
    }

    #[test]
    fn test_empty_canvas_uses_grid_origin() {
        let store = ElementStore::new();
        let p = find_position(&store, &[]);
        assert_eq!(p, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_anchor_prefers_right_side() {
        let mut store = ElementStore::new();
        let anchor = add_shape(&mut store, 100.0, 100.0, 200.0, 60.0);
        let p = find_position(&store, &[anchor]);
        // Right of the anchor box, vertically centered on it.
        assert!((p.x - 360.0).abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);
        assert!(!overlaps_any(&store, p));
    }

    #[test]
    fn test_blocked_right_falls_through_to_next_candidate() {
        let mut store = ElementStore::new();
        let anchor = add_shape(&mut store, 100.0, 100.0, 200.0, 60.0);
        // Occupy the preferred right-hand slot.
        add_shape(&mut store, 360.0, 60.0, 220.0, 140.0);
        let p = find_position(&store, &[anchor]);
        assert!(!overlaps_any(&store, p));
    }

    #[test]
    fn test_unknown_anchor_ids_are_ignored() {
        let mut store = ElementStore::new();
        add_shape(&mut store, 50.0, 50.0, 100.0, 50.0);
        let p = find_position(&store, &[ElementId::new()]);
        assert!(!overlaps_any(&store, p));
    }

    #[test]
    fn test_result_is_overlap_free_on_busy_canvas() {
        let mut store = ElementStore::new();
        for row in 0..3 {
            for col in 0..3 {
                add_shape(
                    &mut store,
                    50.0 + f64::from(col) * 260.0,
                    50.0 + f64::from(row) * 120.0,
                    200.0,
                    60.0,
                );
            }
        }
        let p = find_position(&store, &[]);
        assert!(!overlaps_any(&store, p));
    }

    #[test]
    fn test_exhausted_search_still_returns_a_point() {
        let mut store = ElementStore::new();
        // One obstacle covering the whole searchable area defeats every tier.
        let blocker = add_shape(&mut store, -1000.0, -1000.0, 5000.0, 5000.0);
        let p = find_position(&store, &[blocker]);
        assert!(p.x >= 50.0 && p.y >= 50.0);
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
