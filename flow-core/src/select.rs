//! Box selection and single-point hit resolution.
//!
//! Both use the same geometry the interaction engine uses for everything
//! else: shape bounding boxes and connector line segments.

use crate::element::{Element, ElementId};
use crate::geometry::{self, Point, Rect};
use crate::store::ElementStore;

/// How far (in canvas units) a point can be from a connector's segment and
/// still hit it.
const CONNECTOR_HIT_TOLERANCE: f64 = 5.0;

/// Ids of all elements touched by the selection box spanning `a` and `b`.
///
/// The box is normalized first, so the result is independent of corner
/// order. Shapes are selected when their bounding box overlaps the box at
/// all; connectors when their segment intersects it.
#[must_use]
pub fn elements_in_box(store: &ElementStore, a: Point, b: Point) -> Vec<ElementId> {
    let selection = Rect::from_corners(a, b);
    store
        .all()
        .filter(|element| match element {
            Element::Shape(s) => s.bounds().intersects(&selection),
            Element::Connector(c) => {
                geometry::segment_intersects_rect(c.position, c.end_position, selection)
            }
        })
        .map(Element::id)
        .collect()
}

/// Resolve a single canvas-space point to the topmost element under it.
///
/// Shapes hit when the point is inside their bounding box; connectors when
/// the point is within a small tolerance of their segment. Ties go to the
/// highest z-index.
#[must_use]
pub fn element_at(store: &ElementStore, p: Point) -> Option<ElementId> {
    store
        .all()
        .filter(|element| match element {
            Element::Shape(s) => s.contains(p),
            Element::Connector(c) => {
                geometry::point_segment_distance(p, c.position, c.end_position)
                    <= CONNECTOR_HIT_TOLERANCE + c.stroke_width / 2.0
            }
        })
        .max_by_key(|el| el.z_index())
        .map(Element::id)
}
