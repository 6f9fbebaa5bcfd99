//! Connecting shapes with border-anchored connectors.
//!
//! Connections are weak: a connector stores the two shape ids and the last
//! computed border points. Deleting a referenced shape leaves the endpoint
//! frozen where it was; moving or resizing one re-anchors via
//! [`refresh_connections`].

use crate::element::{Connector, ConnectorKind, Element, ElementId};
use crate::geometry::Point;
use crate::store::ElementStore;

/// Whether a connector already links the unordered pair `{a, b}`.
#[must_use]
pub fn already_connected(store: &ElementStore, a: ElementId, b: ElementId) -> bool {
    store.connectors().any(|c| {
        (c.start_connection == Some(a) && c.end_connection == Some(b))
            || (c.start_connection == Some(b) && c.end_connection == Some(a))
    })
}

/// Create an arrow connector between two shapes, anchored to their borders.
///
/// Returns the new connector's id, or `None` (logged, never an error) when:
/// either id does not resolve, either element is not a shape, the two ids are
/// equal, or the pair is already connected in either direction. Callers
/// should treat `None` as a successful no-op.
pub fn connect(store: &mut ElementStore, start: ElementId, end: ElementId) -> Option<ElementId> {
    if start == end {
        tracing::debug!("connect skipped, cannot connect {start} to itself");
        return None;
    }
    if already_connected(store, start, end) {
        tracing::debug!("connect skipped, {start} and {end} are already connected");
        return None;
    }

    let (start_point, end_point) = match (
        store.get(start).and_then(Element::as_shape),
        store.get(end).and_then(Element::as_shape),
    ) {
        (Some(from), Some(to)) => (
            from.border_point(to.center()),
            to.border_point(from.center()),
        ),
        _ => {
            tracing::debug!("connect skipped, {start} or {end} missing or not a shape");
            return None;
        }
    };

    let mut connector = Connector::new(ConnectorKind::Arrow, start_point, end_point);
    connector.start_connection = Some(start);
    connector.end_connection = Some(end);
    Some(store.create(connector.into()))
}

/// Re-anchor every connector attached to `moved` after it changed position
/// or size.
///
/// Both endpoints of an affected connector are recomputed from the live
/// shapes; an endpoint whose shape no longer exists stays frozen.
pub fn refresh_connections(store: &mut ElementStore, moved: ElementId) {
    // Compute replacement endpoints first, then apply: the recomputation
    // borrows shapes from the store the updates mutate.
    let updates: Vec<(ElementId, Option<Point>, Option<Point>)> = store
        .connectors()
        .filter(|c| c.start_connection == Some(moved) || c.end_connection == Some(moved))
        .map(|c| {
            let start_shape = c
                .start_connection
                .and_then(|id| store.get(id))
                .and_then(Element::as_shape);
            let end_shape = c
                .end_connection
                .and_then(|id| store.get(id))
                .and_then(Element::as_shape);

            let start_target = end_shape.map_or(c.end_position, crate::element::Shape::center);
            let end_target = start_shape.map_or(c.position, crate::element::Shape::center);

            (
                c.id,
                start_shape.map(|s| s.border_point(start_target)),
                end_shape.map(|s| s.border_point(end_target)),
            )
        })
        .collect();

    for (id, new_start, new_end) in updates {
        store.update(id, |el| {
            if let Element::Connector(c) = el {
                if let Some(p) = new_start {
                    c.position = p;
                }
                if let Some(p) = new_end {
                    c.end_position = p;
                }
            }
        });
    }
}
