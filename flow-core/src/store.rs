//! The element store: the single source of truth for diagram elements.
//!
//! Owns every [`Element`] plus the monotonic z-order counter. All mutation
//! happens synchronously on the caller's thread; the interaction engine,
//! the placement engine, and external automation callers all read and write
//! through this one collection.

use std::collections::HashMap;

use crate::element::{Element, ElementId};
use crate::error::{CanvasError, CanvasResult};
use crate::schema::CanvasSnapshot;

/// The authoritative mutable collection of diagram elements.
///
/// Elements are iterated in creation order. Every element in the store has a
/// unique id and a z-index of at least 1; z-indices are assigned at creation
/// from a process-lifetime counter that is never decremented or reused.
#[derive(Debug, Clone)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
    /// Creation order, used for stable iteration.
    order: Vec<ElementId>,
    /// Next z-index to hand out; starts at 1.
    next_z: u64,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            order: Vec::new(),
            next_z: 1,
        }
    }

    /// Insert an element, assigning it the next z-index. Returns its id.
    pub fn create(&mut self, mut element: Element) -> ElementId {
        element.set_z_index(self.next_z);
        self.next_z += 1;
        let id = element.id();
        self.order.push(id);
        self.elements.insert(id, element);
        id
    }

    /// Apply a mutation to the element with the given id.
    ///
    /// A missing id is a silent no-op (logged for diagnostics), never an
    /// error: stale references from in-flight gestures must not abort the
    /// interaction.
    pub fn update<F>(&mut self, id: ElementId, f: F)
    where
        F: FnOnce(&mut Element),
    {
        match self.elements.get_mut(&id) {
            Some(element) => f(element),
            None => tracing::debug!("update ignored, element not found: {id}"),
        }
    }

    /// Remove an element.
    ///
    /// Connectors referencing the removed element are left untouched; their
    /// endpoints stay frozen at the last computed position.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] if the id is absent.
    pub fn remove(&mut self, id: ElementId) -> CanvasResult<Element> {
        self.order.retain(|&eid| eid != id);
        self.elements
            .remove(&id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))
    }

    /// Remove several elements at once, skipping ids that are absent.
    /// Returns how many were actually removed.
    pub fn remove_many(&mut self, ids: &[ElementId]) -> usize {
        let mut removed = 0;
        for &id in ids {
            if self.elements.remove(&id).is_some() {
                removed += 1;
            }
        }
        self.order.retain(|eid| self.elements.contains_key(eid));
        removed
    }

    /// Get an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Get a mutable reference to an element by id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// All elements in creation order.
    pub fn all(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// All shape elements in creation order.
    pub fn shapes(&self) -> impl Iterator<Item = &crate::element::Shape> {
        self.all().filter_map(Element::as_shape)
    }

    /// All connector elements in creation order.
    pub fn connectors(&self) -> impl Iterator<Item = &crate::element::Connector> {
        self.all().filter_map(Element::as_connector)
    }

    /// Number of elements in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Read-only snapshot of all elements for external callers.
    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot::from_elements(self.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Connector, ConnectorKind, Shape, ShapeKind};
    use crate::geometry::Point;

    fn shape_at(x: f64, y: f64) -> Element {
        Shape::new(ShapeKind::Box, Point::new(x, y), 100.0, 50.0).into()
    }

    #[test]
    fn test_create_assigns_monotonic_z_from_one() {
        let mut store = ElementStore::new();
        let a = store.create(shape_at(0.0, 0.0));
        let b = store.create(shape_at(200.0, 0.0));
        assert_eq!(store.get(a).expect("a").z_index(), 1);
        assert_eq!(store.get(b).expect("b").z_index(), 2);
    }

    #[test]
    fn test_z_index_never_reused_after_removal() {
        let mut store = ElementStore::new();
        let a = store.create(shape_at(0.0, 0.0));
        store.remove(a).expect("remove");
        let b = store.create(shape_at(0.0, 0.0));
        assert_eq!(store.get(b).expect("b").z_index(), 2);
    }

    #[test]
    fn test_update_missing_id_is_silent_noop() {
        let mut store = ElementStore::new();
        store.update(ElementId::new(), |el| el.translate(10.0, 10.0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_mutates_in_place() {
        let mut store = ElementStore::new();
        let id = store.create(shape_at(0.0, 0.0));
        store.update(id, |el| el.translate(5.0, 6.0));
        assert_eq!(store.get(id).expect("el").position(), Point::new(5.0, 6.0));
    }

    #[test]
    fn test_remove_missing_id_errors() {
        let mut store = ElementStore::new();
        assert!(matches!(
            store.remove(ElementId::new()),
            Err(CanvasError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_remove_many_skips_missing() {
        let mut store = ElementStore::new();
        let a = store.create(shape_at(0.0, 0.0));
        let b = store.create(shape_at(0.0, 100.0));
        let removed = store.remove_many(&[a, ElementId::new(), b]);
        assert_eq!(removed, 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_iteration_in_creation_order() {
        let mut store = ElementStore::new();
        let a = store.create(shape_at(0.0, 0.0));
        let b = store.create(
            Connector::new(ConnectorKind::Arrow, Point::new(0.0, 0.0), Point::new(1.0, 1.0))
                .into(),
        );
        let c = store.create(shape_at(0.0, 200.0));
        let ids: Vec<_> = store.all().map(Element::id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(store.shapes().count(), 2);
        assert_eq!(store.connectors().count(), 1);
    }
}
