//! Read-only snapshot types for external callers.
//!
//! Automation callers (the assistant layer) obtain element ids through this
//! snapshot and feed them back into `create_element`/`connect`. The snapshot
//! is a flat value: mutating it has no effect on the store.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::error::CanvasResult;
use crate::geometry::Point;

/// A flattened, read-only view of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSummary {
    /// Element id, usable with `connect` and `update`.
    pub id: ElementId,
    /// Variant tag: `box`, `circle`, `arrow`, or `line`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Text label (empty for connectors).
    pub text: String,
    /// Top-left corner for shapes, start point for connectors.
    pub position: Point,
    /// Shape width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Shape height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Connector end point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_position: Option<Point>,
}

impl From<&Element> for ElementSummary {
    fn from(element: &Element) -> Self {
        match element {
            Element::Shape(s) => Self {
                id: s.id,
                kind: match s.kind {
                    crate::element::ShapeKind::Box => "box".to_string(),
                    crate::element::ShapeKind::Circle => "circle".to_string(),
                },
                text: s.text.clone(),
                position: s.position,
                width: Some(s.width),
                height: Some(s.height),
                end_position: None,
            },
            Element::Connector(c) => Self {
                id: c.id,
                kind: match c.kind {
                    crate::element::ConnectorKind::Arrow => "arrow".to_string(),
                    crate::element::ConnectorKind::Line => "line".to_string(),
                },
                text: String::new(),
                position: c.position,
                width: None,
                height: None,
                end_position: Some(c.end_position),
            },
        }
    }
}

/// A snapshot of every element in the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    /// Element summaries in creation order.
    pub elements: Vec<ElementSummary>,
}

impl CanvasSnapshot {
    /// Build a snapshot from an element iterator.
    #[must_use]
    pub fn from_elements<'a>(elements: impl Iterator<Item = &'a Element>) -> Self {
        Self {
            elements: elements.map(ElementSummary::from).collect(),
        }
    }

    /// Serialize the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Connector, ConnectorKind, Shape, ShapeKind};
    use crate::store::ElementStore;

    #[test]
    fn test_snapshot_flattens_both_variants() {
        let mut store = ElementStore::new();
        store.create(
            Shape::new(ShapeKind::Circle, Point::new(10.0, 10.0), 80.0, 80.0)
                .with_text("start")
                .into(),
        );
        store.create(
            Connector::new(ConnectorKind::Arrow, Point::new(0.0, 0.0), Point::new(5.0, 5.0))
                .into(),
        );

        let snap = store.snapshot();
        assert_eq!(snap.elements.len(), 2);
        assert_eq!(snap.elements[0].kind, "circle");
        assert_eq!(snap.elements[0].text, "start");
        assert_eq!(snap.elements[0].width, Some(80.0));
        assert!(snap.elements[0].end_position.is_none());
        assert_eq!(snap.elements[1].kind, "arrow");
        assert_eq!(snap.elements[1].end_position, Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_snapshot_json_omits_absent_fields() {
        let mut store = ElementStore::new();
        store.create(Shape::new(ShapeKind::Box, Point::new(0.0, 0.0), 10.0, 10.0).into());
        let json = store.snapshot().to_json().expect("json");
        assert!(json.contains("\"type\":\"box\""));
        assert!(!json.contains("end_position"));
    }
}
