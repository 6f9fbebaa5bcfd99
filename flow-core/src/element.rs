//! Diagram elements: shapes and the connectors that join them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{self, Point, Rect};

/// Minimum shape dimension enforced while drawing and resizing.
pub const MIN_SHAPE_SIZE: f64 = 20.0;

/// Default connector stroke width.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The geometry of a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Rectangle with rounded corners (rendering detail).
    Box,
    /// Ellipse inscribed in the bounding box.
    Circle,
}

/// The rendering of a connector element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// Line with an arrowhead at the end point.
    Arrow,
    /// Plain line.
    Line,
}

/// Per-element color data. The core stores but never interprets these;
/// pixel presentation belongs to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Fill color as hex.
    pub fill: String,
    /// Border/stroke color as hex.
    pub border: String,
    /// Text color as hex.
    pub text: String,
    /// Whether the fill is transparent.
    pub transparent_fill: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: "#ffffff".to_string(),
            border: "#000000".to_string(),
            text: "#000000".to_string(),
            transparent_fill: false,
        }
    }
}

impl Style {
    /// Fully transparent style used by text-tool shapes: no visible fill or
    /// border, only the text color remains.
    #[must_use]
    pub fn transparent(text_color: &str) -> Self {
        Self {
            fill: "transparent".to_string(),
            border: "transparent".to_string(),
            text: text_color.to_string(),
            transparent_fill: true,
        }
    }
}

/// A box or circle with a text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier.
    pub id: ElementId,
    /// Box or circle.
    pub kind: ShapeKind,
    /// Top-left corner in canvas space.
    pub position: Point,
    /// Width, at least [`MIN_SHAPE_SIZE`] when drawn interactively.
    pub width: f64,
    /// Height, at least [`MIN_SHAPE_SIZE`] when drawn interactively.
    pub height: f64,
    /// Text label.
    pub text: String,
    /// Color data.
    pub style: Style,
    /// Paint/selection-priority order, assigned by the store.
    pub z_index: u64,
}

impl Shape {
    /// Create a shape with a fresh id. The z-index is assigned on insertion
    /// into the store.
    #[must_use]
    pub fn new(kind: ShapeKind, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            position,
            width,
            height,
            text: String::new(),
            style: Style::default(),
            z_index: 0,
        }
    }

    /// Set the text label.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Whether a canvas-space point lies within this shape's bounding box.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Point on this shape's border facing `towards`: the circumference for
    /// circles, the ratio-picked perimeter edge for boxes.
    #[must_use]
    pub fn border_point(&self, towards: Point) -> Point {
        match self.kind {
            ShapeKind::Circle => geometry::circle_border_point(self.bounds(), towards),
            ShapeKind::Box => geometry::rect_border_point(self.bounds(), towards),
        }
    }
}

/// An arrow or line, optionally anchored to two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Unique identifier.
    pub id: ElementId,
    /// Arrow or plain line.
    pub kind: ConnectorKind,
    /// Start point in canvas space.
    pub position: Point,
    /// End point in canvas space.
    pub end_position: Point,
    /// Stroke width.
    pub stroke_width: f64,
    /// Color data.
    pub style: Style,
    /// Paint/selection-priority order, assigned by the store.
    pub z_index: u64,
    /// Shape this connector starts from, looked up by id. A weak reference:
    /// deleting the shape leaves the endpoint frozen where it was.
    pub start_connection: Option<ElementId>,
    /// Shape this connector ends at. Same weak-reference semantics.
    pub end_connection: Option<ElementId>,
}

impl Connector {
    /// Create a connector with a fresh id and default stroke width.
    #[must_use]
    pub fn new(kind: ConnectorKind, start: Point, end: Point) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            position: start,
            end_position: end,
            stroke_width: DEFAULT_STROKE_WIDTH,
            style: Style::default(),
            z_index: 0,
            start_connection: None,
            end_connection: None,
        }
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// A diagram element: either a shape or a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Element {
    /// A box or circle.
    Shape(Shape),
    /// An arrow or line.
    Connector(Connector),
}

impl Element {
    /// The element's unique id.
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Shape(s) => s.id,
            Self::Connector(c) => c.id,
        }
    }

    /// The element's z-index.
    #[must_use]
    pub fn z_index(&self) -> u64 {
        match self {
            Self::Shape(s) => s.z_index,
            Self::Connector(c) => c.z_index,
        }
    }

    /// Overwrite the z-index (store-internal, used at insertion).
    pub(crate) fn set_z_index(&mut self, z: u64) {
        match self {
            Self::Shape(s) => s.z_index = z,
            Self::Connector(c) => c.z_index = z,
        }
    }

    /// Give the element a fresh id (used when duplicating).
    pub(crate) fn reassign_id(&mut self) -> ElementId {
        let id = ElementId::new();
        match self {
            Self::Shape(s) => s.id = id,
            Self::Connector(c) => c.id = id,
        }
        id
    }

    /// The element's anchor position: top-left for shapes, start point for
    /// connectors.
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Shape(s) => s.position,
            Self::Connector(c) => c.position,
        }
    }

    /// Shift the element by `(dx, dy)`. Connectors move both endpoints.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Shape(s) => s.position = s.position.offset(dx, dy),
            Self::Connector(c) => {
                c.position = c.position.offset(dx, dy);
                c.end_position = c.end_position.offset(dx, dy);
            }
        }
    }

    /// Whether this element is a shape.
    #[must_use]
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Borrow as a shape, if it is one.
    #[must_use]
    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Self::Shape(s) => Some(s),
            Self::Connector(_) => None,
        }
    }

    /// Mutably borrow as a shape, if it is one.
    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match self {
            Self::Shape(s) => Some(s),
            Self::Connector(_) => None,
        }
    }

    /// Borrow as a connector, if it is one.
    #[must_use]
    pub fn as_connector(&self) -> Option<&Connector> {
        match self {
            Self::Shape(_) => None,
            Self::Connector(c) => Some(c),
        }
    }

    /// Mutably borrow as a connector, if it is one.
    pub fn as_connector_mut(&mut self) -> Option<&mut Connector> {
        match self {
            Self::Shape(_) => None,
            Self::Connector(c) => Some(c),
        }
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Self::Shape(shape)
    }
}

impl From<Connector> for Element {
    fn from(connector: Connector) -> Self {
        Self::Connector(connector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ElementId::new(), ElementId::new());
    }

    #[test]
    fn test_shape_bounds_and_center() {
        let shape = Shape::new(ShapeKind::Box, Point::new(10.0, 20.0), 100.0, 40.0);
        assert_eq!(shape.bounds(), Rect::new(10.0, 20.0, 100.0, 40.0));
        assert_eq!(shape.center(), Point::new(60.0, 40.0));
        assert!(shape.contains(Point::new(60.0, 40.0)));
        assert!(!shape.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_translate_moves_both_connector_endpoints() {
        let mut el: Element =
            Connector::new(ConnectorKind::Line, Point::new(0.0, 0.0), Point::new(10.0, 0.0)).into();
        el.translate(5.0, 7.0);
        let c = el.as_connector().expect("connector");
        assert_eq!(c.position, Point::new(5.0, 7.0));
        assert_eq!(c.end_position, Point::new(15.0, 7.0));
    }

    #[test]
    fn test_circle_border_point_dispatch() {
        let circle = Shape::new(ShapeKind::Circle, Point::new(0.0, 0.0), 100.0, 100.0);
        let p = circle.border_point(Point::new(200.0, 50.0));
        assert!((p.x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_element_serde_round_trip() {
        let el: Element = Shape::new(ShapeKind::Box, Point::new(1.0, 2.0), 30.0, 40.0)
            .with_text("hello")
            .into();
        let json = serde_json::to_string(&el).expect("serialize");
        let back: Element = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(el, back);
    }
}
