//! The pointer-driven interaction state machine.
//!
//! [`Editor`] owns the element store, the active tool, the selection, the
//! viewport, and exactly one [`Gesture`] value describing the pointer
//! interaction in flight. Event methods (`pointer_down`, `pointer_move`,
//! `pointer_up`, `wheel`, `key`) mutate that state; there is no ambient
//! global gesture state, so the machine is fully testable without a UI.
//!
//! All pointer coordinates arrive in screen space and are converted through
//! the viewport before any comparison with element-space geometry.

use crate::connect as connection;
use crate::element::{
    Connector, ConnectorKind, Element, ElementId, Shape, ShapeKind, Style, MIN_SHAPE_SIZE,
};
use crate::geometry::Point;
use crate::placement;
use crate::schema::CanvasSnapshot;
use crate::select;
use crate::store::ElementStore;
use crate::viewport::Viewport;

/// Default end-point offset for a freshly drawn connector.
const CONNECTOR_DEFAULT_LENGTH: f64 = 100.0;
/// Width of a shape created by the text tool.
const TEXT_SHAPE_WIDTH: f64 = 150.0;
/// Height of a shape created by the text tool.
const TEXT_SHAPE_HEIGHT: f64 = 40.0;
/// Placeholder label for freshly created text shapes.
const TEXT_PLACEHOLDER: &str = "Double-click to edit";
/// Position offset applied when duplicating elements.
const DUPLICATE_OFFSET: f64 = 20.0;
/// Minimum committed text-shape height.
const TEXT_MIN_HEIGHT: f64 = 40.0;
/// Height contributed by each text line on commit.
const TEXT_LINE_HEIGHT: f64 = 20.0;
/// Vertical padding added around committed text.
const TEXT_PADDING: f64 = 20.0;

/// The currently armed tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Select, box-select, and drag elements.
    Select,
    /// One-shot move: drag an element, then revert to `Select`.
    Move,
    /// Draw a box shape.
    Box,
    /// Draw a circle shape.
    Circle,
    /// Draw an arrow connector.
    Arrow,
    /// Draw a plain line connector.
    Line,
    /// Create a transparent text shape with a single click.
    Text,
}

/// Pointer buttons the state machine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left / primary button.
    Primary,
    /// Middle button (pans the canvas).
    Middle,
}

/// Which end of a connector a drag manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorEnd {
    /// The start point (`position`).
    Start,
    /// The end point (`end_position`).
    End,
}

/// One of the eight resize handles around a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Top-left corner.
    TopLeft,
    /// Top edge midpoint.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge midpoint.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge midpoint.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge midpoint.
    Left,
}

impl ResizeHandle {
    fn affects_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    fn affects_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    fn affects_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    fn affects_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }
}

/// Keyboard commands the state machine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Clear all gesture/selection state and arm the select tool.
    Escape,
    /// Delete the multi-selection, or else the active element.
    Delete,
    /// Ctrl/Cmd+C: duplicate the selection with a fixed offset.
    Duplicate,
}

/// The pointer gesture currently in flight. Exactly one at any instant.
///
/// Gesture-scoped data (drag origin, resize baseline) lives inside the
/// variant and is dropped wholesale on every exit path, including forced
/// cancellation via Escape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// No gesture in flight.
    Idle,
    /// Dragging out a selection box with the select tool.
    BoxSelecting {
        /// Anchor corner (canvas space).
        start: Point,
        /// Corner under the pointer (canvas space).
        current: Point,
    },
    /// Dragging out a new shape.
    DrawingShape {
        /// The live shape being sized.
        id: ElementId,
        /// Pointer-down point (canvas space).
        start: Point,
    },
    /// Dragging the end point of a new connector.
    DrawingConnector {
        /// The live connector.
        id: ElementId,
    },
    /// Dragging a whole element.
    DraggingElement {
        /// The element being moved.
        id: ElementId,
        /// Pointer position at the last committed move (canvas space).
        last: Point,
    },
    /// Dragging one endpoint of an existing connector.
    DraggingEndpoint {
        /// The connector being edited.
        id: ElementId,
        /// Which endpoint.
        end: ConnectorEnd,
    },
    /// Resizing a shape from one of its handles.
    Resizing {
        /// The shape being resized.
        id: ElementId,
        /// The handle grabbed.
        handle: ResizeHandle,
        /// Pointer-down point (canvas space).
        origin: Point,
        /// Shape position when the gesture started.
        start_position: Point,
        /// Shape width when the gesture started.
        start_width: f64,
        /// Shape height when the gesture started.
        start_height: f64,
    },
    /// Panning the viewport with the middle button.
    Panning {
        /// `pointer (screen) - pan` at gesture start.
        grab: Point,
    },
    /// Inline text editing on a shape. The store's text is untouched until
    /// [`Editor::commit_text`]; cancelling simply exits.
    EditingText {
        /// The shape being edited.
        id: ElementId,
    },
}

/// The interaction engine: element store, tool, selection, viewport, and the
/// gesture in flight.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    store: ElementStore,
    tool: Tool,
    /// Single active element (resize handles, inline editing).
    active: Option<ElementId>,
    /// Multi-selection from box-select (batch delete/duplicate). Mutually
    /// exclusive with `active`.
    multi: Vec<ElementId>,
    viewport: Viewport,
    gesture: Gesture,
    /// Colors applied to newly created elements.
    style: Style,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Select
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::Idle
    }
}

impl Editor {
    /// Create an editor with an empty store and the select tool armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // State accessors for the rendering layer
    // -----------------------------------------------------------------------

    /// The element store (read-only; mutate through editor operations).
    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// The currently armed tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Arm a tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// The gesture in flight.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// The viewport (pan/zoom).
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mutable viewport access for toolbar zoom controls.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The single active element, if any.
    #[must_use]
    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    /// The current selection: the multi-selection if non-empty, otherwise
    /// the active element. Used as the anchor set for auto-placement.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<ElementId> {
        if self.multi.is_empty() {
            self.active.into_iter().collect()
        } else {
            self.multi.clone()
        }
    }

    /// Current creation colors.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Set the creation colors, also restyling the active element if any.
    pub fn set_style(&mut self, style: Style) {
        self.style = style.clone();
        if let Some(id) = self.active {
            self.store.update(id, |el| match el {
                Element::Shape(s) => s.style = style.clone(),
                Element::Connector(c) => c.style = style.clone(),
            });
        }
    }

    /// Make one element the active selection (clears any multi-selection).
    pub fn set_active(&mut self, id: ElementId) {
        self.active = Some(id);
        self.multi.clear();
    }

    /// Replace the multi-selection (clears the active element).
    pub fn set_multi_selection(&mut self, ids: Vec<ElementId>) {
        self.active = None;
        self.multi = ids;
    }

    /// Clear both selection views.
    pub fn clear_selection(&mut self) {
        self.active = None;
        self.multi.clear();
    }

    // -----------------------------------------------------------------------
    // External caller contract (assistant/automation)
    // -----------------------------------------------------------------------

    /// Insert a fully-formed element; the store assigns its z-index.
    pub fn create_element(&mut self, element: Element) -> ElementId {
        self.store.create(element)
    }

    /// Connect two shapes with a border-anchored arrow styled with the
    /// current colors. `None` means the connection was skipped (missing ids,
    /// non-shapes, or duplicate pair) and should be treated as a no-op.
    pub fn connect(&mut self, start: ElementId, end: ElementId) -> Option<ElementId> {
        let id = connection::connect(&mut self.store, start, end)?;
        let style = self.style.clone();
        self.store.update(id, |el| {
            if let Element::Connector(c) = el {
                c.style = style;
            }
        });
        Some(id)
    }

    /// Auto-place a new default-size shape near the current selection.
    pub fn place_shape(&mut self, kind: ShapeKind, text: impl Into<String>) -> ElementId {
        let anchors = self.selected_ids();
        let position = placement::find_position(&self.store, &anchors);
        let shape = Shape::new(
            kind,
            position,
            placement::ELEMENT_WIDTH,
            placement::ELEMENT_HEIGHT,
        )
        .with_text(text)
        .with_style(self.style.clone());
        self.create_element(shape.into())
    }

    /// Read-only snapshot of all elements for external callers.
    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        self.store.snapshot()
    }

    // -----------------------------------------------------------------------
    // Pointer events
    // -----------------------------------------------------------------------

    /// Handle a pointer press at `screen` coordinates.
    pub fn pointer_down(&mut self, screen: Point, button: PointerButton) {
        if matches!(self.gesture, Gesture::EditingText { .. }) {
            return;
        }

        if button == PointerButton::Middle {
            self.gesture = Gesture::Panning {
                grab: Point::new(screen.x - self.viewport.pan.x, screen.y - self.viewport.pan.y),
            };
            return;
        }

        let canvas = self.viewport.to_canvas(screen);
        match self.tool {
            Tool::Select => match select::element_at(&self.store, canvas) {
                Some(id) => {
                    self.set_active(id);
                    self.gesture = Gesture::DraggingElement { id, last: canvas };
                }
                None => {
                    self.clear_selection();
                    self.gesture = Gesture::BoxSelecting {
                        start: canvas,
                        current: canvas,
                    };
                }
            },
            Tool::Move => {
                if let Some(id) = select::element_at(&self.store, canvas) {
                    self.set_active(id);
                    self.gesture = Gesture::DraggingElement { id, last: canvas };
                }
            }
            Tool::Box | Tool::Circle => {
                let kind = if self.tool == Tool::Box {
                    ShapeKind::Box
                } else {
                    ShapeKind::Circle
                };
                let shape = Shape::new(kind, canvas, MIN_SHAPE_SIZE, MIN_SHAPE_SIZE)
                    .with_style(self.style.clone());
                let id = self.store.create(shape.into());
                self.set_active(id);
                self.gesture = Gesture::DrawingShape { id, start: canvas };
            }
            Tool::Arrow | Tool::Line => {
                let kind = if self.tool == Tool::Arrow {
                    ConnectorKind::Arrow
                } else {
                    ConnectorKind::Line
                };
                let connector = Connector::new(
                    kind,
                    canvas,
                    canvas.offset(CONNECTOR_DEFAULT_LENGTH, 0.0),
                )
                .with_style(self.style.clone());
                let id = self.store.create(connector.into());
                self.set_active(id);
                self.gesture = Gesture::DrawingConnector { id };
            }
            Tool::Text => {
                let shape = Shape::new(
                    ShapeKind::Box,
                    canvas,
                    TEXT_SHAPE_WIDTH,
                    TEXT_SHAPE_HEIGHT,
                )
                .with_text(TEXT_PLACEHOLDER)
                .with_style(Style::transparent(&self.style.text));
                let id = self.store.create(shape.into());
                self.set_active(id);
                self.tool = Tool::Select;
            }
        }
    }

    /// Handle pointer motion at `screen` coordinates.
    pub fn pointer_move(&mut self, screen: Point) {
        let canvas = self.viewport.to_canvas(screen);
        match self.gesture {
            Gesture::Panning { grab } => {
                self.viewport.pan = Point::new(screen.x - grab.x, screen.y - grab.y);
            }
            Gesture::BoxSelecting { start, .. } => {
                self.gesture = Gesture::BoxSelecting {
                    start,
                    current: canvas,
                };
            }
            Gesture::DrawingShape { id, start } => {
                let width = (canvas.x - start.x).abs().max(MIN_SHAPE_SIZE);
                let height = (canvas.y - start.y).abs().max(MIN_SHAPE_SIZE);
                let position = Point::new(canvas.x.min(start.x), canvas.y.min(start.y));
                self.store.update(id, |el| {
                    if let Some(s) = el.as_shape_mut() {
                        s.position = position;
                        s.width = width;
                        s.height = height;
                    }
                });
            }
            Gesture::DrawingConnector { id } => {
                self.store.update(id, |el| {
                    if let Some(c) = el.as_connector_mut() {
                        c.end_position = canvas;
                    }
                });
            }
            Gesture::DraggingElement { id, last } => {
                let dx = canvas.x - last.x;
                let dy = canvas.y - last.y;
                self.store.update(id, |el| el.translate(dx, dy));
                if self.store.get(id).is_some_and(Element::is_shape) {
                    connection::refresh_connections(&mut self.store, id);
                }
                self.gesture = Gesture::DraggingElement { id, last: canvas };
            }
            Gesture::DraggingEndpoint { id, end } => {
                self.store.update(id, |el| {
                    if let Some(c) = el.as_connector_mut() {
                        match end {
                            ConnectorEnd::Start => c.position = canvas,
                            ConnectorEnd::End => c.end_position = canvas,
                        }
                    }
                });
            }
            Gesture::Resizing {
                id,
                handle,
                origin,
                start_position,
                start_width,
                start_height,
            } => {
                let dx = canvas.x - origin.x;
                let dy = canvas.y - origin.y;

                let mut width = start_width;
                let mut height = start_height;
                let mut position = start_position;

                if handle.affects_right() {
                    width = (start_width + dx).max(MIN_SHAPE_SIZE);
                }
                if handle.affects_left() {
                    width = (start_width - dx).max(MIN_SHAPE_SIZE);
                    position.x = start_position.x + (start_width - width);
                }
                if handle.affects_bottom() {
                    height = (start_height + dy).max(MIN_SHAPE_SIZE);
                }
                if handle.affects_top() {
                    height = (start_height - dy).max(MIN_SHAPE_SIZE);
                    position.y = start_position.y + (start_height - height);
                }

                self.store.update(id, |el| {
                    if let Some(s) = el.as_shape_mut() {
                        s.position = position;
                        s.width = width;
                        s.height = height;
                    }
                });
                connection::refresh_connections(&mut self.store, id);
            }
            Gesture::Idle | Gesture::EditingText { .. } => {}
        }
    }

    /// Handle pointer release.
    pub fn pointer_up(&mut self) {
        match self.gesture {
            Gesture::BoxSelecting { start, current } => {
                let hit = select::elements_in_box(&self.store, start, current);
                self.set_multi_selection(hit);
                self.gesture = Gesture::Idle;
            }
            Gesture::DrawingShape { .. } | Gesture::DrawingConnector { .. } => {
                // Committing a draw auto-reverts to the select tool.
                self.tool = Tool::Select;
                self.gesture = Gesture::Idle;
            }
            Gesture::DraggingElement { .. } => {
                if self.tool == Tool::Move {
                    // One-shot move semantics.
                    self.clear_selection();
                    self.tool = Tool::Select;
                }
                self.gesture = Gesture::Idle;
            }
            Gesture::Panning { .. }
            | Gesture::DraggingEndpoint { .. }
            | Gesture::Resizing { .. } => {
                self.gesture = Gesture::Idle;
            }
            Gesture::Idle | Gesture::EditingText { .. } => {}
        }
    }

    /// Handle one wheel notch, zooming around the cursor.
    pub fn wheel(&mut self, cursor_screen: Point, zoom_in: bool) {
        self.viewport.wheel_zoom(cursor_screen, zoom_in);
    }

    // -----------------------------------------------------------------------
    // Gesture entry points owned by the rendering layer
    // -----------------------------------------------------------------------

    /// Start resizing a shape from `handle`, with the pointer at `screen`.
    /// No-op unless `id` is a shape.
    pub fn begin_resize(&mut self, id: ElementId, handle: ResizeHandle, screen: Point) {
        let Some(shape) = self.store.get(id).and_then(Element::as_shape) else {
            tracing::debug!("resize ignored, {id} is not a shape");
            return;
        };
        let origin = self.viewport.to_canvas(screen);
        self.gesture = Gesture::Resizing {
            id,
            handle,
            origin,
            start_position: shape.position,
            start_width: shape.width,
            start_height: shape.height,
        };
        self.set_active(id);
    }

    /// Start dragging one endpoint of a connector. No-op unless `id` is a
    /// connector.
    pub fn begin_endpoint_drag(&mut self, id: ElementId, end: ConnectorEnd) {
        if self.store.get(id).and_then(Element::as_connector).is_none() {
            tracing::debug!("endpoint drag ignored, {id} is not a connector");
            return;
        }
        self.set_active(id);
        self.gesture = Gesture::DraggingEndpoint { id, end };
    }

    /// Enter inline text editing on a shape (double-click). Returns the
    /// current text for the edit buffer, or `None` if `id` is not a shape.
    pub fn begin_text_edit(&mut self, id: ElementId) -> Option<String> {
        let shape = self.store.get(id).and_then(Element::as_shape)?;
        let text = shape.text.clone();
        self.set_active(id);
        self.gesture = Gesture::EditingText { id };
        Some(text)
    }

    /// Commit edited text (Enter without Shift). The shape's height is
    /// recomputed from the line count; Shift+Enter newlines arrive here as
    /// literal `\n` characters in `text`.
    pub fn commit_text(&mut self, text: &str) {
        let Gesture::EditingText { id } = self.gesture else {
            return;
        };
        let lines = text.split('\n').count();
        #[allow(clippy::cast_precision_loss)]
        let height = (lines as f64 * TEXT_LINE_HEIGHT + TEXT_PADDING).max(TEXT_MIN_HEIGHT);
        self.store.update(id, |el| {
            if let Some(s) = el.as_shape_mut() {
                s.text = text.to_string();
                s.height = height;
            }
        });
        self.gesture = Gesture::Idle;
    }

    /// Abandon inline text editing (Escape in the edit box). The store was
    /// never touched, so the previous text stands.
    pub fn cancel_text_edit(&mut self) {
        if matches!(self.gesture, Gesture::EditingText { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    // -----------------------------------------------------------------------
    // Keyboard commands
    // -----------------------------------------------------------------------

    /// Dispatch a keyboard command.
    pub fn key(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Escape => self.escape(),
            KeyCommand::Delete => self.delete_selected(),
            KeyCommand::Duplicate => self.duplicate_selected(),
        }
    }

    /// Global Escape: atomically drop whatever gesture is in flight, clear
    /// the selection, and arm the select tool. Elements keep the state of
    /// their last committed move.
    pub fn escape(&mut self) {
        self.gesture = Gesture::Idle;
        self.clear_selection();
        self.tool = Tool::Select;
    }

    /// Global Delete: remove the multi-selection if present, otherwise the
    /// active element. Connectors referencing a removed shape are kept with
    /// frozen endpoints.
    pub fn delete_selected(&mut self) {
        if self.multi.is_empty() {
            if let Some(id) = self.active.take() {
                if let Err(e) = self.store.remove(id) {
                    tracing::debug!("delete ignored: {e}");
                }
            }
        } else {
            let ids = std::mem::take(&mut self.multi);
            self.store.remove_many(&ids);
        }
    }

    /// Ctrl/Cmd+C: duplicate the active element or the multi-selection with
    /// a fixed `(+20, +20)` offset. Duplicates get fresh ids and z-indices
    /// and become the new selection; items that fail to resolve are skipped
    /// without aborting the rest of the batch.
    pub fn duplicate_selected(&mut self) {
        if self.multi.is_empty() {
            if let Some(copy) = self.active.and_then(|id| self.duplicate_one(id)) {
                self.set_active(copy);
            }
        } else {
            let sources = self.multi.clone();
            let copies: Vec<ElementId> = sources
                .into_iter()
                .filter_map(|id| self.duplicate_one(id))
                .collect();
            if !copies.is_empty() {
                self.set_multi_selection(copies);
            }
        }
    }

    fn duplicate_one(&mut self, id: ElementId) -> Option<ElementId> {
        let Some(mut copy) = self.store.get(id).cloned() else {
            tracing::debug!("duplicate skipped, element not found: {id}");
            return None;
        };
        copy.reassign_id();
        copy.translate(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
        Some(self.store.create(copy))
    }
}
