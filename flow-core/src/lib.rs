//! # FlowZone Core
//!
//! Canvas geometry and interaction engine for the FlowZone diagramming
//! canvas. Owns the element model, the pointer-driven gesture state machine,
//! selection and hit-testing, and the automatic placement search used to
//! position assistant-created elements without overlap.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  flow-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Element Store   │  Interaction Engine      │
//! │  - Shapes        │  - Gesture state machine │
//! │  - Connectors    │  - Pan / zoom viewport   │
//! │  - z-order       │  - Selection             │
//! ├─────────────────────────────────────────────┤
//! │  Geometry Kernel │  Placement Engine        │
//! │  - Border points │  - Anchor candidates     │
//! │  - Hit-testing   │  - Radial / grid / rand  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rendering, styling, and natural-language parsing live outside this crate;
//! callers drive the [`interact::Editor`] with events and read its state back
//! for drawing.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod connect;
pub mod element;
pub mod error;
pub mod geometry;
pub mod interact;
pub mod placement;
pub mod schema;
pub mod select;
pub mod store;
pub mod viewport;

pub use connect::{already_connected, connect, refresh_connections};
pub use element::{Connector, ConnectorKind, Element, ElementId, Shape, ShapeKind, Style};
pub use error::{CanvasError, CanvasResult};
pub use geometry::{Point, Rect};
pub use interact::{ConnectorEnd, Editor, Gesture, KeyCommand, PointerButton, ResizeHandle, Tool};
pub use schema::{CanvasSnapshot, ElementSummary};
pub use select::{element_at, elements_in_box};
pub use store::ElementStore;
pub use viewport::Viewport;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
