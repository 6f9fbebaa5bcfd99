//! Pan/zoom camera and screen-to-canvas coordinate conversion.
//!
//! Pan is an additive offset in screen pixels applied before the zoom scale,
//! so screen-to-canvas conversion is `(screen - pan) / zoom`. Wheel zoom is
//! re-anchored so the canvas point under the cursor stays put on screen.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Minimum zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum zoom level.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom change per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 0.05;
/// Zoom change per toolbar zoom button press.
pub const BUTTON_ZOOM_STEP: f64 = 0.1;

/// The canvas camera: pan offset (screen pixels) and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Pan offset in screen pixels.
    pub pan: Point,
    /// Zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Point::default(),
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Convert a screen-space point to canvas space.
    #[must_use]
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Convert a canvas-space point to screen space.
    #[must_use]
    pub fn to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.pan.x,
            canvas.y * self.zoom + self.pan.y,
        )
    }

    /// Apply one wheel notch of zoom, anchored at the cursor: the canvas
    /// point under `cursor` (screen space) maps to the same pixel afterward.
    pub fn wheel_zoom(&mut self, cursor: Point, zoom_in: bool) {
        let delta = if zoom_in {
            WHEEL_ZOOM_STEP
        } else {
            -WHEEL_ZOOM_STEP
        };
        let new_zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let ratio = new_zoom / self.zoom;
        self.pan = Point::new(
            cursor.x - (cursor.x - self.pan.x) * ratio,
            cursor.y - (cursor.y - self.pan.y) * ratio,
        );
        self.zoom = new_zoom;
    }

    /// Zoom in one toolbar step (no cursor anchoring).
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + BUTTON_ZOOM_STEP).min(MAX_ZOOM);
    }

    /// Zoom out one toolbar step (no cursor anchoring).
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - BUTTON_ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Reset pan and zoom to the identity view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan.offset(dx, dy);
    }
}
