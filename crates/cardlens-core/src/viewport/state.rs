use crate::config::ZoomConfig;
use crate::geometry::{Point, Size};

/// Camera over the comparison viewport: a zoom factor about the view center
/// plus a pan offset in screen pixels.
///
/// Maps an unzoomed view-local point `l` to screen as
/// `center + pan + zoom * (l - center)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ZERO,
        }
    }
}

impl ViewportState {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.zoom == 1.0 && self.pan.is_zero()
    }

    /// Dragging pans only once there is something to pan to.
    pub fn allows_pan(&self) -> bool {
        self.zoom > 1.0 || !self.pan.is_zero()
    }

    pub fn zoom_in(&mut self, config: &ZoomConfig) {
        self.zoom = config.clamp(self.zoom * config.step);
    }

    pub fn zoom_out(&mut self, config: &ZoomConfig) {
        self.zoom = config.clamp(self.zoom / config.step);
    }

    pub fn set_zoom(&mut self, zoom: f64, config: &ZoomConfig) {
        self.zoom = config.clamp(zoom);
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    /// View-local (unzoomed) position to screen position.
    pub fn to_screen(&self, local: Point, view: Size) -> Point {
        let center = view.center();
        center + self.pan + (local - center) * self.zoom
    }

    /// Screen position back to view-local position. `None` when the zoom
    /// cannot be inverted.
    pub fn to_local(&self, screen: Point, view: Size) -> Option<Point> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return None;
        }
        let center = view.center();
        Some(center + (screen - center - self.pan) / self.zoom)
    }
}
