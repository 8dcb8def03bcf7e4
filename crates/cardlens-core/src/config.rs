use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    CLICK_MOVE_THRESHOLD, DEFAULT_MISMATCH_THRESHOLD, DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH,
    MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
use crate::geometry::Size;

/// Top-level settings for a comparison session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub diff: DiffConfig,
}

impl ViewerConfig {
    /// Replace unusable values, such as inverted zoom limits, with their
    /// defaults.
    pub fn sanitized(mut self) -> Self {
        let view = ViewConfig::default();
        if !self.view.width.is_finite() || self.view.width < 0.0 {
            warn!(width = self.view.width, "invalid view width, using default");
            self.view.width = view.width;
        }
        if !self.view.height.is_finite() || self.view.height < 0.0 {
            warn!(height = self.view.height, "invalid view height, using default");
            self.view.height = view.height;
        }
        if !valid_pixel_ratio(self.view.device_pixel_ratio) {
            warn!(
                dpr = self.view.device_pixel_ratio,
                "invalid device pixel ratio, using default"
            );
            self.view.device_pixel_ratio = view.device_pixel_ratio;
        }

        if !self.zoom.has_valid_limits() {
            warn!(min = self.zoom.min, max = self.zoom.max, "invalid zoom limits, using defaults");
            self.zoom.min = MIN_ZOOM;
            self.zoom.max = MAX_ZOOM;
        }
        if !self.zoom.step.is_finite() || self.zoom.step <= 1.0 {
            warn!(step = self.zoom.step, "invalid zoom step, using default");
            self.zoom.step = ZOOM_STEP;
        }

        let threshold = self.interaction.click_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            warn!(threshold, "invalid click threshold, using default");
            self.interaction.click_threshold = CLICK_MOVE_THRESHOLD;
        }

        let mismatch = self.diff.mismatch_threshold;
        if !mismatch.is_finite() || !(0.0..=1.0).contains(&mismatch) {
            warn!(mismatch, "invalid mismatch threshold, using default");
            self.diff.mismatch_threshold = DEFAULT_MISMATCH_THRESHOLD;
        }
        self
    }
}

/// Finite and positive. Callers fall back to 1 otherwise.
pub fn valid_pixel_ratio(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}

/// Comparison viewport geometry, in CSS pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f64,
    pub height: f64,
    /// Device pixels per CSS pixel, used to size raster output.
    pub device_pixel_ratio: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEW_WIDTH,
            height: DEFAULT_VIEW_HEIGHT,
            device_pixel_ratio: 1.0,
        }
    }
}

impl ViewConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Multiplier applied per zoom-in step (and divisor per zoom-out step).
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step: ZOOM_STEP,
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        }
    }
}

impl ZoomConfig {
    /// Positive, finite and ordered.
    pub fn has_valid_limits(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }

    /// `[min, max]`, or the default range when the configured one is unusable.
    pub fn limits(&self) -> (f64, f64) {
        if self.has_valid_limits() {
            (self.min, self.max)
        } else {
            (MIN_ZOOM, MAX_ZOOM)
        }
    }

    /// Clamp `zoom` into the zoom limits. A non-finite or non-positive zoom
    /// resets to 1.
    pub fn clamp(&self, zoom: f64) -> f64 {
        if !zoom.is_finite() || zoom <= 0.0 {
            return 1.0;
        }
        let (min, max) = self.limits();
        zoom.clamp(min, max)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Per-axis pointer travel, in screen pixels, that turns a press in
    /// point-selection mode into a pan.
    pub click_threshold: f64,
    /// Keep scale X and scale Y equal when either slider moves.
    pub lock_scale: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            click_threshold: CLICK_MOVE_THRESHOLD,
            lock_scale: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Per-channel difference (0..1) above which a covered pixel counts as a
    /// mismatch in [`crate::diff::DiffStats`].
    pub mismatch_threshold: f32,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            mismatch_threshold: DEFAULT_MISMATCH_THRESHOLD,
        }
    }
}
