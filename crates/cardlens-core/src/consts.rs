/// Minimum pixel count (w*h) to rasterise surface rows in parallel with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Largest off-screen surface (device pixels, w*h) a difference render may
/// allocate. 16 MP of RGBA f32 is 256 MiB per layer.
pub const MAX_SURFACE_PIXELS: u64 = 16_777_216;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Lower bound of the per-axis alignment scale.
pub const MIN_ALIGN_SCALE: f64 = 0.5;

/// Upper bound of the per-axis alignment scale.
pub const MAX_ALIGN_SCALE: f64 = 2.0;

/// Rotation limit in degrees, applied symmetrically.
pub const MAX_ROTATION_DEG: f64 = 45.0;

/// Lower bound of the viewport zoom.
pub const MIN_ZOOM: f64 = 0.5;

/// Upper bound of the viewport zoom.
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplicative zoom change per zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 1.2;

/// Pointer travel (per axis, in screen pixels) that turns a potential click
/// into a pan.
pub const CLICK_MOVE_THRESHOLD: f64 = 5.0;

/// Width of the comparison viewport before zoom (28rem).
pub const DEFAULT_VIEW_WIDTH: f64 = 448.0;

/// Height of the comparison viewport before zoom (7:10 aspect).
pub const DEFAULT_VIEW_HEIGHT: f64 = 640.0;

/// Natural size of an official card scan, width / height = 1468 / 2048.
pub const CARD_NATURAL_WIDTH: f64 = 1468.0;
pub const CARD_NATURAL_HEIGHT: f64 = 2048.0;

/// Side of the miniature alignment preview, in pixels.
pub const PREVIEW_SIZE: f64 = 150.0;

/// Fraction of the preview side covered by the reference target area.
pub const PREVIEW_TARGET_FRACTION: f64 = 0.8;

/// View width the preview's offset scaling is calibrated against.
pub const PREVIEW_OFFSET_BASE: f64 = 400.0;

/// Per-channel difference (0..1) above which a pixel counts as mismatched.
pub const DEFAULT_MISMATCH_THRESHOLD: f32 = 0.1;
