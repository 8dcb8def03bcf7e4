use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::alignment::AlignmentSettings;
use crate::error::Result;
use crate::geometry::Size;
use crate::io::{ImageSlot, LoadedImage, SlotState};
use crate::transform::{uploaded_display_size, ReferencePlacement, UploadedPlacement};

use super::stats::DiffStats;
use super::surface::Surface;

/// A finished difference raster.
#[derive(Clone, Debug)]
pub struct DiffFrame {
    pub image: RgbaImage,
    pub stats: DiffStats,
}

/// Outcome of a difference render request.
#[derive(Clone, Debug)]
pub enum DiffOutput {
    /// At least one image has not finished decoding.
    Pending,
    /// An image failed to decode; shown as text instead of a raster.
    Failed(String),
    Ready(DiffFrame),
}

impl DiffOutput {
    pub fn frame(&self) -> Option<&DiffFrame> {
        match self {
            Self::Ready(frame) => Some(frame),
            _ => None,
        }
    }

    /// Text to show in place of the raster, if any.
    pub fn status_text(&self) -> Option<String> {
        match self {
            Self::Pending => Some("Loading images...".to_string()),
            Self::Failed(msg) => Some(format!("Could not render difference: {msg}")),
            Self::Ready(_) => None,
        }
    }
}

/// Parameters of one difference render.
#[derive(Clone, Copy, Debug)]
pub struct DiffParams<'a> {
    pub alignment: &'a AlignmentSettings,
    /// Container size in CSS pixels.
    pub container: Size,
    pub device_pixel_ratio: f64,
    pub mismatch_threshold: f32,
}

/// Render `|reference - aligned(uploaded)|`.
///
/// The reference is committed to the first surface, the uploaded image is
/// drawn under the alignment into a second surface of the same size, and the
/// second is then blended onto the first.
pub fn render_difference(
    reference: &LoadedImage,
    uploaded: &LoadedImage,
    params: &DiffParams<'_>,
) -> Result<DiffFrame> {
    let view = params.container;
    let ref_placement = ReferencePlacement::new(reference.dimensions, view);
    let display = uploaded_display_size(uploaded.dimensions, Some(reference.dimensions), view);
    let up_placement = UploadedPlacement::new(params.alignment, display, view);

    let mut base = Surface::new(view, params.device_pixel_ratio)?;
    base.draw(reference, |local| ref_placement.from_local(local));

    let mut layer = Surface::new(view, params.device_pixel_ratio)?;
    layer.draw(uploaded, |local| up_placement.from_local(local));

    let stats = DiffStats::measure(&base, &layer, params.mismatch_threshold);
    base.blend_difference(&layer)?;

    info!(
        width = base.width(),
        height = base.height(),
        mean = stats.mean_difference,
        mismatch = stats.mismatch_fraction,
        "rendered difference"
    );

    Ok(DiffFrame {
        image: base.to_rgba8(),
        stats,
    })
}

/// Render from the two image slots, reporting not-ready and decode failures
/// as states rather than errors.
pub fn render_slots(
    reference: &ImageSlot,
    uploaded: &ImageSlot,
    params: &DiffParams<'_>,
) -> DiffOutput {
    match (reference.state(), uploaded.state()) {
        (SlotState::Failed(msg), _) => DiffOutput::Failed(format!("reference image: {msg}")),
        (_, SlotState::Failed(msg)) => DiffOutput::Failed(format!("uploaded image: {msg}")),
        (SlotState::Ready(r), SlotState::Ready(u)) => match render_difference(r, u, params) {
            Ok(frame) => DiffOutput::Ready(frame),
            Err(e) => {
                warn!(error = %e, "difference render failed");
                DiffOutput::Failed(e.to_string())
            }
        },
        _ => DiffOutput::Pending,
    }
}

/// Everything a render depends on. Equal keys produce equal output.
#[derive(Clone, Debug, PartialEq)]
struct RenderKey {
    container_w: u64,
    container_h: u64,
    device_pixel_ratio: u64,
    mismatch_threshold: u32,
    alignment: AlignmentSettings,
    reference_generation: u64,
    uploaded_generation: u64,
}

impl RenderKey {
    fn new(reference: &ImageSlot, uploaded: &ImageSlot, params: &DiffParams<'_>) -> Self {
        Self {
            container_w: params.container.width.to_bits(),
            container_h: params.container.height.to_bits(),
            device_pixel_ratio: params.device_pixel_ratio.to_bits(),
            mismatch_threshold: params.mismatch_threshold.to_bits(),
            alignment: params.alignment.clone(),
            reference_generation: reference.generation(),
            uploaded_generation: uploaded.generation(),
        }
    }
}

/// Re-renders only when an input changed: container resize, pixel ratio,
/// alignment, or either image source.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    cached: Option<(RenderKey, DiffOutput)>,
    renders: usize,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        reference: &ImageSlot,
        uploaded: &ImageSlot,
        params: &DiffParams<'_>,
    ) -> &DiffOutput {
        let key = RenderKey::new(reference, uploaded, params);
        let stale = self
            .cached
            .as_ref()
            .map_or(true, |(cached_key, _)| *cached_key != key);

        if stale {
            self.cached = None;
        } else {
            debug!("difference inputs unchanged, reusing last render");
        }

        let (_, output) = self.cached.get_or_insert_with(|| {
            self.renders += 1;
            let output = render_slots(reference, uploaded, params);
            (key, output)
        });
        output
    }

    /// Number of renders actually performed.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
