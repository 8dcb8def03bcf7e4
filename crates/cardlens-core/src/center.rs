use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::alignment::AlignmentSettings;
use crate::geometry::{ImageDimensions, NormalizedPoint, Size};
use crate::transform::{ReferencePlacement, UploadedPlacement};
use crate::viewport::ViewportState;

/// Which image a "set center here" click was aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CenterTarget {
    Uploaded,
    Reference,
}

impl fmt::Display for CenterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploaded => write!(f, "uploaded"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

impl FromStr for CenterTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uploaded" | "upload" => Ok(Self::Uploaded),
            "reference" | "original" => Ok(Self::Reference),
            other => Err(format!(
                "unknown center target '{other}' (expected 'uploaded' or 'reference')"
            )),
        }
    }
}

/// Everything the solver needs to know about the current view.
#[derive(Clone, Copy, Debug)]
pub struct CenterRequest<'a> {
    pub target: CenterTarget,
    /// Click position on the target image, normalized to its display box.
    pub point: NormalizedPoint,
    pub alignment: &'a AlignmentSettings,
    pub viewport: &'a ViewportState,
    pub uploaded: Option<ImageDimensions>,
    pub reference: Option<ImageDimensions>,
    pub view: Size,
}

/// New state after centering. Offsets and pan are rounded to two decimals.
#[derive(Clone, Debug, PartialEq)]
pub struct Recentered {
    pub alignment: AlignmentSettings,
    pub viewport: ViewportState,
}

/// Solve "make the clicked point the visual center".
///
/// Returns `None` (nothing to change) while the needed natural dimensions are
/// unknown or the zoom cannot be divided by.
pub fn solve_center(request: &CenterRequest<'_>) -> Option<Recentered> {
    match request.target {
        CenterTarget::Uploaded => center_on_uploaded(request),
        CenterTarget::Reference => center_on_reference(request),
    }
}

/// Choose the offset that puts the click at the view center:
/// `offset = (center - pivot_anchor) - R*S*((p - pivot) * display)`.
/// The result depends only on the clicked point, so clicking a point that is
/// already centered leaves the offset as is. Scale, rotation, pivot and the
/// viewport are untouched.
fn center_on_uploaded(request: &CenterRequest<'_>) -> Option<Recentered> {
    let (Some(uploaded), Some(reference)) = (request.uploaded, request.reference) else {
        debug!("center on uploaded skipped: image dimensions not known yet");
        return None;
    };

    let placement = UploadedPlacement::for_images(
        request.alignment,
        Some(uploaded),
        Some(reference),
        request.view,
    )?;
    let v = placement.transformed_delta(request.point);
    if !v.is_finite() {
        return None;
    }

    let to_center = request.view.center() - placement.pivot_anchor();
    let mut alignment = request.alignment.clone();
    alignment.set_offset((to_center - v).round2());
    debug!(
        offset_x = alignment.offset_x,
        offset_y = alignment.offset_y,
        "centered on uploaded image"
    );

    Some(Recentered {
        alignment,
        viewport: *request.viewport,
    })
}

/// Pan the viewport so the click sits at the view center, then move the
/// uploaded offset by the unzoomed pan change so `offset - pan / zoom` is
/// preserved.
fn center_on_reference(request: &CenterRequest<'_>) -> Option<Recentered> {
    let Some(reference) = request.reference else {
        debug!("center on reference skipped: reference dimensions not known yet");
        return None;
    };

    let zoom = request.viewport.zoom;
    if !zoom.is_finite() || zoom <= 0.0 {
        warn!(zoom, "center on reference skipped: zoom is not invertible");
        return None;
    }

    let placement = ReferencePlacement::new(reference, request.view);
    if placement.display.is_degenerate() {
        return None;
    }

    let click = placement.center_delta(request.point);
    let new_pan = (-(click * zoom)).round2();
    let delta = (new_pan - request.viewport.pan) / zoom;

    let mut alignment = request.alignment.clone();
    alignment.set_offset((request.alignment.offset() + delta).round2());

    let viewport = ViewportState {
        zoom,
        pan: new_pan,
    };
    debug!(pan = ?viewport.pan, ?delta, "centered on reference image");

    Some(Recentered {
        alignment,
        viewport,
    })
}
