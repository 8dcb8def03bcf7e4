use tracing::debug;

use crate::alignment::AlignmentSettings;
use crate::consts::EPSILON;
use crate::geometry::{
    centered_origin, contain_fit, denormalize, normalize, ImageDimensions, NormalizedPoint, Point,
    Size,
};
use crate::viewport::ViewportState;

/// Displayed size of the uploaded image inside `view`, before alignment.
///
/// When the reference is known the uploaded image is first scaled to fit the
/// reference's natural frame, then that frame is contain-fitted into the
/// view. Contain-fit is scale invariant, so the pre-fit only matters for
/// numerical agreement with how the two layers are laid out.
pub fn uploaded_display_size(
    uploaded: ImageDimensions,
    reference: Option<ImageDimensions>,
    view: Size,
) -> Size {
    let natural = uploaded.size();
    let effective = match reference {
        Some(reference) if !natural.is_degenerate() => {
            let r = reference.size();
            let s = (r.width / natural.width).min(r.height / natural.height);
            Size::new(natural.width * s, natural.height * s)
        }
        _ => natural,
    };
    contain_fit(effective, view)
}

/// Placement of the uploaded image under an alignment.
///
/// Forward order for a normalized point `p`:
/// `anchor + offset + R(rotate) * S(scale) * ((p - pivot) * display)`, where
/// `anchor` is where the pivot sits in the untransformed, centered display box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UploadedPlacement {
    pub view: Size,
    /// Contain-fitted size before alignment.
    pub display: Size,
    /// Top-left of the untransformed display box in view-local pixels.
    pub origin: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotate: f64,
    pub offset: Point,
    pub pivot: NormalizedPoint,
}

impl UploadedPlacement {
    pub fn new(alignment: &AlignmentSettings, display: Size, view: Size) -> Self {
        Self {
            view,
            display,
            origin: centered_origin(display, view),
            scale_x: alignment.scale_x,
            scale_y: alignment.scale_y,
            rotate: alignment.rotate,
            offset: alignment.offset(),
            pivot: alignment.pivot_or_center(),
        }
    }

    /// Build from natural dimensions; `None` until the uploaded image is known.
    pub fn for_images(
        alignment: &AlignmentSettings,
        uploaded: Option<ImageDimensions>,
        reference: Option<ImageDimensions>,
        view: Size,
    ) -> Option<Self> {
        let uploaded = uploaded?;
        let display = uploaded_display_size(uploaded, reference, view);
        Some(Self::new(alignment, display, view))
    }

    /// Pivot position in view-local pixels before any alignment.
    pub fn pivot_anchor(&self) -> Point {
        self.origin + denormalize(self.pivot, self.display)
    }

    /// Vector from the pivot to `p` after scale and rotation.
    pub fn transformed_delta(&self, p: NormalizedPoint) -> Point {
        let d = denormalize(p, self.display) - denormalize(self.pivot, self.display);
        d.scale_by(self.scale_x, self.scale_y).rotated(self.rotate)
    }

    /// Normalized point on the image to view-local pixels (zoom 1, no pan).
    pub fn to_local(&self, p: NormalizedPoint) -> Point {
        self.pivot_anchor() + self.offset + self.transformed_delta(p)
    }

    /// View-local pixels back to a normalized point on the image.
    ///
    /// Returns `None` for a degenerate display size or a zero scale.
    pub fn from_local(&self, local: Point) -> Option<NormalizedPoint> {
        if self.display.is_degenerate() {
            return None;
        }
        if !self.scale_x.is_finite()
            || !self.scale_y.is_finite()
            || self.scale_x.abs() <= EPSILON
            || self.scale_y.abs() <= EPSILON
        {
            debug!(
                scale_x = self.scale_x,
                scale_y = self.scale_y,
                "alignment scale not invertible"
            );
            return None;
        }

        let rotated = local - self.offset - self.pivot_anchor();
        let unscaled = rotated
            .rotated(-self.rotate)
            .scale_by(1.0 / self.scale_x, 1.0 / self.scale_y);
        let rel = normalize(unscaled, self.display);
        let p = NormalizedPoint::new(rel.x + self.pivot.x, rel.y + self.pivot.y);
        p.to_point().is_finite().then_some(p)
    }

    pub fn to_screen(&self, p: NormalizedPoint, viewport: &ViewportState) -> Point {
        viewport.to_screen(self.to_local(p), self.view)
    }

    pub fn from_screen(&self, screen: Point, viewport: &ViewportState) -> Option<NormalizedPoint> {
        self.from_local(viewport.to_local(screen, self.view)?)
    }

    /// Corners of the transformed image in screen pixels, clockwise from
    /// top-left.
    pub fn outline(&self, viewport: &ViewportState) -> [Point; 4] {
        [
            NormalizedPoint::new(0.0, 0.0),
            NormalizedPoint::new(1.0, 0.0),
            NormalizedPoint::new(1.0, 1.0),
            NormalizedPoint::new(0.0, 1.0),
        ]
        .map(|corner| self.to_screen(corner, viewport))
    }
}

/// Placement of the reference image: contain-fitted and centered, with no
/// alignment of its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferencePlacement {
    pub view: Size,
    pub display: Size,
    pub origin: Point,
}

impl ReferencePlacement {
    pub fn new(reference: ImageDimensions, view: Size) -> Self {
        let display = contain_fit(reference.size(), view);
        Self {
            view,
            display,
            origin: centered_origin(display, view),
        }
    }

    pub fn to_local(&self, p: NormalizedPoint) -> Point {
        self.origin + denormalize(p, self.display)
    }

    pub fn from_local(&self, local: Point) -> Option<NormalizedPoint> {
        if self.display.is_degenerate() {
            return None;
        }
        Some(normalize(local - self.origin, self.display))
    }

    pub fn to_screen(&self, p: NormalizedPoint, viewport: &ViewportState) -> Point {
        viewport.to_screen(self.to_local(p), self.view)
    }

    pub fn from_screen(&self, screen: Point, viewport: &ViewportState) -> Option<NormalizedPoint> {
        self.from_local(viewport.to_local(screen, self.view)?)
    }

    /// Vector from the display center to `p`, in unzoomed view pixels.
    pub fn center_delta(&self, p: NormalizedPoint) -> Point {
        Point::new(
            (p.x - 0.5) * self.display.width,
            (p.y - 0.5) * self.display.height,
        )
    }
}
