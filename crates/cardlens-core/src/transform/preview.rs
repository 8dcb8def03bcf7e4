use crate::alignment::AlignmentSettings;
use crate::consts::{PREVIEW_OFFSET_BASE, PREVIEW_TARGET_FRACTION};
use crate::geometry::{centered_origin, ImageDimensions, Point, Size};

use super::css::CssTransform;

/// Layout of the miniature alignment preview shown beside the sliders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewLayout {
    pub preview_size: f64,
    /// Reference target area, top-left and size.
    pub target_origin: Point,
    pub target_size: Size,
    /// Uploaded placeholder before its transform; `None` until dimensions
    /// are known.
    pub uploaded: Option<CssTransform>,
}

impl PreviewLayout {
    /// Lay out a square preview of side `preview_size` for a card with
    /// `card_aspect` (width / height).
    pub fn compute(
        alignment: &AlignmentSettings,
        uploaded: Option<ImageDimensions>,
        card_aspect: f64,
        preview_size: f64,
    ) -> Self {
        let long_side = preview_size * PREVIEW_TARGET_FRACTION;
        let target_size = if card_aspect > 1.0 {
            Size::new(long_side, long_side / card_aspect)
        } else {
            Size::new(long_side * card_aspect, long_side)
        };
        let preview = Size::new(preview_size, preview_size);
        let target_origin = centered_origin(target_size, preview);

        let uploaded = uploaded
            .map(|dims| dims.size())
            .filter(|size| !size.is_degenerate())
            .map(|size| {
                let aspect = size.aspect();
                let placeholder = if aspect > 1.0 {
                    Size::new(target_size.width, target_size.width / aspect)
                } else {
                    Size::new(target_size.height * aspect, target_size.height)
                };
                let origin = centered_origin(placeholder, preview);
                let offset_scale = preview_size / PREVIEW_OFFSET_BASE;
                let pivot = alignment.pivot_or_center();
                CssTransform {
                    left: origin.x,
                    top: origin.y,
                    size: placeholder,
                    translate: alignment.offset() * offset_scale,
                    rotate: alignment.rotate,
                    scale_x: alignment.scale_x,
                    scale_y: alignment.scale_y,
                    origin_percent: Point::new(pivot.x * 100.0, pivot.y * 100.0),
                }
            });

        Self {
            preview_size,
            target_origin,
            target_size,
            uploaded,
        }
    }

    /// Corner dots of the uploaded placeholder, in preview pixels.
    pub fn uploaded_corners(&self) -> Option<[Point; 4]> {
        let css = self.uploaded?;
        let (w, h) = (css.size.width, css.size.height);
        Some([
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ]
        .map(|corner| css.apply(corner)))
    }
}
