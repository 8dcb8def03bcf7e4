use std::fmt;

use crate::geometry::{Point, Size};

use super::compositor::UploadedPlacement;

/// Transform parameters for placing the uploaded image as a positioned
/// element: box at `left`/`top` with `size`, then
/// `translate(offset) rotate(rotate) scale(sx, sy)` about `origin_percent`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssTransform {
    pub left: f64,
    pub top: f64,
    pub size: Size,
    pub translate: Point,
    pub rotate: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Transform origin as percentages of the element box.
    pub origin_percent: Point,
}

impl CssTransform {
    pub fn from_placement(placement: &UploadedPlacement) -> Self {
        Self {
            left: placement.origin.x,
            top: placement.origin.y,
            size: placement.display,
            translate: placement.offset,
            rotate: placement.rotate,
            scale_x: placement.scale_x,
            scale_y: placement.scale_y,
            origin_percent: Point::new(placement.pivot.x * 100.0, placement.pivot.y * 100.0),
        }
    }

    /// The `transform-origin` value.
    pub fn origin(&self) -> String {
        format!("{}% {}%", self.origin_percent.x, self.origin_percent.y)
    }

    /// Apply the transform to a point given in element-local pixels,
    /// returning view-local pixels.
    pub fn apply(&self, element_point: Point) -> Point {
        let origin = Point::new(
            self.origin_percent.x / 100.0 * self.size.width,
            self.origin_percent.y / 100.0 * self.size.height,
        );
        let d = (element_point - origin)
            .scale_by(self.scale_x, self.scale_y)
            .rotated(self.rotate);
        Point::new(self.left, self.top) + origin + self.translate + d
    }
}

/// Formats the `transform` property value.
impl fmt::Display for CssTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) rotate({}deg) scale({}, {})",
            self.translate.x, self.translate.y, self.rotate, self.scale_x, self.scale_y
        )
    }
}
