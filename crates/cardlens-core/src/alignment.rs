use serde::{Deserialize, Serialize};

use crate::consts::{EPSILON, MAX_ALIGN_SCALE, MAX_ROTATION_DEG, MIN_ALIGN_SCALE};
use crate::geometry::{NormalizedPoint, Point};

/// Manual alignment of the uploaded image relative to the reference.
///
/// Offsets are in display pixels of the comparison view at zoom 1. The pivot
/// is expressed in the uploaded image's own frame; `None` means its center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentSettings {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Rotation in degrees.
    pub rotate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot: Option<NormalizedPoint>,
}

impl Default for AlignmentSettings {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            rotate: 0.0,
            pivot: None,
        }
    }
}

impl AlignmentSettings {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset_x = offset.x;
        self.offset_y = offset.y;
    }

    /// Effective pivot, defaulting to the image center.
    pub fn pivot_or_center(&self) -> NormalizedPoint {
        self.pivot.unwrap_or(NormalizedPoint::CENTER)
    }

    /// Set or clear the pivot. A set pivot is clamped into the unit square.
    pub fn set_pivot(&mut self, pivot: Option<NormalizedPoint>) {
        self.pivot = pivot.map(NormalizedPoint::clamped);
    }

    /// Copy with every field forced into its documented range.
    ///
    /// Non-finite values fall back to the identity value for that field.
    pub fn clamped(&self) -> Self {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            scale_x: clamp_scale(self.scale_x),
            scale_y: clamp_scale(self.scale_y),
            offset_x: finite_or(self.offset_x, 0.0),
            offset_y: finite_or(self.offset_y, 0.0),
            rotate: clamp_rotation(self.rotate),
            pivot: self.pivot.map(NormalizedPoint::clamped),
        }
    }

    /// True when both scales are usable as divisors.
    pub fn is_invertible(&self) -> bool {
        self.scale_x.is_finite()
            && self.scale_y.is_finite()
            && self.scale_x.abs() > EPSILON
            && self.scale_y.abs() > EPSILON
    }
}

pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_ALIGN_SCALE, MAX_ALIGN_SCALE)
    } else {
        1.0
    }
}

pub fn clamp_rotation(degrees: f64) -> f64 {
    if degrees.is_finite() {
        degrees.clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG)
    } else {
        0.0
    }
}

/// A single slider-driven change to the alignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AlignmentField {
    ScaleX(f64),
    ScaleY(f64),
    OffsetX(f64),
    OffsetY(f64),
    Rotate(f64),
}

impl AlignmentSettings {
    /// Apply one field update, clamping at the point of entry. When
    /// `lock_scale` is set, changing either scale moves both.
    pub fn apply(&mut self, field: AlignmentField, lock_scale: bool) {
        match field {
            AlignmentField::ScaleX(v) => {
                self.scale_x = clamp_scale(v);
                if lock_scale {
                    self.scale_y = self.scale_x;
                }
            }
            AlignmentField::ScaleY(v) => {
                self.scale_y = clamp_scale(v);
                if lock_scale {
                    self.scale_x = self.scale_y;
                }
            }
            AlignmentField::OffsetX(v) if v.is_finite() => self.offset_x = v,
            AlignmentField::OffsetY(v) if v.is_finite() => self.offset_y = v,
            AlignmentField::Rotate(v) => self.rotate = clamp_rotation(v),
            AlignmentField::OffsetX(_) | AlignmentField::OffsetY(_) => {}
        }
    }
}
