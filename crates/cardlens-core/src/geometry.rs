use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point or vector in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise product, used to apply per-axis scales.
    pub fn scale_by(self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }

    /// Rotate about the origin by `degrees` (positive is clockwise on screen,
    /// since y grows downward).
    pub fn rotated(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Round both components to two decimals.
    pub fn round2(self) -> Self {
        Self::new(round2(self.x), round2(self.y))
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A width/height pair in (possibly fractional) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn aspect(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.width / self.height
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.width, self.height)
    }
}

/// Natural pixel dimensions of a decoded raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// A location expressed as a fraction of an image's displayed bounding box.
///
/// Values are not forced into `[0, 1]`: a click outside the image maps to a
/// point outside the unit square. Use [`NormalizedPoint::clamped`] where the
/// unit-square invariant is required.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp into the unit square. Non-finite components fall back to 0.5.
    pub fn clamped(self) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        Self::new(clamp(self.x), clamp(self.y))
    }

    pub fn is_inside(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Default for NormalizedPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Size at which an image of `natural` size is displayed inside `container`
/// under "object-fit: contain".
///
/// Returns [`Size::ZERO`] when either input is degenerate, so callers never
/// see NaN before an image has finished loading.
pub fn contain_fit(natural: Size, container: Size) -> Size {
    if natural.is_degenerate() || container.is_degenerate() {
        return Size::ZERO;
    }

    let image_aspect = natural.width / natural.height;
    let container_aspect = container.width / container.height;

    if image_aspect > container_aspect {
        Size::new(container.width, container.width / image_aspect)
    } else {
        Size::new(container.height * image_aspect, container.height)
    }
}

/// Top-left corner of a `displayed` box centered in `container`.
pub fn centered_origin(displayed: Size, container: Size) -> Point {
    Point::new(
        (container.width - displayed.width) / 2.0,
        (container.height - displayed.height) / 2.0,
    )
}

/// Pixel offset within a box of `size` to a normalized fraction of it.
pub fn normalize(pixel: Point, size: Size) -> NormalizedPoint {
    let axis = |v: f64, extent: f64| if extent > 0.0 { v / extent } else { 0.0 };
    NormalizedPoint::new(axis(pixel.x, size.width), axis(pixel.y, size.height))
}

/// Normalized fraction of a box of `size` back to a pixel offset within it.
pub fn denormalize(point: NormalizedPoint, size: Size) -> Point {
    Point::new(point.x * size.width, point.y * size.height)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotated(90.0);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(149.333_333), 149.33);
        assert_eq!(round2(-112.0), -112.0);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn test_normalize_zero_size() {
        let n = normalize(Point::new(10.0, 10.0), Size::ZERO);
        assert_eq!(n, NormalizedPoint::new(0.0, 0.0));
    }
}
