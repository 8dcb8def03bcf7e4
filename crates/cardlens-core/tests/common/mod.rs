#![allow(dead_code)]

use cardlens_core::geometry::Point;
use cardlens_core::io::ImageSlot;
use image::{DynamicImage, Rgba, RgbaImage};

/// A single-color opaque image.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    let px = Rgba([rgb[0], rgb[1], rgb[2], 255]);
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, px))
}

/// An opaque image with horizontal and vertical ramps in red and green, so
/// every pixel is distinguishable.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
        let g = (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8;
        Rgba([r, g, 128, 255])
    });
    DynamicImage::ImageRgba8(img)
}

/// An image slot that has already finished loading `img`.
pub fn ready_slot(img: DynamicImage) -> ImageSlot {
    let mut slot = ImageSlot::new();
    slot.load_now(Ok(img));
    slot
}

/// Write `img` as a PNG inside a fresh temp dir. The file lives as long as
/// the returned `TempDir`.
pub fn write_test_png(img: &DynamicImage, name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("write PNG");
    (dir, path)
}

pub fn assert_point_near(actual: Point, expected: Point, tol: f64) {
    assert!(
        (actual.x - expected.x).abs() <= tol && (actual.y - expected.y).abs() <= tol,
        "expected {expected:?}, got {actual:?} (tol {tol})"
    );
}
