use image::{Rgba, Rgba32FImage, RgbaImage};
use rayon::prelude::*;

use crate::consts::{MAX_SURFACE_PIXELS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{LensError, Result};
use crate::geometry::{NormalizedPoint, Point, Size};
use crate::io::LoadedImage;

/// Off-screen raster sized in device pixels for a container measured in CSS
/// pixels. Pixels are straight-alpha RGBA in `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Surface {
    css_size: Size,
    device_pixel_ratio: f64,
    pixels: Rgba32FImage,
}

impl Surface {
    /// A transparent surface. A degenerate container or ratio gives a 0x0
    /// surface; one above [`MAX_SURFACE_PIXELS`] is an error.
    pub fn new(container: Size, device_pixel_ratio: f64) -> Result<Self> {
        let (width, height) = device_size(container, device_pixel_ratio)?;
        Ok(Self {
            css_size: container,
            device_pixel_ratio: if width == 0 { 1.0 } else { device_pixel_ratio },
            pixels: Rgba32FImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixels(&self) -> &Rgba32FImage {
        &self.pixels
    }

    pub fn css_size(&self) -> Size {
        self.css_size
    }

    /// Draw `source` by inverse mapping: for every device pixel center,
    /// `locate` receives the CSS-pixel position in the container and returns
    /// where that lands on the source image (normalized), or `None`.
    /// Pixels mapping outside the unit square stay untouched.
    pub fn draw<F>(&mut self, source: &LoadedImage, locate: F)
    where
        F: Fn(Point) -> Option<NormalizedPoint> + Sync,
    {
        if self.is_empty() {
            return;
        }
        let dpr = self.device_pixel_ratio;
        let width = self.width() as usize;

        let paint_row = |y: usize, row: &mut [f32]| {
            for x in 0..width {
                let css = Point::new((x as f64 + 0.5) / dpr, (y as f64 + 0.5) / dpr);
                let Some(p) = locate(css) else { continue };
                if !p.is_inside() {
                    continue;
                }
                let px = sample_bilinear(&source.pixels, p);
                row[x * 4..x * 4 + 4].copy_from_slice(&px);
            }
        };

        let buf: &mut [f32] = &mut self.pixels;
        if buf.len() / 4 >= PARALLEL_PIXEL_THRESHOLD {
            buf.par_chunks_mut(width * 4)
                .enumerate()
                .for_each(|(y, row)| paint_row(y, row));
        } else {
            buf.chunks_mut(width * 4)
                .enumerate()
                .for_each(|(y, row)| paint_row(y, row));
        }
    }

    /// Composite `source` over this surface with the separable "difference"
    /// blend mode: `|Cs - Cb|` where both layers are opaque, weighted by
    /// coverage elsewhere.
    pub fn blend_difference(&mut self, source: &Surface) -> Result<()> {
        if self.pixels.dimensions() != source.pixels.dimensions() {
            return Err(LensError::Surface(format!(
                "cannot blend {}x{} onto {}x{}",
                source.width(),
                source.height(),
                self.width(),
                self.height()
            )));
        }
        if self.is_empty() {
            return Ok(());
        }

        let width = self.width() as usize;
        let src: &[f32] = &source.pixels;
        let dst: &mut [f32] = &mut self.pixels;
        let blend_row = |(dst_row, src_row): (&mut [f32], &[f32])| {
            for (b, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                let out = difference_pixel([s[0], s[1], s[2], s[3]], [b[0], b[1], b[2], b[3]]);
                b.copy_from_slice(&out);
            }
        };

        if dst.len() / 4 >= PARALLEL_PIXEL_THRESHOLD {
            dst.par_chunks_mut(width * 4)
                .zip(src.par_chunks(width * 4))
                .for_each(blend_row);
        } else {
            dst.chunks_mut(width * 4)
                .zip(src.chunks(width * 4))
                .for_each(blend_row);
        }
        Ok(())
    }

    /// Quantize to 8-bit RGBA.
    pub fn to_rgba8(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width(), self.height());
        for (dst, src) in out.pixels_mut().zip(self.pixels.pixels()) {
            *dst = Rgba(src.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
        }
        out
    }
}

/// Device-pixel size for a CSS-pixel container.
pub fn device_size(container: Size, device_pixel_ratio: f64) -> Result<(u32, u32)> {
    if container.is_degenerate() || !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return Ok((0, 0));
    }
    let w = (container.width * device_pixel_ratio).round();
    let h = (container.height * device_pixel_ratio).round();
    if w < 1.0 || h < 1.0 {
        return Ok((0, 0));
    }
    if !(w * h).is_finite() || w * h > MAX_SURFACE_PIXELS as f64 {
        return Err(LensError::Surface(format!(
            "{w}x{h} device pixels exceeds the {MAX_SURFACE_PIXELS} pixel limit"
        )));
    }
    Ok((w as u32, h as u32))
}

/// "difference" blend of a straight-alpha source over a straight-alpha
/// backdrop.
pub fn difference_pixel(source: [f32; 4], backdrop: [f32; 4]) -> [f32; 4] {
    let a_s = source[3];
    let a_b = backdrop[3];
    let a_o = a_s + a_b * (1.0 - a_s);
    if a_o <= 0.0 {
        return [0.0; 4];
    }
    let mut out = [0.0, 0.0, 0.0, a_o];
    for c in 0..3 {
        let cs = source[c];
        let cb = backdrop[c];
        let premul =
            a_s * (1.0 - a_b) * cs + a_s * a_b * (cs - cb).abs() + (1.0 - a_s) * a_b * cb;
        out[c] = premul / a_o;
    }
    out
}

/// Bilinear sample at a normalized position, clamping taps to the edge.
/// Interpolates premultiplied color so transparent texels do not bleed.
pub fn sample_bilinear(img: &Rgba32FImage, p: NormalizedPoint) -> [f32; 4] {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return [0.0; 4];
    }

    let u = p.x * w as f64 - 0.5;
    let v = p.y * h as f64 - 0.5;
    let x0 = u.floor();
    let y0 = v.floor();
    let fx = (u - x0) as f32;
    let fy = (v - y0) as f32;

    let clamp_x = |x: f64| x.clamp(0.0, (w - 1) as f64) as u32;
    let clamp_y = |y: f64| y.clamp(0.0, (h - 1) as f64) as u32;
    let (xa, xb) = (clamp_x(x0), clamp_x(x0 + 1.0));
    let (ya, yb) = (clamp_y(y0), clamp_y(y0 + 1.0));

    let taps = [
        (img.get_pixel(xa, ya).0, (1.0 - fx) * (1.0 - fy)),
        (img.get_pixel(xb, ya).0, fx * (1.0 - fy)),
        (img.get_pixel(xa, yb).0, (1.0 - fx) * fy),
        (img.get_pixel(xb, yb).0, fx * fy),
    ];

    let mut acc = [0.0f32; 4];
    for (px, weight) in taps {
        if weight == 0.0 {
            continue;
        }
        let a = px[3] * weight;
        acc[0] += px[0] * a;
        acc[1] += px[1] * a;
        acc[2] += px[2] * a;
        acc[3] += a;
    }

    if acc[3] <= 0.0 {
        return [0.0; 4];
    }
    [acc[0] / acc[3], acc[1] / acc[3], acc[2] / acc[3], acc[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_size_rounds_scaled_container() {
        assert_eq!(device_size(Size::new(448.0, 640.0), 2.0).unwrap(), (896, 1280));
        assert_eq!(device_size(Size::new(10.0, 10.0), 1.25).unwrap(), (13, 13));
        assert_eq!(device_size(Size::new(0.0, 640.0), 2.0).unwrap(), (0, 0));
    }

    #[test]
    fn test_oversized_surface_is_rejected() {
        assert!(matches!(
            Surface::new(Size::new(448.0, 640.0), 1.0e7),
            Err(LensError::Surface(_))
        ));
        assert!(device_size(Size::new(1.0e300, 1.0e300), 1.0e10).is_err());
        assert!(device_size(Size::new(4096.0, 4096.0), 1.0).is_ok());
    }

    #[test]
    fn test_difference_of_opaque_pixels_is_absolute() {
        let out = difference_pixel([0.2, 0.9, 0.5, 1.0], [0.7, 0.4, 0.5, 1.0]);
        assert!((out[0] - 0.5).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!(out[2].abs() < 1e-6);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_difference_over_transparent_keeps_source() {
        let out = difference_pixel([0.3, 0.6, 0.9, 1.0], [0.0; 4]);
        assert_eq!(out, [0.3, 0.6, 0.9, 1.0]);
    }
}
