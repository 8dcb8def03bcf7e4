use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::info;

use crate::error::{LensError, Result};
use crate::geometry::ImageDimensions;

/// Decode an image file. Zero-sized images are rejected.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).map_err(|e| LensError::Decode {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })?;
    check_dimensions(&img)?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "loaded image");
    Ok(img)
}

/// Decode an in-memory image, guessing the format from its header.
pub fn decode_image(bytes: &[u8], source_name: &str) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes).map_err(|e| LensError::Decode {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;
    check_dimensions(&img)?;
    Ok(img)
}

/// Save an RGBA raster as PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

pub fn dimensions_of(img: &DynamicImage) -> ImageDimensions {
    ImageDimensions::new(img.width(), img.height())
}

fn check_dimensions(img: &DynamicImage) -> Result<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(LensError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(())
}
