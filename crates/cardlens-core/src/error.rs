use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Failed to decode {source_name}: {message}")]
    Decode {
        source_name: String,
        message: String,
    },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, LensError>;
