pub mod image_io;
pub mod source;

pub use image_io::{decode_image, dimensions_of, load_image, save_png};
pub use source::{ImageSlot, LoadTicket, LoadedImage, SlotState};
