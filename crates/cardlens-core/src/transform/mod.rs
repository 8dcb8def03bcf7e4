pub mod compositor;
pub mod css;
pub mod preview;

pub use compositor::{uploaded_display_size, ReferencePlacement, UploadedPlacement};
pub use css::CssTransform;
pub use preview::PreviewLayout;
