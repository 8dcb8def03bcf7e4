pub mod controller;
pub mod split;
pub mod state;

pub use controller::{ControllerOutput, Interaction, PanZoomController, PointerEvent};
pub use split::SplitSlider;
pub use state::ViewportState;
