pub mod renderer;
pub mod stats;
pub mod surface;

pub use renderer::{render_difference, render_slots, DiffFrame, DiffOutput, DiffParams, DiffRenderer};
pub use stats::DiffStats;
pub use surface::Surface;
