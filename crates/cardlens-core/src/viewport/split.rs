/// Position of the before/after divider, as a percentage of the view width.
///
/// The uploaded image is drawn over the reference and clipped to the left of
/// the divider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitSlider {
    position: f64,
}

impl Default for SplitSlider {
    fn default() -> Self {
        Self { position: 50.0 }
    }
}

impl SplitSlider {
    pub fn new(position: f64) -> Self {
        let mut slider = Self::default();
        slider.set(position);
        slider
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set(&mut self, position: f64) {
        if position.is_finite() {
            self.position = position.clamp(0.0, 100.0);
        }
    }

    /// Right inset of the uploaded layer's clip, in percent.
    pub fn clip_inset_right(&self) -> f64 {
        100.0 - self.position
    }

    /// CSS `clip-path` value for the uploaded layer.
    pub fn clip_path(&self) -> String {
        format!("inset(0 {}% 0 0)", self.clip_inset_right())
    }

    /// Whether the uploaded layer is visible at view-local x coordinate `x`.
    pub fn shows_uploaded_at(&self, x: f64, view_width: f64) -> bool {
        view_width > 0.0 && x <= view_width * self.position / 100.0
    }

    /// The divider handle is hidden while zoomed so it does not fight panning.
    pub fn handle_visible(zoom: f64) -> bool {
        zoom == 1.0
    }
}
