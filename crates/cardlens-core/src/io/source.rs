use std::sync::Arc;

use image::{DynamicImage, Rgba32FImage};
use tracing::{info, warn};

use crate::error::Result;
use crate::geometry::ImageDimensions;

/// A decoded image ready for sampling, stored as straight-alpha RGBA f32.
#[derive(Debug)]
pub struct LoadedImage {
    pub dimensions: ImageDimensions,
    pub pixels: Rgba32FImage,
}

impl LoadedImage {
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        Self {
            dimensions: ImageDimensions::new(img.width(), img.height()),
            pixels: img.to_rgba32f(),
        }
    }
}

/// Load state of one of the two compared images.
#[derive(Clone, Debug, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Loading,
    Ready(Arc<LoadedImage>),
    Failed(String),
}

/// Proof of a specific `begin_load` call. Completions carrying an older
/// ticket are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Holds one image source and its natural dimensions.
///
/// Starting a new load supersedes any load still in flight: its completion
/// is dropped when it arrives.
#[derive(Clone, Debug, Default)]
pub struct ImageSlot {
    generation: u64,
    state: SlotState,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = SlotState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a decode result. Returns `false` when the ticket is stale.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<DynamicImage>) -> bool {
        if ticket.0 != self.generation {
            warn!(
                ticket = ticket.0,
                current = self.generation,
                "ignoring completion of superseded image load"
            );
            return false;
        }
        self.state = match result {
            Ok(img) => {
                let loaded = LoadedImage::from_dynamic(&img);
                info!(
                    width = loaded.dimensions.width,
                    height = loaded.dimensions.height,
                    "image ready"
                );
                SlotState::Ready(Arc::new(loaded))
            }
            Err(e) => {
                warn!(error = %e, "image failed to decode");
                SlotState::Failed(e.to_string())
            }
        };
        true
    }

    /// Start and finish a load in one step.
    pub fn load_now(&mut self, result: Result<DynamicImage>) {
        let ticket = self.begin_load();
        self.finish(ticket, result);
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = SlotState::Empty;
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    /// Changes whenever the slot's content may have changed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn image(&self) -> Option<&Arc<LoadedImage>> {
        match &self.state {
            SlotState::Ready(img) => Some(img),
            _ => None,
        }
    }

    /// Natural dimensions, known only once decoding succeeded.
    pub fn dimensions(&self) -> Option<ImageDimensions> {
        self.image().map(|img| img.dimensions)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SlotState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
