use tracing::{debug, info};

use crate::alignment::{AlignmentField, AlignmentSettings};
use crate::center::{solve_center, CenterRequest, CenterTarget};
use crate::config::{valid_pixel_ratio, ViewerConfig};
use crate::consts::{CARD_NATURAL_HEIGHT, CARD_NATURAL_WIDTH, PREVIEW_SIZE};
use crate::diff::{DiffOutput, DiffParams, DiffRenderer};
use crate::error::Result;
use crate::geometry::{NormalizedPoint, Point, Size};
use crate::io::{ImageSlot, LoadTicket};
use crate::transform::{CssTransform, PreviewLayout, ReferencePlacement, UploadedPlacement};
use crate::viewport::{ControllerOutput, PanZoomController, PointerEvent, SplitSlider, ViewportState};

use image::DynamicImage;

/// Which comparison tab is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Overview with the split slider; no point selection.
    #[default]
    Full,
    /// Inspection view with click-to-center and pivot capture.
    Detail,
}

/// What the next click on the viewport will do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    CenterUploaded,
    CenterReference,
    SetPivot,
}

/// Result of feeding a pointer event to the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionUpdate {
    Nothing,
    Panned,
    Centered(CenterTarget),
    PivotSet(NormalizedPoint),
    /// A click arrived but the images were not ready; nothing changed.
    ClickIgnored,
}

/// One comparison between an uploaded photo and a reference card image.
///
/// The session is the only owner of the alignment. Full and detail modes
/// each have their own viewport; the detail viewport is the shared one that
/// alignment resets also clear.
#[derive(Debug)]
pub struct ComparisonSession {
    config: ViewerConfig,
    alignment: AlignmentSettings,
    reference: ImageSlot,
    uploaded: ImageSlot,
    mode: ComparisonMode,
    detail_viewport: ViewportState,
    full_viewport: ViewportState,
    controller: PanZoomController,
    selection: Option<SelectionMode>,
    split: SplitSlider,
    renderer: DiffRenderer,
}

impl Default for ComparisonSession {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl ComparisonSession {
    pub fn new(config: ViewerConfig) -> Self {
        let config = config.sanitized();
        let controller = PanZoomController::new(config.interaction.click_threshold);
        Self {
            config,
            alignment: AlignmentSettings::identity(),
            reference: ImageSlot::new(),
            uploaded: ImageSlot::new(),
            mode: ComparisonMode::default(),
            detail_viewport: ViewportState::identity(),
            full_viewport: ViewportState::identity(),
            controller,
            selection: None,
            split: SplitSlider::default(),
            renderer: DiffRenderer::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn view_size(&self) -> Size {
        self.config.view.size()
    }

    /// The container was resized.
    pub fn set_view_size(&mut self, size: Size, device_pixel_ratio: f64) {
        self.config.view.width = size.width;
        self.config.view.height = size.height;
        self.config.view.device_pixel_ratio = if valid_pixel_ratio(device_pixel_ratio) {
            device_pixel_ratio
        } else {
            1.0
        };
    }

    // ---------------------------------------------------------------------
    // Images
    // ---------------------------------------------------------------------

    pub fn reference(&self) -> &ImageSlot {
        &self.reference
    }

    pub fn uploaded(&self) -> &ImageSlot {
        &self.uploaded
    }

    pub fn begin_reference_load(&mut self) -> LoadTicket {
        self.reference.begin_load()
    }

    pub fn finish_reference_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<DynamicImage>,
    ) -> bool {
        self.reference.finish(ticket, result)
    }

    /// A new uploaded image resets the alignment to identity.
    pub fn begin_uploaded_load(&mut self) -> LoadTicket {
        self.alignment = AlignmentSettings::identity();
        self.uploaded.begin_load()
    }

    pub fn finish_uploaded_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<DynamicImage>,
    ) -> bool {
        self.uploaded.finish(ticket, result)
    }

    // ---------------------------------------------------------------------
    // Alignment
    // ---------------------------------------------------------------------

    pub fn alignment(&self) -> &AlignmentSettings {
        &self.alignment
    }

    /// Replace the whole alignment, clamped into range.
    pub fn set_alignment(&mut self, alignment: AlignmentSettings) {
        self.alignment = alignment.clamped();
    }

    pub fn update_alignment(&mut self, field: AlignmentField) {
        self.alignment
            .apply(field, self.config.interaction.lock_scale);
    }

    pub fn set_lock_scale(&mut self, locked: bool) {
        self.config.interaction.lock_scale = locked;
        if locked {
            self.alignment.scale_y = self.alignment.scale_x;
        }
    }

    pub fn set_pivot(&mut self, pivot: Option<NormalizedPoint>) {
        self.alignment.set_pivot(pivot);
    }

    /// Back to identity alignment, also clearing the detail viewport.
    pub fn reset_alignment(&mut self) {
        self.alignment = AlignmentSettings::identity();
        self.detail_viewport.reset();
        info!("alignment reset");
    }

    // ---------------------------------------------------------------------
    // Viewport
    // ---------------------------------------------------------------------

    pub fn mode(&self) -> ComparisonMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ComparisonMode) {
        if mode != self.mode {
            self.controller.cancel();
            if mode == ComparisonMode::Full {
                self.selection = None;
            }
        }
        self.mode = mode;
    }

    pub fn viewport(&self) -> &ViewportState {
        match self.mode {
            ComparisonMode::Detail => &self.detail_viewport,
            ComparisonMode::Full => &self.full_viewport,
        }
    }

    fn viewport_mut(&mut self) -> &mut ViewportState {
        match self.mode {
            ComparisonMode::Detail => &mut self.detail_viewport,
            ComparisonMode::Full => &mut self.full_viewport,
        }
    }

    pub fn zoom_in(&mut self) {
        let zoom = self.config.zoom.clone();
        self.viewport_mut().zoom_in(&zoom);
    }

    pub fn zoom_out(&mut self) {
        let zoom = self.config.zoom.clone();
        self.viewport_mut().zoom_out(&zoom);
    }

    pub fn reset_view(&mut self) {
        self.viewport_mut().reset();
    }

    pub fn split(&self) -> &SplitSlider {
        &self.split
    }

    pub fn set_split(&mut self, position: f64) {
        self.split.set(position);
    }

    // ---------------------------------------------------------------------
    // Point selection
    // ---------------------------------------------------------------------

    pub fn selection(&self) -> Option<SelectionMode> {
        self.selection
    }

    /// Arm or disarm a one-shot point selection. Only the detail view takes
    /// point selections; returns whether the mode was accepted.
    pub fn set_selection(&mut self, selection: Option<SelectionMode>) -> bool {
        if selection.is_some() && self.mode != ComparisonMode::Detail {
            return false;
        }
        self.selection = selection;
        true
    }

    /// Feed a pointer event in viewport screen coordinates.
    pub fn pointer(&mut self, event: PointerEvent) -> SessionUpdate {
        let selecting = self.selection.is_some();
        let output = match self.mode {
            ComparisonMode::Detail => {
                self.controller
                    .handle(event, &mut self.detail_viewport, selecting)
            }
            ComparisonMode::Full => self.controller.handle(event, &mut self.full_viewport, false),
        };

        match output {
            ControllerOutput::Nothing => SessionUpdate::Nothing,
            ControllerOutput::Panned => SessionUpdate::Panned,
            ControllerOutput::Click(pos) => self.click(pos),
        }
    }

    fn click(&mut self, screen: Point) -> SessionUpdate {
        let Some(selection) = self.selection else {
            return SessionUpdate::Nothing;
        };

        let update = match selection {
            SelectionMode::CenterUploaded => self.center_at(CenterTarget::Uploaded, screen),
            SelectionMode::CenterReference => self.center_at(CenterTarget::Reference, screen),
            SelectionMode::SetPivot => self.capture_pivot(screen),
        };

        if update != SessionUpdate::ClickIgnored {
            self.selection = None;
        }
        update
    }

    /// Normalized point under a screen position on one of the images.
    pub fn locate(&self, target: CenterTarget, screen: Point) -> Option<NormalizedPoint> {
        let viewport = self.viewport();
        match target {
            CenterTarget::Uploaded => self.uploaded_placement()?.from_screen(screen, viewport),
            CenterTarget::Reference => self.reference_placement()?.from_screen(screen, viewport),
        }
    }

    /// Run the click-to-center solver for a normalized point.
    pub fn center_on(&mut self, target: CenterTarget, point: NormalizedPoint) -> bool {
        let request = CenterRequest {
            target,
            point,
            alignment: &self.alignment,
            viewport: self.viewport(),
            uploaded: self.uploaded.dimensions(),
            reference: self.reference.dimensions(),
            view: self.view_size(),
        };
        let Some(result) = solve_center(&request) else {
            return false;
        };

        self.alignment = result.alignment;
        *self.viewport_mut() = result.viewport;
        info!(%target, x = point.x, y = point.y, "recentered view");
        true
    }

    fn center_at(&mut self, target: CenterTarget, screen: Point) -> SessionUpdate {
        match self.locate(target, screen) {
            Some(point) if self.center_on(target, point) => SessionUpdate::Centered(target),
            _ => {
                debug!(%target, "click ignored, images not ready");
                SessionUpdate::ClickIgnored
            }
        }
    }

    fn capture_pivot(&mut self, screen: Point) -> SessionUpdate {
        match self.locate(CenterTarget::Uploaded, screen) {
            Some(point) => {
                self.alignment.set_pivot(Some(point));
                let pivot = self.alignment.pivot_or_center();
                info!(x = pivot.x, y = pivot.y, "pivot set");
                SessionUpdate::PivotSet(pivot)
            }
            None => SessionUpdate::ClickIgnored,
        }
    }

    // ---------------------------------------------------------------------
    // Rendering queries
    // ---------------------------------------------------------------------

    pub fn uploaded_placement(&self) -> Option<UploadedPlacement> {
        UploadedPlacement::for_images(
            &self.alignment,
            self.uploaded.dimensions(),
            self.reference.dimensions(),
            self.view_size(),
        )
    }

    pub fn reference_placement(&self) -> Option<ReferencePlacement> {
        self.reference
            .dimensions()
            .map(|dims| ReferencePlacement::new(dims, self.view_size()))
    }

    pub fn css_transform(&self) -> Option<CssTransform> {
        self.uploaded_placement()
            .map(|placement| CssTransform::from_placement(&placement))
    }

    /// Miniature preview; uses the reference's aspect once known.
    pub fn preview(&self) -> PreviewLayout {
        let aspect = self
            .reference
            .dimensions()
            .map(|d| d.size().aspect())
            .filter(|a| *a > 0.0)
            .unwrap_or(CARD_NATURAL_WIDTH / CARD_NATURAL_HEIGHT);
        PreviewLayout::compute(&self.alignment, self.uploaded.dimensions(), aspect, PREVIEW_SIZE)
    }

    /// Difference overlay for the current state; re-rendered only when an
    /// input changed.
    pub fn difference(&mut self) -> &DiffOutput {
        let params = DiffParams {
            alignment: &self.alignment,
            container: self.config.view.size(),
            device_pixel_ratio: self.config.view.device_pixel_ratio,
            mismatch_threshold: self.config.diff.mismatch_threshold,
        };
        self.renderer.render(&self.reference, &self.uploaded, &params)
    }

    pub fn render_count(&self) -> usize {
        self.renderer.render_count()
    }
}
