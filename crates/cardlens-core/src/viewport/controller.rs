use tracing::debug;

use crate::consts::CLICK_MOVE_THRESHOLD;
use crate::geometry::Point;

use super::state::ViewportState;

/// Pointer input on the comparison viewport, in screen pixels relative to
/// the viewport's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    /// The pointer left the viewport bounds.
    Leave,
}

/// What the host should do after an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerOutput {
    Nothing,
    /// The pan offset changed.
    Panned,
    /// A press-release without significant travel; carries the press position.
    Click(Point),
}

/// Current pointer interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    /// Pressed in point-selection mode; not yet a pan.
    PotentialClick { down: Point, pan_at_down: Point },
    /// Dragging the viewport. `grab` is pointer minus pan at drag start.
    Panning { grab: Point },
}

/// Disambiguates clicks from drags and drives viewport panning.
#[derive(Clone, Debug)]
pub struct PanZoomController {
    interaction: Interaction,
    click_threshold: f64,
}

impl Default for PanZoomController {
    fn default() -> Self {
        Self::new(CLICK_MOVE_THRESHOLD)
    }
}

impl PanZoomController {
    pub fn new(click_threshold: f64) -> Self {
        Self {
            interaction: Interaction::Idle,
            click_threshold,
        }
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.interaction, Interaction::Panning { .. })
    }

    /// Drop any in-flight interaction without emitting a click.
    pub fn cancel(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Feed one pointer event. `selecting` is true while a point-selection
    /// mode is armed.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        viewport: &mut ViewportState,
        selecting: bool,
    ) -> ControllerOutput {
        match event {
            PointerEvent::Press(pos) => {
                self.press(pos, viewport, selecting);
                ControllerOutput::Nothing
            }
            PointerEvent::Move(pos) => self.motion(pos, viewport),
            PointerEvent::Release(_) | PointerEvent::Leave => self.release(),
        }
    }

    fn press(&mut self, pos: Point, viewport: &ViewportState, selecting: bool) {
        self.interaction = if selecting {
            Interaction::PotentialClick {
                down: pos,
                pan_at_down: viewport.pan,
            }
        } else if viewport.allows_pan() {
            Interaction::Panning {
                grab: pos - viewport.pan,
            }
        } else {
            Interaction::Idle
        };
    }

    fn motion(&mut self, pos: Point, viewport: &mut ViewportState) -> ControllerOutput {
        match self.interaction {
            Interaction::Idle => ControllerOutput::Nothing,
            Interaction::PotentialClick { down, pan_at_down } => {
                let travel = pos - down;
                let moved = travel.x.abs() > self.click_threshold
                    || travel.y.abs() > self.click_threshold;
                if !moved || !viewport.allows_pan() {
                    return ControllerOutput::Nothing;
                }
                debug!(?down, ?pos, "pointer travel exceeded click threshold, panning");
                let grab = down - pan_at_down;
                self.interaction = Interaction::Panning { grab };
                viewport.pan = pos - grab;
                ControllerOutput::Panned
            }
            Interaction::Panning { grab } => {
                viewport.pan = pos - grab;
                ControllerOutput::Panned
            }
        }
    }

    fn release(&mut self) -> ControllerOutput {
        let previous = std::mem::take(&mut self.interaction);
        match previous {
            Interaction::PotentialClick { down, .. } => ControllerOutput::Click(down),
            Interaction::Panning { .. } | Interaction::Idle => ControllerOutput::Nothing,
        }
    }
}
