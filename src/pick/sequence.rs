use tracing::{debug, info, warn};

use crate::config::ToolConfig;
use crate::error::Result;
use crate::host::{
    CursorKind, Host, InferenceLock, Key, KeyEvent, PreviewRenderer, ScreenEvent, StatusSink,
    OPERATION_NAME,
};
use crate::math::Point3;
use crate::preview::Preview;
use crate::solver::{CancelReason, RotaScale, Solution, TransformPolicy, TransformResult};

use super::{ConstrainLatch, PickSlot};

pub const STATUS_FIRST_POINT: &str = "Pick first point of reference.";
pub const STATUS_SECOND_POINT: &str = "Select second reference point.";
pub const STATUS_THIRD_POINT: &str = "Select third reference point.";

/// Which slot is currently live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    AwaitingReference1,
    AwaitingReference2,
    AwaitingTarget,
}

/// What a click did.
#[derive(Debug, Clone)]
pub enum ClickOutcome {
    /// The pick was invalid; nothing changed.
    Ignored,
    /// A point was frozen and the sequence moved on to this step.
    Advanced(Step),
    /// The transform was applied and the sequence reset.
    Applied(TransformResult),
    /// The final pick produced no transform and the sequence reset.
    Cancelled(CancelReason),
}

/// Turns pointer and key events into three ordered picks and applies the
/// resulting transform.
///
/// Earlier slots are frozen once their click is accepted; only the slot
/// matching [`Step`] follows the pointer.
#[derive(Debug, Clone, Default)]
pub struct PickSequence {
    config: ToolConfig,
    step: Step,
    reference1: PickSlot,
    reference2: PickSlot,
    target: PickSlot,
    modifier_active: bool,
    needs_redraw: bool,
    drawn: bool,
    constrain: ConstrainLatch,
}

impl PickSequence {
    /// Creates a sequence with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence with custom settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_config(config: ToolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn reference1(&self) -> &PickSlot {
        &self.reference1
    }

    #[must_use]
    pub fn reference2(&self) -> &PickSlot {
        &self.reference2
    }

    #[must_use]
    pub fn target(&self) -> &PickSlot {
        &self.target
    }

    /// Whether the rotation-only modifier is held.
    #[must_use]
    pub fn modifier_active(&self) -> bool {
        self.modifier_active
    }

    /// Whether the host owes a redraw.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Cursor matching the current modifier state.
    #[must_use]
    pub fn cursor(&self) -> CursorKind {
        if self.modifier_active {
            CursorKind::Rotate
        } else {
            CursorKind::RotateScale
        }
    }

    /// Starts a fresh sequence when the tool is selected.
    pub fn activate(&mut self, host: &mut dyn StatusSink) {
        host.set_status_text(STATUS_FIRST_POINT);
        self.drawn = false;
        self.reset(None);
    }

    /// Requests a final redraw to erase anything the tool drew.
    pub fn deactivate(&mut self) {
        if self.drawn {
            self.needs_redraw = true;
        }
    }

    /// Clears all slots and returns to [`Step::AwaitingReference1`].
    ///
    /// With a view, the tooltip is cleared and a redraw is requested if
    /// anything was drawn since the last reset.
    pub fn reset(&mut self, view: Option<&mut dyn StatusSink>) {
        self.step = Step::AwaitingReference1;
        self.reference1 = PickSlot::cleared();
        self.reference2 = PickSlot::cleared();
        self.target = PickSlot::cleared();

        if let Some(view) = view {
            view.set_tooltip(None);
            if self.drawn {
                self.needs_redraw = true;
            }
        }

        self.drawn = false;
        self.modifier_active = false;
    }

    /// Updates the live slot from a pointer move.
    pub fn on_mouse_move<H: Host>(&mut self, host: &mut H, event: ScreenEvent) {
        match self.step {
            Step::AwaitingReference1 => {
                let slot = PickSlot::from_pick(host.resolve(&event, &[]));
                if slot != self.reference1 {
                    if slot.displayable || self.reference1.displayable {
                        self.needs_redraw = true;
                    }
                    self.reference1 = slot;
                }
            }
            Step::AwaitingReference2 => {
                let hints = self.frozen_points();
                self.reference2 = PickSlot::from_pick(host.resolve(&event, &hints));
                self.needs_redraw = true;
            }
            Step::AwaitingTarget => {
                let hints = self.frozen_points();
                self.target = PickSlot::from_pick(host.resolve(&event, &hints));
                self.needs_redraw = true;
            }
        }
    }

    /// Resolves a click and advances, applies or ignores it.
    ///
    /// Any inference lock is released afterwards unless the final pick was
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the solver meets a zero-length reference vector
    /// or the host fails to transform the selection. The sequence stays on
    /// the target step in both cases.
    pub fn on_click<H: Host>(&mut self, host: &mut H, event: ScreenEvent) -> Result<ClickOutcome> {
        let hints = self.frozen_points();
        let slot = PickSlot::from_pick(host.resolve(&event, &hints));

        let outcome = match self.step {
            Step::AwaitingReference1 => {
                self.reference1 = slot;
                if slot.valid {
                    self.advance(host, Step::AwaitingReference2, STATUS_SECOND_POINT)
                } else {
                    ClickOutcome::Ignored
                }
            }
            Step::AwaitingReference2 => {
                self.reference2 = slot;
                if !slot.valid {
                    ClickOutcome::Ignored
                } else if slot.coincides_with(&self.reference1) {
                    debug!("second reference point coincides with the first, ignoring click");
                    ClickOutcome::Ignored
                } else {
                    self.advance(host, Step::AwaitingTarget, STATUS_THIRD_POINT)
                }
            }
            Step::AwaitingTarget => {
                self.target = slot;
                match self.finish(host)? {
                    Some(ClickOutcome::Cancelled(reason)) => {
                        return Ok(ClickOutcome::Cancelled(reason));
                    }
                    Some(outcome) => outcome,
                    None => ClickOutcome::Ignored,
                }
            }
        };

        host.unlock();
        Ok(outcome)
    }

    /// Handles the constrain and rotation-only keys.
    pub fn on_key_down<H: InferenceLock>(&mut self, host: &mut H, event: KeyEvent) {
        match event.key {
            Key::Constrain if !event.repeat => {
                self.constrain.press(event.at);
                if host.is_locked() {
                    host.unlock();
                } else if let Some(points) = self.lock_points() {
                    debug!(step = ?self.step, ?points, "locking inference");
                    host.lock(&points);
                }
            }
            Key::RotationOnly => {
                if !self.modifier_active {
                    self.needs_redraw = true;
                }
                self.modifier_active = true;
            }
            _ => {}
        }
    }

    /// Releases a held inference lock and the rotation-only modifier.
    pub fn on_key_up<H: InferenceLock>(&mut self, host: &mut H, event: KeyEvent) {
        match event.key {
            Key::Constrain => {
                let held = self.constrain.release(event.at, self.config.lock_hold_threshold);
                if held && host.is_locked() {
                    host.unlock();
                }
            }
            Key::RotationOnly => {
                if self.modifier_active {
                    self.needs_redraw = true;
                }
                self.modifier_active = false;
            }
            Key::Other(_) => {}
        }
    }

    /// Builds the preview snapshot for the current slots.
    #[must_use]
    pub fn preview(&self, inference_locked: bool) -> Preview {
        Preview::build(
            self.step,
            [&self.reference1, &self.reference2, &self.target],
            inference_locked,
            &self.config,
        )
    }

    /// Hands the current preview to the renderer.
    pub fn draw<H: PreviewRenderer + InferenceLock>(&mut self, host: &mut H) {
        let preview = self.preview(host.is_locked());
        if !preview.is_empty() {
            self.drawn = true;
        }
        host.render(&preview);
    }

    fn advance(&mut self, host: &mut dyn StatusSink, next: Step, status: &str) -> ClickOutcome {
        debug!(from = ?self.step, to = ?next, "pick accepted");
        self.step = next;
        host.set_status_text(status);
        ClickOutcome::Advanced(next)
    }

    /// Solves and applies the transform. Returns `None` for an invalid target.
    fn finish<H: Host>(&mut self, host: &mut H) -> Result<Option<ClickOutcome>> {
        let (Some(anchor), Some(reference), Some(target)) = (
            self.reference1.valid_point(),
            self.reference2.valid_point(),
            self.target.valid_point(),
        ) else {
            return Ok(None);
        };

        let policy = TransformPolicy::from_modifier(self.modifier_active);
        let solution = RotaScale::new(anchor, reference, target, policy).solve()?;

        let outcome = match solution {
            Solution::Apply(result) => {
                let selection = host.selection();
                host.apply_transform(OPERATION_NAME, &result.matrix, &selection)?;
                info!(
                    angle = result.angle.to_degrees(),
                    scale = result.scale,
                    ?policy,
                    "transform applied"
                );
                ClickOutcome::Applied(result)
            }
            Solution::Cancel(reason) => {
                warn!(?reason, ?policy, "final pick cancelled");
                ClickOutcome::Cancelled(reason)
            }
        };

        self.reset(Some(host as &mut dyn StatusSink));
        Ok(Some(outcome))
    }

    /// Points frozen before the live slot, in pick order.
    fn frozen_points(&self) -> Vec<Point3> {
        match self.step {
            Step::AwaitingReference1 => Vec::new(),
            Step::AwaitingReference2 => self.reference1.valid_point().into_iter().collect(),
            Step::AwaitingTarget => [&self.reference1, &self.reference2]
                .iter()
                .filter_map(|slot| slot.valid_point())
                .collect(),
        }
    }

    /// Points to lock inference to: the live pick, then the anchor.
    fn lock_points(&self) -> Option<Vec<Point3>> {
        let live = match self.step {
            Step::AwaitingReference1 => return self.reference1.valid_point().map(|p| vec![p]),
            Step::AwaitingReference2 => self.reference2.valid_point()?,
            Step::AwaitingTarget => self.target.valid_point()?,
        };
        let anchor = self.reference1.valid_point()?;
        Some(vec![live, anchor])
    }
}
