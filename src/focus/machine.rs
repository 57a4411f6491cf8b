use log::{debug, info, warn};

use super::mode::Mode;
use super::session::{FocalTarget, FocusSession, FocusState};
use crate::events::LifecycleEvent;
use crate::math::{approach_step, ARRIVAL_EPSILON};
use crate::traits::{CameraRig, Notifier, ObjectModel};
use crate::types::{CameraMode, FollowTarget, ObjectHandle, Placement, VesselHandle};

/// Repeated focus actions closer together than this count as "arrived"
pub const DEBOUNCE_SECS: f32 = 0.25;
/// A boosted glide that has not converged by now is forced to arrive
pub const GLIDE_TIMEOUT_SECS: f32 = 10.0;
/// On-screen time of focus and reset messages
pub const MESSAGE_SECS: f32 = 1.5;
/// On-screen time of the vessel mismatch warning
pub const WARNING_SECS: f32 = 3.0;

const MISMATCH_WARNING: &str = "Camera focus warning\nControlled vessel is not in focus";

/// Host collaborators borrowed for one call into the state machine
pub struct FocusContext<'a> {
    pub model: &'a dyn ObjectModel,
    pub rig: &'a mut dyn CameraRig,
    pub notifier: &'a mut dyn Notifier,
}

impl<'a> FocusContext<'a> {
    pub fn new(
        model: &'a dyn ObjectModel,
        rig: &'a mut dyn CameraRig,
        notifier: &'a mut dyn Notifier,
    ) -> Self {
        Self {
            model,
            rig,
            notifier,
        }
    }
}

/// Owns the focus session and moves the camera anchor every tick
#[derive(Debug, Clone)]
pub struct FocusStateMachine {
    session: FocusSession,
    mode: Mode,
    show_messages: bool,
}

impl FocusStateMachine {
    pub fn new(mode: Mode) -> Self {
        Self {
            session: FocusSession::new(),
            mode,
            show_messages: true,
        }
    }

    pub fn with_messages(mut self, show_messages: bool) -> Self {
        self.show_messages = show_messages;
        self
    }

    pub fn session(&self) -> &FocusSession {
        &self.session
    }

    pub fn state(&self) -> FocusState {
        FocusState::of(&self.session)
    }

    pub fn target(&self) -> Option<ObjectHandle> {
        self.session.target_object()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Advance to the next mode; the session is left untouched
    pub fn cycle_mode(&mut self) -> Mode {
        self.mode = self.mode.next();
        info!("focus mode changed to {}", self.mode);
        self.mode
    }

    /// Whether a focus action now would fall inside the debounce window
    pub fn within_debounce(&self) -> bool {
        self.session.elapsed < DEBOUNCE_SECS
    }

    /// Skip the rest of the current glide
    pub fn mark_arrived(&mut self) {
        self.session.has_reached_target = true;
    }

    /// Start gliding towards `object`. Selecting the current target again
    /// jumps straight to it.
    pub fn focus_on(&mut self, ctx: &mut FocusContext<'_>, object: ObjectHandle) {
        if !ctx.model.is_live(object) {
            warn!("ignoring focus request for stale {object:?}");
            return;
        }

        let sharpness = ctx.rig.sharpness();
        if sharpness > 0.0 {
            self.session.saved_base_sharpness = sharpness;
            debug!("captured rig sharpness {sharpness}");
        }
        ctx.rig.set_sharpness(0.0);

        self.session.has_reached_target = self.target() == Some(object);

        if self.show_messages {
            let message = format!("Camera focus on {}", ctx.model.display_name(object));
            ctx.notifier
                .post_message(&message, MESSAGE_SECS, Placement::UpperCenter);
        }

        self.session.restart();
        self.session.is_active = true;
        self.session.target = Some(FocalTarget {
            object,
            owner: ctx.model.owner_of(object),
        });
        info!(
            "focusing on {object:?} (owner {:?}, jump {})",
            self.session.target.and_then(|target| target.owner),
            self.session.has_reached_target
        );
    }

    /// Release the target and glide back to the active vessel
    pub fn reset_focus(&mut self, ctx: &mut FocusContext<'_>) {
        if self.show_messages {
            ctx.notifier
                .post_message("Camera focus reset", MESSAGE_SECS, Placement::UpperCenter);
        }

        self.session.target = None;
        self.session.has_reached_target = false;
        self.session.is_active = true;
        self.session.restart();
        ctx.rig.set_sharpness(self.session.saved_base_sharpness);
        info!(
            "focus reset, rig sharpness restored to {}",
            self.session.saved_base_sharpness
        );
    }

    /// Advance the anchor by one simulation step of `dt` seconds
    pub fn tick(&mut self, ctx: &mut FocusContext<'_>, dt: f32) {
        self.session.elapsed += dt;
        if !self.session.is_active {
            return;
        }

        self.drop_stale_target(ctx);

        let active_vessel = ctx.model.active_vessel();
        let target_position = match self.session.target {
            Some(target) => ctx.model.object_position(target.object),
            None => active_vessel.and_then(|vessel| ctx.model.vessel_position(vessel)),
        };
        let Some(target_position) = target_position else {
            debug!("no focal point this tick");
            return;
        };

        let anchor = ctx.rig.anchor_position();
        let distance = (anchor - target_position).length();
        debug!("tick: target {target_position}, anchor {anchor}, distance {distance}");

        if self.mode != Mode::Smooth {
            match (self.session.target, active_vessel) {
                (Some(target), _) if self.mode == Mode::Stock => {
                    ctx.rig.set_native_follow(FollowTarget::Object(target.object));
                }
                (Some(_), _) => {}
                (None, Some(vessel)) => ctx.rig.set_native_follow(FollowTarget::Vessel(vessel)),
                (None, None) => {}
            }

            if self.mode == Mode::Stock && self.session.target.is_none() {
                self.session.has_reached_target = true;
                return;
            }
        }

        if self.session.has_reached_target || distance < ARRIVAL_EPSILON {
            ctx.rig.set_anchor_position(target_position);
            self.session.has_reached_target = true;
            self.session.is_active = self.session.target.is_some();
            return;
        }

        let boosted = self.needs_boost(ctx, active_vessel);
        let step = approach_step(anchor, target_position, dt, boosted);
        ctx.rig.set_anchor_position(anchor + step);
        debug!("moved anchor by {}", step.length());

        if boosted && self.session.elapsed > GLIDE_TIMEOUT_SECS {
            warn!("glide did not converge within {GLIDE_TIMEOUT_SECS}s, forcing arrival");
            self.session.has_reached_target = true;
        }
    }

    /// Apply a host lifecycle notification
    pub fn handle_event(&mut self, ctx: &mut FocusContext<'_>, event: &LifecycleEvent) {
        debug!("lifecycle event {event:?}");
        match *event {
            LifecycleEvent::CameraModeChanged(CameraMode::FirstPerson) => {
                if self.session.target.is_some() {
                    self.reset_focus(ctx);
                }
            }
            LifecycleEvent::CameraModeChanged(_) => {}
            LifecycleEvent::ActiveVesselChanged(_)
            | LifecycleEvent::StageSeparation
            | LifecycleEvent::Undock => {
                self.check_vessel_mismatch(ctx);
            }
            LifecycleEvent::VesselWillDestroy(vessel) | LifecycleEvent::VesselGoOnRails(vessel) => {
                if self.target_owner(ctx) == Some(vessel) {
                    info!("target vessel {vessel:?} leaving the scene");
                    self.reset_focus(ctx);
                }
            }
        }
    }

    /// Warn when the target belongs to a vessel other than the active one.
    /// The target is kept; the mismatch may resolve on its own.
    pub fn check_vessel_mismatch(&mut self, ctx: &mut FocusContext<'_>) -> bool {
        let Some(owner) = self.target_owner(ctx) else {
            return false;
        };
        if Some(owner) == ctx.model.active_vessel() {
            return false;
        }

        warn!("focused vessel {owner:?} is not the active vessel");
        ctx.notifier
            .post_message(MISMATCH_WARNING, WARNING_SECS, Placement::UpperCenter);
        true
    }

    /// Live owner of the target, falling back to the last observed one
    fn target_owner(&mut self, ctx: &FocusContext<'_>) -> Option<VesselHandle> {
        let target = self.session.target.as_mut()?;
        if let Some(owner) = ctx.model.owner_of(target.object) {
            target.owner = Some(owner);
        }
        target.owner
    }

    fn drop_stale_target(&mut self, ctx: &mut FocusContext<'_>) {
        let Some(target) = self.session.target else {
            return;
        };
        let live = ctx.model.is_live(target.object)
            && ctx.model.object_position(target.object).is_some();
        if !live {
            warn!("focus target {:?} no longer resolves, resetting", target.object);
            self.reset_focus(ctx);
        }
    }

    /// Returning to the vessel or crossing to another vessel gets the constant boost
    fn needs_boost(
        &mut self,
        ctx: &FocusContext<'_>,
        active_vessel: Option<VesselHandle>,
    ) -> bool {
        if self.session.target.is_none() {
            return true;
        }
        matches!(self.target_owner(ctx), Some(owner) if Some(owner) != active_vessel)
    }
}

impl Default for FocusStateMachine {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
