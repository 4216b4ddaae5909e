//! Axis controller.
//!
//! Turns continuous ring-drag angles (roll, pitch, yaw) into rotation
//! commands:
//! - tetromino mode: every full threshold step of drag angle fires one
//!   discrete piece rotation, signed by drag direction;
//! - room mode: the per-update angle delta rotates the play space.
//!
//! Gestures only take effect while this participant holds authority. An
//! unclaimed authority is claimed by the first gesture that arrives.

use std::{
    fmt,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use tumble_shared::{
    authority::Authority,
    config::{ConfigError, ControlsConfig},
    container::{ContainerKind, ControlContainer},
    event::{Observers, SetupLatch},
    mode::{Mode, ModeSource},
};

/// Container attribute mirroring who holds authority (`self` / `other`).
pub const IN_CHARGE_ATTR: &str = "in-charge";

/// Rotation axis of a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Roll,
    Pitch,
    Yaw,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    pub(crate) fn index(self) -> usize {
        match self {
            Axis::Roll => 0,
            Axis::Pitch => 1,
            Axis::Yaw => 2,
        }
    }

    /// Discrete rotations fired for negative and positive steps.
    pub fn piece_rotations(self) -> (PieceRotation, PieceRotation) {
        match self {
            Axis::Roll => (PieceRotation::RollLeft, PieceRotation::RollRight),
            Axis::Pitch => (PieceRotation::PitchForward, PieceRotation::PitchBack),
            Axis::Yaw => (PieceRotation::YawLeft, PieceRotation::YawRight),
        }
    }

    /// Room axis driven by this ring in room mode.
    pub fn room_axis(self) -> RoomAxis {
        match self {
            Axis::Roll => RoomAxis::Z,
            Axis::Pitch => RoomAxis::X,
            Axis::Yaw => RoomAxis::Y,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Roll => write!(f, "roll"),
            Axis::Pitch => write!(f, "pitch"),
            Axis::Yaw => write!(f, "yaw"),
        }
    }
}

/// Discrete 90 degree piece rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceRotation {
    RollLeft,
    RollRight,
    PitchForward,
    PitchBack,
    YawLeft,
    YawRight,
}

/// Play-space rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomAxis {
    X,
    Y,
    Z,
}

/// Axis feedback event for the ring views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    pub axis: Axis,
    pub angle: f32,
}

/// Receiver of the commands produced by the axis controller.
pub trait RotationSink {
    fn rotate_piece(&mut self, rotation: PieceRotation);

    /// Rotates the play space by `degrees` around `axis`.
    fn rotate_room(&mut self, axis: RoomAxis, degrees: f32);

    /// Audible cue, once per update that fires piece rotations.
    fn play_click(&mut self) {}
}

/// Collaborators the axis controller is wired to.
pub struct AxisDependencies<S> {
    pub sink: S,
    pub authority: Rc<dyn Authority>,
    pub mode: Rc<dyn ModeSource>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AxisTrack {
    angle: f32,
    applied_rotations: i64,
    last_room_angle: f32,
}

/// Signed count of whole threshold steps in `angle`.
///
/// Saturates at the `i64` range for absurd angles.
pub fn target_rotations(angle: f32, threshold: f32) -> i64 {
    let steps = (f64::from(angle).abs() / f64::from(threshold)).floor() as i64;
    if angle >= 0.0 {
        steps
    } else {
        -steps
    }
}

/// Number of quarter turns to fire for a step difference of `diff`.
///
/// Four quarter turns are the identity, so a jump of more than one full
/// turn fires only its remainder; the resulting orientation is the same.
fn quarter_turns(diff: i64) -> u64 {
    let n = diff.unsigned_abs();
    if n > 4 {
        n % 4
    } else {
        n
    }
}

/// Gesture-to-rotation state machine for the three axis rings.
pub struct AxisController<S> {
    sink: S,
    authority: Rc<dyn Authority>,
    mode: Rc<dyn ModeSource>,
    threshold: f32,
    pitch_inverted: bool,
    tracks: [AxisTrack; 3],
    state_observers: Observers<AxisState>,
    setup: SetupLatch<ControlContainer>,
}

impl<S: RotationSink> AxisController<S> {
    /// Wires a controller to its collaborators. Fails on an invalid config.
    pub fn new(deps: AxisDependencies<S>, cfg: &ControlsConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let AxisDependencies {
            sink,
            authority,
            mode,
        } = deps;

        let mut setup = SetupLatch::new();
        let sync_authority = Rc::downgrade(&authority);
        setup.subscribe(move |container: &ControlContainer| {
            sync_in_charge(&sync_authority, container.clone());
        });

        Ok(Self {
            sink,
            authority,
            mode,
            threshold: cfg.rotation_threshold_deg,
            pitch_inverted: cfg.room_pitch_inverted,
            tracks: [AxisTrack::default(); 3],
            state_observers: Observers::new(),
            setup,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        self.tracks[axis.index()].angle
    }

    pub fn applied_rotations(&self, axis: Axis) -> i64 {
        self.tracks[axis.index()].applied_rotations
    }

    pub fn last_room_angle(&self, axis: Axis) -> f32 {
        self.tracks[axis.index()].last_room_angle
    }

    fn ensure_in_charge(&self) -> bool {
        if self.authority.are_we_in_charge() {
            return true;
        }
        self.authority.take_charge();
        self.authority.are_we_in_charge()
    }

    /// Reports the current drag angle (degrees) of `axis`.
    ///
    /// Without authority the call has no effect at all.
    pub fn set_axis_angle(&mut self, axis: Axis, angle: f32) {
        if !angle.is_finite() {
            debug!(%axis, angle, "non-finite angle ignored");
            return;
        }
        if !self.ensure_in_charge() {
            debug!(%axis, "gesture dropped, not in charge");
            return;
        }

        let i = axis.index();
        self.tracks[i].angle = angle;
        self.state_observers.notify(&AxisState { axis, angle });

        match self.mode.current_mode() {
            Mode::Room => {
                let delta = angle - self.tracks[i].last_room_angle;
                self.tracks[i].last_room_angle = angle;
                let degrees = if axis == Axis::Pitch && self.pitch_inverted {
                    -delta
                } else {
                    delta
                };
                self.sink.rotate_room(axis.room_axis(), degrees);
            }
            Mode::Tetromino => {
                let target = target_rotations(angle, self.threshold);
                let applied = self.tracks[i].applied_rotations;
                if target == applied {
                    return;
                }

                let diff = target.saturating_sub(applied);
                let (left, right) = axis.piece_rotations();
                let rotation = if diff > 0 { right } else { left };
                trace!(%axis, angle, diff, ?rotation, "threshold crossed");

                self.sink.play_click();
                for _ in 0..quarter_turns(diff) {
                    self.sink.rotate_piece(rotation);
                }
                self.tracks[i].applied_rotations = target;
            }
        }
    }

    /// Ends the gesture on `axis`: zeroes its tracking and reports angle 0.
    pub fn reset_axis(&mut self, axis: Axis) {
        self.tracks[axis.index()] = AxisTrack::default();
        self.state_observers.notify(&AxisState { axis, angle: 0.0 });
    }

    pub fn on_axis_state_changed(&mut self, observer: impl Fn(&AxisState) + 'static) {
        self.state_observers.subscribe(observer);
    }

    /// Runs `callback` with the rings container once setup has happened
    /// (immediately, if it already has).
    pub fn on_setup_finished(&mut self, callback: impl FnOnce(&ControlContainer) + 'static) {
        self.setup.subscribe(callback);
    }

    /// Hands over the mounted rings container. Containers of any other
    /// kind are ignored.
    pub fn notify_setup_finished(&mut self, container: &ControlContainer) {
        if container.kind() != ContainerKind::AxisRings {
            debug!(kind = ?container.kind(), "axis setup ignored");
            return;
        }
        self.setup.complete(container.clone());
    }
}

/// Mirrors authority into the container's `in-charge` attribute, now and
/// on every change of the active player.
///
/// The registered callback holds the authority weakly: an authority that
/// owns the notifier would otherwise keep itself alive.
fn sync_in_charge(authority: &Weak<dyn Authority>, container: ControlContainer) {
    let Some(strong) = authority.upgrade() else {
        return;
    };
    let watched = authority.clone();
    let update = move || {
        let Some(watched) = watched.upgrade() else {
            return;
        };
        let value = if watched.are_we_in_charge() { "self" } else { "other" };
        container.set_attribute(IN_CHARGE_ATTR, value);
    };
    update();
    strong.on_active_player_changed(Box::new(update));
}
