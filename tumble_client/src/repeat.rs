//! Continuous-repeat input.
//!
//! A control that owns one pointer at a time, classifies its position into
//! a direction, emits that direction immediately and then again on a fixed
//! interval until the direction changes or the pointer is released.
//!
//! Two instantiations:
//! - `PadController`: 4-way directional pad with a dead zone.
//! - `FastDropController`: single press-and-hold button.
//!
//! Emissions (immediate and repeated) go out in order on one unbounded
//! channel per controller. The repeat runs as a tokio task; controllers must
//! be driven from inside a tokio runtime.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::{debug, trace};
use tumble_shared::{
    config::{ConfigError, ControlsConfig},
    math::Vec2,
};

use crate::input::{PointerEvent, PointerId, PointerPhase};

/// Output of a repeat-input control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputSignal<D> {
    /// Current direction; `None` once the control goes idle.
    Direction(Option<D>),
    /// Knob offset from the control center, for visual feedback.
    CenterOffset(Vec2),
}

/// Receiving end of a controller's signal stream.
pub type SignalReceiver<D> = mpsc::UnboundedReceiver<InputSignal<D>>;

/// Result of classifying one pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<D> {
    pub direction: Option<D>,
    /// Visual offset, for controls that show one.
    pub offset: Option<Vec2>,
}

/// Maps a pointer position to a direction.
pub trait Classifier {
    type Direction: Copy + PartialEq + fmt::Debug + Send + 'static;

    fn classify(&self, position: Vec2) -> Classification<Self::Direction>;

    /// Whether the control reports a center offset that must be reset on
    /// release.
    fn tracks_offset(&self) -> bool {
        false
    }
}

/// Pad direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Directional pad geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalPad {
    pub center: Vec2,
    pub dead_zone: f32,
    pub visual_limit: f32,
}

impl DirectionalPad {
    pub fn new(center: Vec2, cfg: &ControlsConfig) -> Self {
        Self {
            center,
            dead_zone: cfg.pad_dead_zone,
            visual_limit: cfg.pad_visual_limit,
        }
    }
}

impl Classifier for DirectionalPad {
    type Direction = PadDirection;

    fn classify(&self, position: Vec2) -> Classification<PadDirection> {
        let offset = position - self.center;
        let visual = offset.clamp_components(self.visual_limit);

        let direction = if offset.len() < self.dead_zone {
            None
        } else if offset.x.abs() > offset.y.abs() {
            Some(if offset.x > 0.0 {
                PadDirection::Right
            } else {
                PadDirection::Left
            })
        } else {
            // Exact diagonals resolve vertically.
            Some(if offset.y > 0.0 {
                PadDirection::Down
            } else {
                PadDirection::Up
            })
        };

        Classification {
            direction,
            offset: Some(visual),
        }
    }

    fn tracks_offset(&self) -> bool {
        true
    }
}

/// The fast-drop button's only direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Press;

/// Press-and-hold button: pressed anywhere is pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastDrop;

impl Classifier for FastDrop {
    type Direction = Press;

    fn classify(&self, _position: Vec2) -> Classification<Press> {
        Classification {
            direction: Some(Press),
            offset: None,
        }
    }
}

/// Repeating emission task. Aborted on drop.
struct RepeatTask {
    handle: JoinHandle<()>,
}

impl RepeatTask {
    /// `period` must be non-zero; `RepeatInput::new` rejects zero.
    fn spawn<D>(
        period: Duration,
        direction: D,
        tx: mpsc::UnboundedSender<InputSignal<D>>,
    ) -> Self
    where
        D: Copy + Send + 'static,
    {
        let first = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(first, period);
            loop {
                ticker.tick().await;
                if tx.send(InputSignal::Direction(Some(direction))).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for RepeatTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Single-pointer repeat-input controller.
pub struct RepeatInput<C: Classifier> {
    classifier: C,
    period: Duration,
    active: Option<PointerId>,
    current: Option<C::Direction>,
    offset: Vec2,
    repeat: Option<RepeatTask>,
    tx: mpsc::UnboundedSender<InputSignal<C::Direction>>,
}

pub type PadController = RepeatInput<DirectionalPad>;
pub type FastDropController = RepeatInput<FastDrop>;

impl PadController {
    /// Directional pad centered at `center`. Fails on an invalid config.
    pub fn pad(
        center: Vec2,
        cfg: &ControlsConfig,
    ) -> Result<(Self, SignalReceiver<PadDirection>), ConfigError> {
        cfg.validate()?;
        Self::new(DirectionalPad::new(center, cfg), cfg.pad_repeat())
    }
}

impl FastDropController {
    /// Fast-drop button. Fails on an invalid config.
    pub fn fast_drop(cfg: &ControlsConfig) -> Result<(Self, SignalReceiver<Press>), ConfigError> {
        cfg.validate()?;
        Self::new(FastDrop, cfg.fast_drop_repeat())
    }
}

impl<C: Classifier> RepeatInput<C> {
    /// Creates a controller and the receiving end of its signal stream.
    ///
    /// A zero `period` is rejected: the repeat timer cannot tick at it.
    pub fn new(
        classifier: C,
        period: Duration,
    ) -> Result<(Self, SignalReceiver<C::Direction>), ConfigError> {
        if period.is_zero() {
            return Err(ConfigError::RepeatInterval);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        let ctl = Self {
            classifier,
            period,
            active: None,
            current: None,
            offset: Vec2::ZERO,
            repeat: None,
            tx,
        };
        Ok((ctl, rx))
    }

    pub fn current_direction(&self) -> Option<C::Direction> {
        self.current
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Dispatches a raw pointer event.
    pub fn handle(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event.id, event.position),
            PointerPhase::Move => self.pointer_move(event.id, event.position),
            PointerPhase::Up | PointerPhase::Cancel => self.pointer_up(event.id),
        }
    }

    /// Claims the control for `id`. Ignored while another pointer owns it.
    pub fn pointer_down(&mut self, id: PointerId, position: Vec2) {
        if let Some(owner) = self.active {
            if owner != id {
                trace!(?owner, ?id, "pointer down ignored, control owned");
                return;
            }
        }
        self.active = Some(id);
        debug!(?id, "pointer claimed control");
        self.update(position);
    }

    pub fn pointer_move(&mut self, id: PointerId, position: Vec2) {
        if self.active != Some(id) {
            return;
        }
        self.update(position);
    }

    /// Releases the control if `id` owns it.
    pub fn pointer_up(&mut self, id: PointerId) {
        if self.active != Some(id) {
            trace!(?id, "release ignored, pointer not owner");
            return;
        }
        self.active = None;
        debug!(?id, "pointer released control");
        self.set_direction(None);
        if self.classifier.tracks_offset() {
            self.set_offset(Vec2::ZERO);
        }
    }

    fn update(&mut self, position: Vec2) {
        let Classification { direction, offset } = self.classifier.classify(position);
        if let Some(offset) = offset {
            self.set_offset(offset);
        }
        self.set_direction(direction);
    }

    fn set_offset(&mut self, offset: Vec2) {
        if self.offset == offset {
            return;
        }
        self.offset = offset;
        self.emit(InputSignal::CenterOffset(offset));
    }

    fn set_direction(&mut self, direction: Option<C::Direction>) {
        if self.current == direction {
            return;
        }
        self.current = direction;
        // Dropping the old task cancels it.
        self.repeat = None;
        self.emit(InputSignal::Direction(direction));
        if let Some(direction) = direction {
            let period_ms = self.period.as_millis() as u64;
            trace!(?direction, period_ms, "repeat armed");
            self.repeat = Some(RepeatTask::spawn(self.period, direction, self.tx.clone()));
        }
    }

    fn emit(&self, signal: InputSignal<C::Direction>) {
        // Receiver gone means nobody is listening; the control stays usable.
        let _ = self.tx.send(signal);
    }
}
