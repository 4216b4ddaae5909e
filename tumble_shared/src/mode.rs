//! Mode controller.
//!
//! Two states: `Tetromino` (initial) and `Room`. `toggle(room_requested)`
//! sets the state and notifies observers synchronously in registration
//! order, on every call. There is no terminal state.

use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    container::{ContainerKind, ControlContainer},
    event::Observers,
};

/// What axis drags act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Drags rotate the falling piece in discrete steps.
    #[default]
    Tetromino,
    /// Drags rotate the whole play space continuously.
    Room,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Tetromino => write!(f, "tetromino"),
            Mode::Room => write!(f, "room"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tetromino" => Ok(Mode::Tetromino),
            "room" => Ok(Mode::Room),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Error type for parsing a `Mode` name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode: {} (expected tetromino or room)", self.0)
    }
}

impl std::error::Error for ParseModeError {}

/// Read side of the mode controller, as consumed by the axis controller.
pub trait ModeSource {
    fn current_mode(&self) -> Mode;
}

#[derive(Default)]
struct ModeState {
    current: Mode,
    observers: Observers<Mode>,
}

/// Shared handle to the mode state machine.
#[derive(Clone, Default)]
pub struct ModeController {
    inner: Rc<RefCell<ModeState>>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_mode(&self) -> Mode {
        self.inner.borrow().current
    }

    /// Switches to `Room` when requested, `Tetromino` otherwise.
    pub fn toggle(&self, room_requested: bool) {
        let mode = if room_requested { Mode::Room } else { Mode::Tetromino };
        let listeners = {
            let mut state = self.inner.borrow_mut();
            state.current = mode;
            state.observers.snapshot()
        };
        debug!(%mode, "mode changed");
        for listener in listeners {
            listener(&mode);
        }
    }

    pub fn on_mode_changed(&self, observer: impl Fn(&Mode) + 'static) {
        self.inner.borrow_mut().observers.subscribe(observer);
    }

    /// Binds the mode switch container's toggle input to `toggle`.
    ///
    /// Containers of any other kind are ignored.
    pub fn notify_setup_finished(&self, container: &ControlContainer) {
        if container.kind() != ContainerKind::ModeSwitch {
            debug!(kind = ?container.kind(), "mode switch setup ignored");
            return;
        }
        let this = self.clone();
        container.toggle().on_change(move |checked| this.toggle(*checked));
    }
}

impl ModeSource for ModeController {
    fn current_mode(&self) -> Mode {
        ModeController::current_mode(self)
    }
}

impl fmt::Debug for ModeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeController")
            .field("current", &self.current_mode())
            .finish()
    }
}
