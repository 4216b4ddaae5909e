//! Pointer input.
//!
//! Raw pointer events as the controls see them. Pointer identity is carried
//! on every event so each control can own exactly one pointer at a time
//! without shared "dragging" flags.

use serde::{Deserialize, Serialize};
use tumble_shared::math::Vec2;

/// Identifies one physical pointer (finger, pen, mouse) for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub i32);

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One sampled pointer event, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn down(id: i32, x: f32, y: f32) -> Self {
        Self::new(id, PointerPhase::Down, x, y)
    }

    pub fn moved(id: i32, x: f32, y: f32) -> Self {
        Self::new(id, PointerPhase::Move, x, y)
    }

    pub fn up(id: i32) -> Self {
        Self::new(id, PointerPhase::Up, 0.0, 0.0)
    }

    pub fn cancel(id: i32) -> Self {
        Self::new(id, PointerPhase::Cancel, 0.0, 0.0)
    }

    fn new(id: i32, phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            id: PointerId(id),
            phase,
            position: Vec2::new(x, y),
        }
    }
}
