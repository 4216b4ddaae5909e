//! Rotation ring drag gestures.
//!
//! Each axis has a ring around a shared center. Dragging a ring reports the
//! angle swept since pointer-down to the axis controller; releasing resets
//! the axis. One drag per ring, keyed by pointer id, so different fingers
//! can work different rings at the same time.

use tracing::trace;
use tumble_shared::math::{normalize_degrees, wrap_delta_degrees, Vec2};

use crate::{
    axis::{Axis, AxisController, RotationSink},
    input::PointerId,
};

/// Ring angle of `position` around `center`: 0 at the top, clockwise,
/// in `[0, 360)`.
pub fn ring_angle(center: Vec2, position: Vec2) -> f32 {
    let d = position - center;
    normalize_degrees(d.y.atan2(d.x).to_degrees() + 90.0)
}

/// Point on a ring of `radius` at ring angle `degrees`.
pub fn ring_point(center: Vec2, radius: f32, degrees: f32) -> Vec2 {
    let r = degrees.to_radians();
    Vec2::new(center.x + radius * r.sin(), center.y - radius * r.cos())
}

#[derive(Debug, Clone, Copy)]
struct RingDrag {
    pointer: PointerId,
    start_angle: f32,
    current_angle: f32,
}

/// Drag tracking for the three axis rings.
#[derive(Debug, Clone)]
pub struct AxisRings {
    center: Vec2,
    drags: [Option<RingDrag>; 3],
}

impl AxisRings {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            drags: [None; 3],
        }
    }

    fn find(&self, id: PointerId) -> Option<Axis> {
        Axis::ALL
            .into_iter()
            .find(|a| matches!(self.drags[a.index()], Some(d) if d.pointer == id))
    }

    /// Swept angle of the ring being dragged on `axis`, for ring visuals.
    pub fn drag_angle(&self, axis: Axis) -> Option<f32> {
        self.drags[axis.index()].map(|d| d.current_angle)
    }

    pub fn is_dragging(&self, axis: Axis) -> bool {
        self.drags[axis.index()].is_some()
    }

    /// Starts a drag of `axis` by pointer `id`.
    ///
    /// Returns false when the ring is already held or the pointer is
    /// already dragging another ring.
    pub fn pointer_down(&mut self, axis: Axis, id: PointerId, position: Vec2) -> bool {
        if self.is_dragging(axis) || self.find(id).is_some() {
            trace!(%axis, ?id, "ring drag refused");
            return false;
        }
        self.drags[axis.index()] = Some(RingDrag {
            pointer: id,
            start_angle: ring_angle(self.center, position),
            current_angle: 0.0,
        });
        true
    }

    /// Feeds a move of pointer `id` to the controller, if it drags a ring.
    pub fn pointer_move<S: RotationSink>(
        &mut self,
        ctl: &mut AxisController<S>,
        id: PointerId,
        position: Vec2,
    ) {
        let Some(axis) = self.find(id) else {
            return;
        };
        let center = self.center;
        let Some(drag) = self.drags[axis.index()].as_mut() else {
            return;
        };
        let delta = wrap_delta_degrees(ring_angle(center, position) - drag.start_angle);
        drag.current_angle = delta;
        ctl.set_axis_angle(axis, delta);
    }

    /// Ends the drag of pointer `id` and resets its axis.
    pub fn pointer_up<S: RotationSink>(&mut self, ctl: &mut AxisController<S>, id: PointerId) {
        let Some(axis) = self.find(id) else {
            return;
        };
        self.drags[axis.index()] = None;
        ctl.reset_axis(axis);
    }
}
