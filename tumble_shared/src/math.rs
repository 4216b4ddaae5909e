//! Math types.
//!
//! Pointer-space vectors for the on-screen controls. Kept small; the
//! piece grid itself uses integer coordinates (see `shape`).

use serde::{Deserialize, Serialize};

/// 2D vector in pointer (screen) units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn len(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Clamps each component independently into `[-limit, limit]`.
    pub fn clamp_components(self, limit: f32) -> Self {
        Self::new(self.x.clamp(-limit, limit), self.y.clamp(-limit, limit))
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Wraps a signed angle difference into `[-180, 180]`.
pub fn wrap_delta_degrees(delta: f32) -> f32 {
    if delta > 180.0 {
        delta - 360.0
    } else if delta < -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_per_component() {
        let v = Vec2::new(40.0, -3.0).clamp_components(24.0);
        assert_eq!(v, Vec2::new(24.0, -3.0));
    }

    #[test]
    fn degrees_normalize_into_positive_turn() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
    }

    #[test]
    fn delta_wraps_across_seam() {
        assert_eq!(wrap_delta_degrees(350.0), -10.0);
        assert_eq!(wrap_delta_degrees(-350.0), 10.0);
        assert_eq!(wrap_delta_degrees(180.0), 180.0);
    }
}
