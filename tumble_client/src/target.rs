//! Control target.
//!
//! The piece and play-space state the controls act on. Implements
//! `RotationSink` so an `AxisController` can drive it directly, and applies
//! pad and fast-drop signals as unit moves.

use serde::{Deserialize, Serialize};
use tracing::trace;
use tumble_shared::shape::{Coord, Shape};

use crate::{
    axis::{PieceRotation, RoomAxis, RotationSink},
    repeat::PadDirection,
};

/// Falling piece: normalized shape plus grid position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub shape: Shape,
    pub position: Coord,
}

impl Piece {
    pub fn new(shape: Shape, position: Coord) -> Self {
        Self {
            shape: shape.normalize(),
            position,
        }
    }

    /// Applies one discrete rotation; the result is normalized.
    pub fn rotate(&mut self, rotation: PieceRotation) {
        let turned = match rotation {
            PieceRotation::RollLeft => self.shape.topple_roll_left(),
            PieceRotation::RollRight => self.shape.topple_roll_right(),
            PieceRotation::PitchForward => self.shape.topple_pitch_forward(),
            PieceRotation::PitchBack => self.shape.topple_pitch_back(),
            PieceRotation::YawLeft => self.shape.rotate_yaw_left(),
            PieceRotation::YawRight => self.shape.rotate_yaw_right(),
        };
        self.shape = turned.normalize();
    }

    pub fn shift(&mut self, direction: PadDirection) {
        self.position = match direction {
            PadDirection::Up => self.position.move_back(),
            PadDirection::Down => self.position.move_forw(),
            PadDirection::Left => self.position.move_left(),
            PadDirection::Right => self.position.move_right(),
        };
    }

    pub fn drop_one(&mut self) {
        self.position = self.position.move_down();
    }
}

/// Accumulated play-space orientation, degrees per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RoomOrientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RoomOrientation {
    pub fn rotate(&mut self, axis: RoomAxis, degrees: f32) {
        match axis {
            RoomAxis::X => self.x += degrees,
            RoomAxis::Y => self.y += degrees,
            RoomAxis::Z => self.z += degrees,
        }
    }
}

/// Everything the controls mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlTarget {
    pub piece: Piece,
    pub room: RoomOrientation,
    pub clicks: u32,
}

impl ControlTarget {
    pub fn new(piece: Piece) -> Self {
        Self {
            piece,
            room: RoomOrientation::default(),
            clicks: 0,
        }
    }

    pub fn apply_pad(&mut self, direction: PadDirection) {
        trace!(?direction, "pad move");
        self.piece.shift(direction);
    }

    pub fn apply_fast_drop(&mut self) {
        trace!("fast drop");
        self.piece.drop_one();
    }
}

impl RotationSink for ControlTarget {
    fn rotate_piece(&mut self, rotation: PieceRotation) {
        self.piece.rotate(rotation);
    }

    fn rotate_room(&mut self, axis: RoomAxis, degrees: f32) {
        self.room.rotate(axis, degrees);
    }

    fn play_click(&mut self) {
        self.clicks += 1;
    }
}

#[cfg(test)]
mod tests {
    use tumble_shared::shape::TetrominoKind;

    use super::*;

    fn target(kind: TetrominoKind) -> ControlTarget {
        ControlTarget::new(Piece::new(kind.shape(), Coord::new(4, 4, 10)))
    }

    #[test]
    fn rotations_keep_piece_normalized() {
        let mut t = target(TetrominoKind::T);
        for rotation in [
            PieceRotation::RollLeft,
            PieceRotation::PitchBack,
            PieceRotation::YawRight,
        ] {
            t.rotate_piece(rotation);
            assert_eq!(t.piece.shape.min_corner(), Some(Coord::ORIGIN));
        }
    }

    #[test]
    fn opposite_rotations_restore_shape() {
        let mut t = target(TetrominoKind::S);
        let before = t.piece.shape.clone();
        t.rotate_piece(PieceRotation::PitchForward);
        assert!(!t.piece.shape.same_cells(&before));
        t.rotate_piece(PieceRotation::PitchBack);
        assert!(t.piece.shape.same_cells(&before));
    }

    #[test]
    fn pad_and_drop_move_position() {
        let mut t = target(TetrominoKind::O);
        t.apply_pad(PadDirection::Right);
        t.apply_pad(PadDirection::Up);
        t.apply_fast_drop();
        assert_eq!(t.piece.position, Coord::new(5, 3, 9));
    }

    #[test]
    fn room_rotation_accumulates() {
        let mut t = target(TetrominoKind::I);
        t.rotate_room(RoomAxis::X, -10.0);
        t.rotate_room(RoomAxis::X, -20.0);
        t.rotate_room(RoomAxis::Z, 5.0);
        assert_eq!(
            t.room,
            RoomOrientation {
                x: -30.0,
                y: 0.0,
                z: 5.0
            }
        );
    }
}
