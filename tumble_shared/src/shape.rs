//! Shape transform engine.
//!
//! Pure functions over integer unit-cube coordinates. A `Shape` is one
//! rigid piece configuration; every transform returns a new shape.
//!
//! Rotations are 90 degree axis swaps with a sign flip. Each comes in an
//! inverse pair:
//! - roll (x/z plane): `topple_roll_left` / `topple_roll_right`
//! - pitch (y/z plane): `topple_pitch_forward` / `topple_pitch_back`
//! - yaw (x/y plane): `rotate_yaw_left` / `rotate_yaw_right`
//!
//! Rotations may produce negative coordinates, so callers normalize after
//! every rotation.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Position of one unit cube relative to a piece origin (or of a piece in
/// the play space).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn move_left(self) -> Self {
        Self::new(self.x - 1, self.y, self.z)
    }

    pub const fn move_right(self) -> Self {
        Self::new(self.x + 1, self.y, self.z)
    }

    pub const fn move_back(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }

    pub const fn move_forw(self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }

    pub const fn move_down(self) -> Self {
        Self::new(self.x, self.y, self.z - 1)
    }
}

/// Ordered collection of unit cubes forming one piece configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Shape {
    cells: Vec<Coord>,
}

impl Shape {
    pub fn new(cells: Vec<Coord>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells as an order-independent set.
    pub fn cell_set(&self) -> BTreeSet<Coord> {
        self.cells.iter().copied().collect()
    }

    /// Compares two shapes as coordinate sets.
    pub fn same_cells(&self, other: &Shape) -> bool {
        self.cell_set() == other.cell_set()
    }

    /// Per-axis minimum, or `None` for an empty shape.
    pub fn min_corner(&self) -> Option<Coord> {
        let first = *self.cells.first()?;
        Some(self.cells.iter().fold(first, |m, c| {
            Coord::new(m.x.min(c.x), m.y.min(c.y), m.z.min(c.z))
        }))
    }

    fn map(&self, f: impl Fn(Coord) -> Coord) -> Shape {
        Shape::new(self.cells.iter().copied().map(f).collect())
    }

    /// Translates the shape flush against the origin on every axis.
    pub fn normalize(&self) -> Shape {
        match self.min_corner() {
            Some(min) => self.map(|c| Coord::new(c.x - min.x, c.y - min.y, c.z - min.z)),
            None => self.clone(),
        }
    }

    /// Roll to the left: (x, y, z) -> (-z, y, x).
    pub fn topple_roll_left(&self) -> Shape {
        self.map(|c| Coord::new(-c.z, c.y, c.x))
    }

    /// Inverse of `topple_roll_left`: (x, y, z) -> (z, y, -x).
    pub fn topple_roll_right(&self) -> Shape {
        self.map(|c| Coord::new(c.z, c.y, -c.x))
    }

    /// Pitch forward: (x, y, z) -> (x, z, -y).
    pub fn topple_pitch_forward(&self) -> Shape {
        self.map(|c| Coord::new(c.x, c.z, -c.y))
    }

    /// Inverse of `topple_pitch_forward`: (x, y, z) -> (x, -z, y).
    pub fn topple_pitch_back(&self) -> Shape {
        self.map(|c| Coord::new(c.x, -c.z, c.y))
    }

    /// Yaw counter-clockwise around z: (x, y, z) -> (y, -x, z).
    pub fn rotate_yaw_left(&self) -> Shape {
        self.map(|c| Coord::new(c.y, -c.x, c.z))
    }

    /// Inverse of `rotate_yaw_left`: (x, y, z) -> (-y, x, z).
    pub fn rotate_yaw_right(&self) -> Shape {
        self.map(|c| Coord::new(-c.y, c.x, c.z))
    }
}

impl FromIterator<Coord> for Shape {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Shape::new(iter.into_iter().collect())
    }
}

/// Classic flat tetrominoes, laid out in the z = 0 plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::J,
        TetrominoKind::L,
    ];

    pub fn shape(self) -> Shape {
        let xy: [(i32, i32); 4] = match self {
            TetrominoKind::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
            TetrominoKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            TetrominoKind::T => [(0, 0), (1, 0), (2, 0), (1, 1)],
            TetrominoKind::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
            TetrominoKind::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
            TetrominoKind::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
            TetrominoKind::L => [(2, 0), (0, 1), (1, 1), (2, 1)],
        };
        xy.iter().map(|&(x, y)| Coord::new(x, y, 0)).collect()
    }
}

impl std::str::FromStr for TetrominoKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Ok(TetrominoKind::I),
            "O" => Ok(TetrominoKind::O),
            "T" => Ok(TetrominoKind::T),
            "S" => Ok(TetrominoKind::S),
            "Z" => Ok(TetrominoKind::Z),
            "J" => Ok(TetrominoKind::J),
            "L" => Ok(TetrominoKind::L),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Error type for parsing a `TetrominoKind` letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tetromino kind: {} (expected one of IOTSZJL)", self.0)
    }
}

impl std::error::Error for ParseKindError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn skewed() -> Shape {
        // Off-origin, non-planar, asymmetric.
        Shape::new(vec![
            Coord::new(3, -2, 5),
            Coord::new(4, -2, 5),
            Coord::new(4, -1, 5),
            Coord::new(4, -1, 6),
        ])
    }

    fn assert_flush(shape: &Shape) {
        assert!(shape.cells().iter().all(|c| c.x >= 0 && c.y >= 0 && c.z >= 0));
        assert_eq!(shape.min_corner(), Some(Coord::ORIGIN));
    }

    #[test]
    fn normalize_is_flush_to_origin() {
        let n = skewed().normalize();
        assert_flush(&n);
        assert_eq!(n.cells()[0], Coord::new(0, 0, 0));
        assert_eq!(n.cells()[3], Coord::new(1, 1, 1));
    }

    #[test]
    fn normalize_keeps_input_untouched() {
        let s = skewed();
        let before = s.clone();
        let _ = s.normalize();
        assert_eq!(s, before);
    }

    #[test]
    fn normalize_empty_shape_is_empty() {
        assert!(Shape::default().normalize().is_empty());
    }

    #[test]
    fn roll_pair_is_inverse() {
        let s = skewed().normalize();
        assert!(s.topple_roll_left().topple_roll_right().normalize().same_cells(&s));
        assert!(s.topple_roll_right().topple_roll_left().normalize().same_cells(&s));
    }

    #[test]
    fn pitch_pair_is_inverse() {
        let s = skewed().normalize();
        assert!(s.topple_pitch_forward().topple_pitch_back().normalize().same_cells(&s));
        assert!(s.topple_pitch_back().topple_pitch_forward().normalize().same_cells(&s));
    }

    #[test]
    fn yaw_pair_is_inverse() {
        let s = skewed().normalize();
        assert!(s.rotate_yaw_left().rotate_yaw_right().normalize().same_cells(&s));
        assert!(s.rotate_yaw_right().rotate_yaw_left().normalize().same_cells(&s));
    }

    #[test]
    fn inverse_holds_across_catalog() {
        for kind in TetrominoKind::ALL {
            let s = kind.shape().normalize();
            let round = s.topple_roll_left().normalize().topple_roll_right().normalize();
            assert!(round.same_cells(&s), "{kind:?}");
        }
    }

    #[test]
    fn roll_left_maps_single_cell() {
        let s = Shape::new(vec![Coord::new(1, 2, 3)]);
        assert_eq!(s.topple_roll_left().cells(), &[Coord::new(-3, 2, 1)]);
        assert_eq!(s.topple_pitch_forward().cells(), &[Coord::new(1, 3, -2)]);
        assert_eq!(s.rotate_yaw_left().cells(), &[Coord::new(2, -1, 3)]);
    }

    #[test]
    fn four_yaw_turns_are_identity() {
        let s = TetrominoKind::L.shape();
        let turned = s
            .rotate_yaw_left()
            .rotate_yaw_left()
            .rotate_yaw_left()
            .rotate_yaw_left();
        assert_eq!(turned, s);
    }

    #[test]
    fn rolled_i_piece_stands_upright() {
        let upright = TetrominoKind::I.shape().topple_roll_left().normalize();
        assert_flush(&upright);
        assert!(upright.cells().iter().all(|c| c.x == 0 && c.y == 0));
        let zs: BTreeSet<i32> = upright.cells().iter().map(|c| c.z).collect();
        assert_eq!(zs, (0..4).collect::<BTreeSet<i32>>());
    }

    #[test]
    fn position_moves_are_unit_steps() {
        let p = Coord::new(2, 2, 5);
        assert_eq!(p.move_left(), Coord::new(1, 2, 5));
        assert_eq!(p.move_right(), Coord::new(3, 2, 5));
        assert_eq!(p.move_back(), Coord::new(2, 1, 5));
        assert_eq!(p.move_forw(), Coord::new(2, 3, 5));
        assert_eq!(p.move_down(), Coord::new(2, 2, 4));
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("t".parse::<TetrominoKind>(), Ok(TetrominoKind::T));
        let err = "q".parse::<TetrominoKind>().unwrap_err();
        assert_eq!(err, ParseKindError("q".to_string()));
        assert!(err.to_string().contains("IOTSZJL"));
    }
}
