//! `tumble_client`
//!
//! Client-side controls:
//! - Pointer input types
//! - Repeat-input controls (directional pad, fast drop)
//! - Axis rings and the axis controller (gesture -> rotation commands)
//! - The control target those commands are applied to

pub mod axis;
pub mod input;
pub mod repeat;
pub mod ring;
pub mod target;

pub use axis::AxisController;
pub use repeat::{FastDropController, PadController};
