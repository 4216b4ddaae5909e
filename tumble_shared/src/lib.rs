//! `tumble_shared`
//!
//! Shared libraries for the block-stacking control layer.
//!
//! Design goals:
//! - Pure geometry where possible (shape transforms never mutate).
//! - Single-threaded reactive state with synchronous, ordered observers.
//! - Traits at collaborator seams (authority, mode source).
//! - No `unsafe`.

pub mod authority;
pub mod config;
pub mod container;
pub mod event;
pub mod math;
pub mod mode;
pub mod shape;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::authority::*;
    pub use crate::config::*;
    pub use crate::container::*;
    pub use crate::event::*;
    pub use crate::math::*;
    pub use crate::mode::*;
    pub use crate::shape::*;
}
