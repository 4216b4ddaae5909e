//! Shared fixtures for the integration tests.

use std::rc::Rc;

use tumble_client::{
    axis::{AxisController, AxisDependencies},
    target::{ControlTarget, Piece},
};
use tumble_shared::{
    authority::Authority,
    config::ControlsConfig,
    mode::ModeController,
    shape::{Coord, TetrominoKind},
};

/// Installs a test-writer subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Axis controller driving a fresh `kind` piece at a fixed spawn point,
/// with default tuning.
pub fn axis_for(
    kind: TetrominoKind,
    authority: Rc<dyn Authority>,
    modes: &ModeController,
) -> AxisController<ControlTarget> {
    AxisController::new(
        AxisDependencies {
            sink: ControlTarget::new(Piece::new(kind.shape(), Coord::new(3, 3, 12))),
            authority,
            mode: Rc::new(modes.clone()),
        },
        &ControlsConfig::default(),
    )
    .expect("default controls config is valid")
}
