//! Gesture replay binary.
//!
//! Usage:
//!   cargo run -p tumble_client -- [--config controls.json] [--mode tetromino|room] [--piece T]
//!
//! Wires the controls to a single piece and replays a scripted session:
//! a sweep on each axis ring, a held pad direction, and a held fast drop.
//! Prints the resulting piece and room orientation as JSON.

use std::env;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use tokio::time;
use tracing::{debug, info};
use tumble_client::{
    axis::{Axis, AxisController, AxisDependencies},
    input::PointerId,
    repeat::{Classifier, InputSignal, RepeatInput, SignalReceiver},
    ring::{ring_point, AxisRings},
    target::{ControlTarget, Piece},
    FastDropController, PadController,
};
use tumble_shared::{
    authority::{AuthorityHub, PlayerId},
    config::ControlsConfig,
    container::{ContainerKind, ControlContainer},
    math::Vec2,
    mode::{Mode, ModeController},
    shape::{Coord, TetrominoKind},
};

const RING_CENTER: Vec2 = Vec2::new(110.0, 110.0);
const RING_RADIUS: f32 = 50.0;
const PAD_CENTER: Vec2 = Vec2::new(60.0, 60.0);

struct Options {
    config_path: Option<String>,
    mode: Mode,
    piece: TetrominoKind,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut opts = Options {
        config_path: None,
        mode: Mode::Tetromino,
        piece: TetrominoKind::T,
    };
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                opts.config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--mode" if i + 1 < args.len() => {
                opts.mode = args[i + 1].parse()?;
                i += 2;
            }
            "--piece" if i + 1 < args.len() => {
                opts.piece = args[i + 1].parse()?;
                i += 2;
            }
            _ => i += 1,
        }
    }
    Ok(opts)
}

fn load_config(path: Option<&str>) -> anyhow::Result<ControlsConfig> {
    let cfg = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            ControlsConfig::from_json_str(&raw).context("parse controls config")?
        }
        None => ControlsConfig::default(),
    };
    cfg.validate().context("invalid controls config")?;
    Ok(cfg)
}

/// Sweeps one ring from 0 to `to_deg` in 5 degree steps, then releases.
fn sweep_ring(
    rings: &mut AxisRings,
    ctl: &mut AxisController<ControlTarget>,
    axis: Axis,
    pointer: PointerId,
    to_deg: f32,
) {
    rings.pointer_down(axis, pointer, ring_point(RING_CENTER, RING_RADIUS, 0.0));
    let steps = (to_deg.abs() / 5.0).ceil() as i32;
    for step in 1..=steps {
        let deg = (step as f32 * 5.0).min(to_deg.abs()) * to_deg.signum();
        rings.pointer_move(ctl, pointer, ring_point(RING_CENTER, RING_RADIUS, deg));
    }
    rings.pointer_up(ctl, pointer);
}

/// Holds a repeat-input control at `position` for `duration`, feeding every
/// emitted direction to `apply`.
async fn hold<C: Classifier>(
    ctl: &mut RepeatInput<C>,
    rx: &mut SignalReceiver<C::Direction>,
    pointer: PointerId,
    position: Vec2,
    duration: Duration,
    mut apply: impl FnMut(C::Direction),
) {
    ctl.pointer_down(pointer, position);
    let deadline = time::sleep(duration);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            Some(signal) = rx.recv() => {
                if let InputSignal::Direction(Some(d)) = signal {
                    apply(d);
                }
            }
        }
    }
    ctl.pointer_up(pointer);
    while let Ok(signal) = rx.try_recv() {
        debug!(?signal, "post-release signal");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let opts = parse_args()?;
    let cfg = load_config(opts.config_path.as_deref())?;
    info!(mode = %opts.mode, piece = ?opts.piece, "Starting gesture replay");

    let modes = ModeController::new();
    let switch = ControlContainer::new(ContainerKind::ModeSwitch);
    modes.notify_setup_finished(&switch);
    modes.on_mode_changed(|mode| info!(%mode, "Mode switched"));
    switch.toggle().set_checked(opts.mode == Mode::Room);

    let hub = AuthorityHub::new();
    let local = hub.player(PlayerId(1));

    let target = ControlTarget::new(Piece::new(opts.piece.shape(), Coord::new(3, 3, 12)));
    let mut axis = AxisController::new(
        AxisDependencies {
            sink: target,
            authority: Rc::new(local),
            mode: Rc::new(modes.clone()),
        },
        &cfg,
    )?;
    axis.on_axis_state_changed(|state| {
        debug!(axis = %state.axis, angle = state.angle, "Axis state");
    });

    let rings_container = ControlContainer::new(ContainerKind::AxisRings);
    axis.notify_setup_finished(&rings_container);

    let mut rings = AxisRings::new(RING_CENTER);
    sweep_ring(&mut rings, &mut axis, Axis::Roll, PointerId(1), 45.0);
    sweep_ring(&mut rings, &mut axis, Axis::Pitch, PointerId(1), -25.0);
    sweep_ring(&mut rings, &mut axis, Axis::Yaw, PointerId(1), 90.0);
    info!(
        in_charge = ?rings_container.attribute(tumble_client::axis::IN_CHARGE_ATTR),
        clicks = axis.sink().clicks,
        "Ring sweeps done"
    );

    let (mut pad, mut pad_rx) = PadController::pad(PAD_CENTER, &cfg)?;
    hold(
        &mut pad,
        &mut pad_rx,
        PointerId(2),
        Vec2::new(PAD_CENTER.x + 30.0, PAD_CENTER.y),
        Duration::from_millis(400),
        |d| axis.sink_mut().apply_pad(d),
    )
    .await;

    let (mut fast_drop, mut drop_rx) = FastDropController::fast_drop(&cfg)?;
    hold(
        &mut fast_drop,
        &mut drop_rx,
        PointerId(3),
        Vec2::ZERO,
        Duration::from_millis(600),
        |_| axis.sink_mut().apply_fast_drop(),
    )
    .await;

    let summary = serde_json::to_string_pretty(axis.sink()).context("serialize target")?;
    println!("{summary}");
    Ok(())
}
