use std::f32::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;
use rf_core::{CellKind, FlowVec, GridDims};

use crate::canvas::Canvas;
use crate::config::GenConfig;

/// Angular frequency of the heading wiggle, per step.
const WIGGLE_FREQUENCY: f32 = 0.15;

/// Carve `config.canal_count` canals into the canvas.
///
/// Even-numbered canals start on a random map edge heading roughly inwards,
/// odd-numbered ones start at the centre heading in a random direction.
/// Returns the number of cells stamped.
pub fn carve(canvas: &mut Canvas, config: &GenConfig, rng: &mut StdRng) -> usize {
    let dims = canvas.dims();
    let mut stamped = 0;
    for k in 0..config.canal_count {
        let (start, heading) = if k % 2 == 0 {
            edge_start(dims, rng)
        } else {
            (dims.center(), rng.random_range(0.0..TAU))
        };
        let phase = rng.random_range(0.0..TAU);
        stamped += walk(canvas, config, start, heading, phase);
    }
    stamped
}

fn edge_start(dims: GridDims, rng: &mut StdRng) -> ((f32, f32), f32) {
    let (w, h) = (dims.width() as f32, dims.height() as f32);
    let along: f32 = rng.random();
    let start = match rng.random_range(0..4u8) {
        0 => (along * w, 0.0),
        1 => (along * w, h - 1.0),
        2 => (0.0, along * h),
        _ => (w - 1.0, along * h),
    };
    let center = dims.center();
    let inward = (center.1 - start.1).atan2(center.0 - start.0);
    (start, inward + rng.random_range(-0.4..0.4))
}

fn walk(
    canvas: &mut Canvas,
    config: &GenConfig,
    start: (f32, f32),
    heading: f32,
    phase: f32,
) -> usize {
    let dims = canvas.dims();
    let (mut x, mut y) = start;
    let mut stamped = 0;
    for step in 0..config.canal_steps {
        let angle = heading + config.canal_wiggle * (step as f32 * WIGGLE_FREQUENCY + phase).sin();
        let direction = FlowVec::from_angle(angle);
        x += direction.x * config.canal_speed;
        y += direction.y * config.canal_speed;

        let (cx, cy) = (x.round() as i64, y.round() as i64);
        if !dims.contains(cx, cy) && !near_grid(dims, cx, cy) {
            break;
        }
        stamped += stamp(canvas, cx, cy, direction);
    }
    stamped
}

/// Whether a 3x3 stamp centred at `(x, y)` still touches the grid.
fn near_grid(dims: GridDims, x: i64, y: i64) -> bool {
    x >= -1 && y >= -1 && x <= dims.width() as i64 && y <= dims.height() as i64
}

fn stamp(canvas: &mut Canvas, cx: i64, cy: i64, direction: FlowVec) -> usize {
    let dims = canvas.dims();
    let mut stamped = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let Some(index) = dims.index(cx + dx, cy + dy) else {
                continue;
            };
            // Roads bridge canals and keep their category.
            if canvas.get(index) == CellKind::Road {
                continue;
            }
            canvas.set_canal(index, direction);
            stamped += 1;
        }
    }
    stamped
}
