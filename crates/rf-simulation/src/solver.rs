use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;
use rf_core::{Direction, FlowVec, TerrainMap};

use crate::buffer::DoubleBuffer;
use crate::codec::{self, Snapshot};
use crate::config::FluidParams;
use crate::error::{SimError, SimResult};

/// The canonical neighbour order reversed.
const REVERSED: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// Evolves a non-negative fluid level over a fixed terrain.
///
/// Each tick copies the field, injects fluid at the emitter, and lets every
/// wet cell push fluid downhill into its open 4-neighbours. Canal cells push
/// harder and favour the direction they were carved in. Structural cells
/// neither send nor receive.
#[derive(Debug, Clone)]
pub struct FluidSolver {
    terrain: Arc<TerrainMap>,
    params: FluidParams,
    field: DoubleBuffer<f32>,
    emitter: usize,
    enabled: bool,
}

impl FluidSolver {
    /// A dry, enabled solver over `terrain`, emitting at the centre cell.
    ///
    /// Fails with [`SimError::InvalidConfig`] when `params` holds a negative
    /// or non-finite constant.
    pub fn new(terrain: Arc<TerrainMap>, params: FluidParams) -> SimResult<Self> {
        params.validate()?;
        let len = terrain.len();
        let emitter = terrain.dims().center_index();
        Ok(Self {
            terrain,
            params,
            field: DoubleBuffer::new(len, 0.0),
            emitter,
            enabled: true,
        })
    }

    /// Start with `amount` of fluid already at the emitter.
    pub fn with_initial_charge(mut self, amount: f32) -> Self {
        self.field.front_mut()[self.emitter] += amount.max(0.0);
        self
    }

    /// The terrain the solver runs over.
    pub fn terrain(&self) -> &Arc<TerrainMap> {
        &self.terrain
    }

    /// Solver constants.
    pub fn params(&self) -> &FluidParams {
        &self.params
    }

    /// Row-major index of the emitter cell.
    pub fn emitter(&self) -> usize {
        self.emitter
    }

    /// Whether ticks currently advance the field.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the solver. The field is kept while disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!(
                "fluid solver {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
        self.enabled = enabled;
    }

    /// Add `amount` of fluid to one cell, clamping the result at zero.
    pub fn seed_cell(&mut self, index: usize, amount: f32) -> SimResult<()> {
        let len = self.field.len();
        let cell = self
            .field
            .front_mut()
            .get_mut(index)
            .ok_or(SimError::CellOutOfBounds { index, len })?;
        if !amount.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "seed amount must be finite, got {amount}"
            )));
        }
        *cell = (*cell + amount).max(0.0);
        Ok(())
    }

    /// Advance the field by one step.
    ///
    /// `dt` is accepted for variable-rate hosts and does not scale the step.
    /// Draws exactly one coin flip from `rng` per wet cell to pick the
    /// neighbour order. Does nothing while disabled.
    pub fn tick(&mut self, _dt: f32, rng: &mut StdRng) {
        if !self.enabled {
            return;
        }
        let params = &self.params;
        let terrain = &*self.terrain;
        let dims = terrain.dims();
        let (current, next) = self.field.stage();

        next[self.emitter] += params.emitter_rate;

        for (index, &level) in current.iter().enumerate() {
            if level <= params.dry_threshold {
                continue;
            }
            let order = if rng.random_bool(0.5) {
                &REVERSED
            } else {
                &Direction::CANONICAL
            };
            if terrain.is_blocked(index) {
                continue;
            }

            let flow = terrain.flow(index);
            let biased = flow.magnitude() > params.flow_epsilon;
            let rate = if biased {
                params.base_flow_rate * params.canal_rate_multiplier
            } else {
                params.base_flow_rate
            };

            let mut remaining = level;
            for &direction in order {
                let Some(neighbor) = dims.neighbor(index, direction) else {
                    continue;
                };
                if terrain.is_blocked(neighbor) {
                    continue;
                }
                let (bonus, scale) = if biased {
                    bias(flow, direction, params)
                } else {
                    (0.0, 1.0)
                };
                let difference = level + bonus - current[neighbor];
                if difference <= 0.0 {
                    continue;
                }
                let amount = ((difference * rate).min(remaining) * scale).min(remaining);
                next[index] -= amount;
                next[neighbor] += amount;
                remaining -= amount;
                if remaining <= 0.0 {
                    break;
                }
            }
        }

        for level in next.iter_mut() {
            *level = level.max(0.0);
        }
        self.field.swap();
    }

    /// Quantize the field into a fresh snapshot; all zeros while disabled.
    pub fn export_snapshot(&self) -> Snapshot {
        let mut bytes = vec![0; self.field.len()];
        self.export_into(&mut bytes);
        Snapshot::from_bytes(bytes)
    }

    /// Quantize the field into a caller-owned buffer of at least one byte
    /// per cell. Bytes past the grid are left alone.
    pub fn export_into(&self, out: &mut [u8]) {
        if self.enabled {
            codec::encode_into(self.field.front(), out);
        } else {
            let len = out.len().min(self.field.len());
            out[..len].fill(0);
        }
    }

    /// Level of one cell, if it exists.
    pub fn level(&self, index: usize) -> Option<f32> {
        self.field.front().get(index).copied()
    }

    /// All levels, row-major.
    pub fn levels(&self) -> &[f32] {
        self.field.front()
    }

    /// Sum of all levels.
    pub fn total_mass(&self) -> f64 {
        self.field.front().iter().map(|&v| f64::from(v)).sum()
    }

    /// Number of cells above the dry threshold.
    pub fn wet_cells(&self) -> usize {
        let threshold = self.params.dry_threshold;
        self.field.front().iter().filter(|&&v| v > threshold).count()
    }

    /// Highest level in the field.
    pub fn max_level(&self) -> f32 {
        self.field.front().iter().copied().fold(0.0, f32::max)
    }
}

/// Pressure bonus and amount scale for a canal source pushing in `direction`.
fn bias(flow: FlowVec, direction: Direction, params: &FluidParams) -> (f32, f32) {
    let alignment = flow.dot(direction.unit());
    if alignment > params.alignment_threshold {
        (params.pressure_bonus, params.downstream_boost)
    } else if alignment < -params.alignment_threshold {
        (0.0, params.upstream_damping)
    } else {
        (0.0, 1.0)
    }
}
