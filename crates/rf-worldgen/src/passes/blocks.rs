use rand::Rng;
use rand::rngs::StdRng;
use rf_core::{CellKind, GridDims};
use serde::{Deserialize, Serialize};

use super::Polar;
use crate::config::GenConfig;
use crate::noise::{NoiseField, hash2, value_noise};

/// Land use of a city block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Ruined housing: walls, rubble, pocket parks.
    Standard,
    /// A central tank surrounded by overgrowth.
    Industrial,
    /// Mostly intact towers.
    Skyscraper,
}

/// Per-block layout drawn once before the cell sweep.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    /// Land use of the block.
    pub archetype: Archetype,
    /// Street width along the block's left and top edges.
    pub street_width: usize,
    /// Whether the street along the left edge is suppressed.
    pub gate_vertical: bool,
    /// Whether the street along the top edge is suppressed.
    pub gate_horizontal: bool,
}

/// The block grid covering the whole map.
#[derive(Debug, Clone)]
pub struct BlockPlan {
    size: usize,
    cols: usize,
    blocks: Vec<Block>,
}

impl BlockPlan {
    /// Draw an archetype for every block; hash street jitter and gating.
    pub fn sample(dims: GridDims, config: &GenConfig, noise: &NoiseField, rng: &mut StdRng) -> Self {
        let size = config.block_size;
        let cols = dims.width().div_ceil(size);
        let rows = dims.height().div_ceil(size);
        let mut blocks = Vec::with_capacity(cols * rows);
        for by in 0..rows as i64 {
            for bx in 0..cols as i64 {
                let roll: f64 = rng.random();
                let archetype = if roll < config.industrial_chance {
                    Archetype::Industrial
                } else if roll < config.industrial_chance + config.skyscraper_chance {
                    Archetype::Skyscraper
                } else {
                    Archetype::Standard
                };
                let jitter = usize::from(hash2(bx, by, noise.street_salt) > 0.75);
                let gate = hash2(bx, by, noise.gate_salt);
                let half = config.street_gate_chance / 2.0;
                blocks.push(Block {
                    archetype,
                    street_width: config.street_width + jitter,
                    gate_vertical: gate < half,
                    gate_horizontal: (half..config.street_gate_chance).contains(&gate),
                });
            }
        }
        Self { size, cols, blocks }
    }

    /// Block containing `(x, y)` and the cell's offset inside it.
    pub fn locate(&self, x: usize, y: usize) -> (&Block, usize, usize) {
        let block = &self.blocks[(y / self.size) * self.cols + x / self.size];
        (block, x % self.size, y % self.size)
    }

    /// Whether `(x, y)` is on an ungated street.
    pub fn is_street(&self, x: usize, y: usize) -> bool {
        let (block, lx, ly) = self.locate(x, y);
        let vertical = lx < block.street_width && !block.gate_vertical;
        let horizontal = ly < block.street_width && !block.gate_horizontal;
        vertical || horizontal
    }

    /// Number of blocks of each archetype, for logging.
    pub fn archetype_counts(&self) -> [(Archetype, usize); 3] {
        let count = |a: Archetype| self.blocks.iter().filter(|b| b.archetype == a).count();
        [
            (Archetype::Standard, count(Archetype::Standard)),
            (Archetype::Industrial, count(Archetype::Industrial)),
            (Archetype::Skyscraper, count(Archetype::Skyscraper)),
        ]
    }
}

/// Everything the interior fill needs to know about one cell.
#[derive(Debug, Clone, Copy)]
pub struct InteriorCell {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Position relative to the map centre.
    pub polar: Polar,
    /// Building density from the city boundary, `[0, 1]`.
    pub density: f32,
}

/// Pick the category of a non-street cell inside the city.
pub fn fill_interior(
    cell: InteriorCell,
    plan: &BlockPlan,
    config: &GenConfig,
    noise: &NoiseField,
    rng: &mut StdRng,
) -> CellKind {
    let (x, y) = (cell.x as f32, cell.y as f32);
    if noise.lakes.at(x, y) > config.lake_threshold
        && cell.polar.radius > config.center_park_radius * 2.0
    {
        return CellKind::Water;
    }

    let (block, lx, ly) = plan.locate(cell.x, cell.y);
    match block.archetype {
        Archetype::Standard => {
            let n = value_noise(x * 0.5, y * 0.5, noise.density_salt);
            if n < 0.25 + 0.45 * cell.density {
                CellKind::Wall
            } else if n > 0.9 {
                CellKind::Park
            } else if noise.puddles.at(x, y) > 0.9 {
                CellKind::Water
            } else {
                CellKind::Dirt
            }
        }
        Archetype::Industrial => {
            let mid = (block.street_width + config.block_size) as f32 / 2.0;
            let from_mid = (lx as f32 + 0.5 - mid).hypot(ly as f32 + 0.5 - mid);
            if from_mid <= config.tank_radius {
                CellKind::Tank
            } else if rng.random_bool(0.75) {
                CellKind::Park
            } else {
                CellKind::Dirt
            }
        }
        Archetype::Skyscraper => {
            if rng.random_bool(0.8) {
                CellKind::Skyscraper
            } else {
                CellKind::Dirt
            }
        }
    }
}
