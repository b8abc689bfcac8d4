use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Configuration for a terrain generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// RNG seed used by [`crate::TerrainGenerator::generate`].
    pub seed: u64,

    /// City radius as a fraction of half the shorter map side.
    pub city_radius: f32,
    /// Relative amplitude of the angular wobble on the city boundary.
    pub boundary_wobble: f32,
    /// Radius of the central park in cells; 0 disables it.
    pub center_park_radius: f32,
    /// Chance that a cell outside the city is a lone wall.
    pub rubble_wall_chance: f64,

    /// Number of radial highway spokes.
    pub highway_count: usize,
    /// Highway half-width in cells, before the tightness scale.
    pub highway_width: f32,
    /// Scale applied to the angular half-width of each spoke.
    pub highway_tightness: f32,
    /// Largest angular drift per cell of distance along a spoke.
    pub highway_curvature: f32,
    /// Whether to lay a ring road near mid-radius.
    pub ring_enabled: bool,
    /// Ring radius as a fraction of the city radius.
    pub ring_fraction: f32,

    /// Side length of a city block in cells.
    pub block_size: usize,
    /// Street width along each block edge, before jitter.
    pub street_width: usize,
    /// Chance that a block drops its street on one axis.
    pub street_gate_chance: f32,
    /// Chance that a block is industrial.
    pub industrial_chance: f64,
    /// Chance that a block is a skyscraper block.
    pub skyscraper_chance: f64,
    /// Radius of the tank at the centre of an industrial block.
    pub tank_radius: f32,
    /// Lake noise level above which cells flood.
    pub lake_threshold: f32,

    /// Number of canals to carve.
    pub canal_count: usize,
    /// Steps walked per canal.
    pub canal_steps: usize,
    /// Distance advanced per canal step, in cells.
    pub canal_speed: f32,
    /// Amplitude of the canal heading wiggle, in radians.
    pub canal_wiggle: f32,

    /// Cellular-automaton cleanup iterations.
    pub decay_iterations: usize,
    /// Chance that dirt next to parkland becomes park during decay.
    pub park_spread_chance: f64,
    /// Chance that dirt surrounded by water floods during decay.
    pub flood_chance: f64,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            city_radius: 0.9,
            boundary_wobble: 0.08,
            center_park_radius: 8.0,
            rubble_wall_chance: 0.04,
            highway_count: 4,
            highway_width: 1.4,
            highway_tightness: 1.0,
            highway_curvature: 0.008,
            ring_enabled: true,
            ring_fraction: 0.55,
            block_size: 12,
            street_width: 2,
            street_gate_chance: 0.2,
            industrial_chance: 0.2,
            skyscraper_chance: 0.15,
            tank_radius: 2.5,
            lake_threshold: 0.8,
            canal_count: 2,
            canal_steps: 90,
            canal_speed: 1.0,
            canal_wiggle: 0.35,
            decay_iterations: 2,
            park_spread_chance: 0.3,
            flood_chance: 0.4,
        }
    }
}

impl GenConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the block size and street width together.
    pub fn with_blocks(mut self, block_size: usize, street_width: usize) -> Self {
        self.block_size = block_size;
        self.street_width = street_width;
        self
    }

    /// Set the number of highway spokes.
    pub fn with_highway_count(mut self, count: usize) -> Self {
        self.highway_count = count;
        self
    }

    /// Set the number of canals and the steps walked by each.
    pub fn with_canals(mut self, count: usize, steps: usize) -> Self {
        self.canal_count = count;
        self.canal_steps = steps;
        self
    }

    /// Set the central park radius (0 disables the park).
    pub fn with_center_park_radius(mut self, radius: f32) -> Self {
        self.center_park_radius = radius;
        self
    }

    /// Set the number of decay iterations.
    pub fn with_decay_iterations(mut self, iterations: usize) -> Self {
        self.decay_iterations = iterations;
        self
    }

    /// Reject values that make generation impossible.
    pub fn validate(&self) -> GenResult<()> {
        if self.block_size < 3 {
            return Err(invalid(format!(
                "block_size must be at least 3, got {}",
                self.block_size
            )));
        }
        // Jitter may widen a street by one cell.
        if self.street_width + 1 >= self.block_size {
            return Err(invalid(format!(
                "street_width {} leaves no room inside blocks of size {}",
                self.street_width, self.block_size
            )));
        }
        let chances = [
            ("rubble_wall_chance", self.rubble_wall_chance),
            ("industrial_chance", self.industrial_chance),
            ("skyscraper_chance", self.skyscraper_chance),
            ("park_spread_chance", self.park_spread_chance),
            ("flood_chance", self.flood_chance),
            ("street_gate_chance", f64::from(self.street_gate_chance)),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        if self.industrial_chance + self.skyscraper_chance > 1.0 {
            return Err(invalid(
                "industrial_chance + skyscraper_chance exceeds 1".to_string(),
            ));
        }
        let positive = [
            ("city_radius", self.city_radius),
            ("canal_speed", self.canal_speed),
            ("highway_width", self.highway_width),
            ("highway_tightness", self.highway_tightness),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {v}")));
            }
        }
        if !(self.highway_curvature.is_finite() && self.highway_curvature >= 0.0) {
            return Err(invalid(format!(
                "highway_curvature must be non-negative, got {}",
                self.highway_curvature
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> GenError {
    GenError::InvalidConfig(message)
}
