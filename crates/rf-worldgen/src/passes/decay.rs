use rand::Rng;
use rand::rngs::StdRng;
use rf_core::{CellKind, GridDims};

use crate::canvas::Canvas;
use crate::config::GenConfig;

/// Neighbour tallies over the 8-neighbourhood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Walls, tanks and skyscrapers.
    pub structural: u8,
    /// Roads.
    pub road: u8,
    /// Parks.
    pub park: u8,
    /// Water and canals.
    pub water: u8,
}

impl Tally {
    /// Count the in-bounds neighbours of `(x, y)` in `cells`.
    pub fn around(cells: &[CellKind], dims: GridDims, x: usize, y: usize) -> Self {
        let mut tally = Self::default();
        for n in dims.moore_neighbors(x, y) {
            let kind = cells[n];
            if kind.is_structural() {
                tally.structural += 1;
            }
            if kind.is_water_like() {
                tally.water += 1;
            }
            match kind {
                CellKind::Road => tally.road += 1,
                CellKind::Park => tally.park += 1,
                _ => {}
            }
        }
        tally
    }
}

/// Apply the decay rules to one cell; `None` keeps it unchanged.
pub fn rule(kind: CellKind, tally: Tally, config: &GenConfig, rng: &mut StdRng) -> Option<CellKind> {
    match kind {
        CellKind::Dirt if tally.structural >= 5 => Some(CellKind::Wall),
        CellKind::Dirt if tally.park > 1 && rng.random_bool(config.park_spread_chance) => {
            Some(CellKind::Park)
        }
        CellKind::Dirt if tally.water > 3 && rng.random_bool(config.flood_chance) => {
            Some(CellKind::Water)
        }
        k if k.is_structural() && tally.structural < 2 => Some(CellKind::Dirt),
        CellKind::Road if tally.road == 0 => Some(CellKind::Dirt),
        _ => None,
    }
}

/// Run `config.decay_iterations` rounds of the cleanup automaton.
///
/// Each round reads a snapshot of the previous round, so changes never
/// cascade within a round. Grid-edge cells are left alone. Returns the number
/// of cells changed.
pub fn run(canvas: &mut Canvas, config: &GenConfig, rng: &mut StdRng) -> usize {
    let dims = canvas.dims();
    if dims.width() < 3 || dims.height() < 3 {
        return 0;
    }
    let mut changed = 0;
    for _ in 0..config.decay_iterations {
        let previous = canvas.cells().to_vec();
        for y in 1..dims.height() - 1 {
            for x in 1..dims.width() - 1 {
                let index = y * dims.width() + x;
                let tally = Tally::around(&previous, dims, x, y);
                if let Some(kind) = rule(previous[index], tally, config, rng) {
                    canvas.set(index, kind);
                    changed += 1;
                }
            }
        }
    }
    changed
}
