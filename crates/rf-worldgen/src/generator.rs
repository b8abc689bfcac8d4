use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rf_core::{CellKind, GridDims, TerrainMap};

use crate::canvas::Canvas;
use crate::config::GenConfig;
use crate::error::GenResult;
use crate::noise::NoiseField;
use crate::passes::Polar;
use crate::passes::blocks::{BlockPlan, InteriorCell, fill_interior};
use crate::passes::boundary::CityBoundary;
use crate::passes::highway::HighwayNetwork;
use crate::passes::{canal, decay};

/// Builds city-ruin terrain maps.
///
/// ```
/// use rf_worldgen::{GenConfig, TerrainGenerator};
///
/// let map = TerrainGenerator::new(GenConfig::default().with_seed(7))
///     .generate(64, 48)
///     .unwrap();
/// assert_eq!(map.cells().len(), 64 * 48);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TerrainGenerator {
    config: GenConfig,
}

impl TerrainGenerator {
    /// Create a generator with the given configuration.
    pub fn new(config: GenConfig) -> Self {
        Self { config }
    }

    /// The generator's configuration.
    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Generate a map, seeding a fresh RNG from the configured seed.
    pub fn generate(&self, width: usize, height: usize) -> GenResult<TerrainMap> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.generate_with_rng(width, height, &mut rng)
    }

    /// Generate a map drawing every random choice from `rng`.
    pub fn generate_with_rng(
        &self,
        width: usize,
        height: usize,
        rng: &mut StdRng,
    ) -> GenResult<TerrainMap> {
        let config = &self.config;
        config.validate()?;
        let dims = GridDims::new(width, height)?;
        let mut canvas = Canvas::new(dims);

        let noise = NoiseField::sample(rng);
        let boundary = CityBoundary::sample(dims, config, rng);
        let highways = HighwayNetwork::sample(&boundary, config, rng);
        let blocks = BlockPlan::sample(dims, config, &noise, rng);
        log::debug!("block archetypes: {:?}", blocks.archetype_counts());

        for y in 0..height {
            for x in 0..width {
                let polar = Polar::of(x as f32, y as f32, boundary.center());
                let kind = if boundary.in_center_park(polar) {
                    CellKind::Park
                } else if highways.contains(polar) {
                    CellKind::Road
                } else if !boundary.contains(polar) {
                    rubble(config, rng)
                } else if blocks.is_street(x, y) {
                    CellKind::Road
                } else {
                    let cell = InteriorCell {
                        x,
                        y,
                        polar,
                        density: boundary.density(polar),
                    };
                    fill_interior(cell, &blocks, config, &noise, rng)
                };
                canvas.set(y * width + x, kind);
            }
        }
        log::debug!(
            "layout pass: {} road, {} wall, {} water cells",
            canvas.count(CellKind::Road),
            canvas.count(CellKind::Wall),
            canvas.count(CellKind::Water)
        );

        let carved = canal::carve(&mut canvas, config, rng);
        log::debug!("canal pass: {carved} cells stamped");

        let decayed = decay::run(&mut canvas, config, rng);
        log::debug!("decay pass: {decayed} cells changed");

        let map = canvas.into_map()?;
        log::info!(
            "generated {}x{} terrain (seed {}): {:?}",
            width,
            height,
            config.seed,
            CellKind::ALL
                .iter()
                .zip(map.histogram())
                .filter(|(_, n)| *n > 0)
                .map(|(k, n)| format!("{k}={n}"))
                .collect::<Vec<_>>()
        );
        Ok(map)
    }
}

fn rubble(config: &GenConfig, rng: &mut StdRng) -> CellKind {
    if rng.random_bool(config.rubble_wall_chance) {
        CellKind::Wall
    } else {
        CellKind::Dirt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use rf_core::CoreError;

    #[test]
    fn rejects_zero_dimensions() {
        let generator = TerrainGenerator::default();
        assert!(matches!(
            generator.generate(0, 10),
            Err(GenError::Core(CoreError::InvalidDimensions { .. }))
        ));
        assert!(generator.generate(10, 0).is_err());
    }

    #[test]
    fn rejects_invalid_config_before_sizing() {
        let generator = TerrainGenerator::new(GenConfig::default().with_blocks(2, 1));
        assert!(matches!(
            generator.generate(50, 50),
            Err(GenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn centre_is_park_or_canal() {
        let map = TerrainGenerator::default().generate(100, 100).unwrap();
        let centre = map.dims().center_index();
        let kind = map.kind(centre).unwrap();
        assert!(matches!(kind, CellKind::Park | CellKind::Canal));
        assert!(!map.is_blocked(centre));
    }

    #[test]
    fn produces_a_varied_city() {
        let map = TerrainGenerator::default().generate(100, 100).unwrap();
        let histogram = map.histogram();
        for kind in [CellKind::Dirt, CellKind::Road, CellKind::Park, CellKind::Canal] {
            assert!(histogram[kind.code() as usize] > 0, "no {kind} cells");
        }
        let structural: usize = CellKind::ALL
            .iter()
            .filter(|k| k.is_structural())
            .map(|k| histogram[k.code() as usize])
            .sum();
        assert!(structural > 0);
    }

    #[test]
    fn tiny_maps_still_generate() {
        for (w, h) in [(1, 1), (1, 7), (2, 2), (5, 3)] {
            let map = TerrainGenerator::default().generate(w, h).unwrap();
            assert_eq!(map.len(), w * h);
        }
    }

    #[test]
    fn without_canals_there_is_no_flow() {
        let generator = TerrainGenerator::new(GenConfig::default().with_canals(0, 0));
        let map = generator.generate(60, 60).unwrap();
        assert!(map.flows().iter().all(|f| f.is_zero()));
        assert_eq!(map.histogram()[CellKind::Canal.code() as usize], 0);
    }
}
