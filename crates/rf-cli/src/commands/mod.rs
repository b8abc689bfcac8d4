pub mod generate;
pub mod simulate;
pub mod snapshot;

use std::sync::Arc;

use rf_core::TerrainMap;
use rf_simulation::{Broadcast, SimConfig, Simulation};
use rf_worldgen::{GenConfig, TerrainGenerator};

/// Generate the terrain for a command.
fn build_terrain(width: usize, height: usize, seed: u64) -> Result<TerrainMap, String> {
    TerrainGenerator::new(GenConfig::default().with_seed(seed))
        .generate(width, height)
        .map_err(|e| format!("terrain generation failed: {e}"))
}

/// Generate terrain and wrap it in a simulation seeded the same way.
fn build_simulation(
    width: usize,
    height: usize,
    seed: u64,
    enabled: bool,
    initial_charge: f32,
) -> Result<(Simulation, SimConfig), String> {
    let terrain = build_terrain(width, height, seed)?;
    let config = SimConfig::default()
        .with_seed(seed)
        .with_start_enabled(enabled)
        .with_initial_charge(initial_charge);
    let sim = Simulation::new(Arc::new(terrain), config.clone())
        .map_err(|e| format!("simulation setup failed: {e}"))?;
    Ok((sim, config))
}

/// Feed the simulation one tick interval of wall time `ticks` times,
/// collecting every broadcast owed along the way.
fn drive(sim: &mut Simulation, config: &SimConfig, ticks: u64) -> Result<Vec<Broadcast>, String> {
    let mut broadcasts = Vec::new();
    for _ in 0..ticks {
        let owed = sim
            .advance(config.tick_interval())
            .map_err(|e| format!("simulation error: {e}"))?;
        broadcasts.extend(owed);
    }
    Ok(broadcasts)
}
