//! Procedural city-ruin terrain generation for ruinflow.
//!
//! [`TerrainGenerator`] synthesises a [`rf_core::TerrainMap`] in passes: a
//! wobbly radial city boundary, curved highway spokes and a ring road, a block
//! grid with per-block archetypes, meandering canals that record their flow
//! direction, and a cellular-automaton decay pass that cleans up the result.
//!
//! Every random draw comes from a caller-owned [`rand::rngs::StdRng`], so the
//! same seed and dimensions always give the same map.

/// Working grid the passes write into.
pub mod canvas;
/// Tuning constants for generation.
pub mod config;
/// Error types for the generator.
pub mod error;
/// The generator entry point.
pub mod generator;
/// Deterministic hash and value noise.
pub mod noise;
/// The individual generation passes.
pub mod passes;

/// Re-export of [`config::GenConfig`].
pub use config::GenConfig;
/// Re-exports of [`error::GenError`] and [`error::GenResult`].
pub use error::{GenError, GenResult};
/// Re-export of [`generator::TerrainGenerator`].
pub use generator::TerrainGenerator;
/// Re-export of [`passes::blocks::Archetype`].
pub use passes::blocks::Archetype;
