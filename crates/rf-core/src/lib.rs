//! Core types for ruinflow: grid indexing, terrain categories, and the terrain map.
//!
//! This crate defines the static world model shared by the generator, the fluid
//! solver, and whatever network layer ships the world to observers. A
//! [`TerrainMap`] is built once and never mutated afterwards.

/// Terrain categories and their wire codes.
pub mod cell;
/// Error types used throughout the crate.
pub mod error;
/// Per-cell flow direction vectors.
pub mod flow;
/// Grid dimensions, row-major indexing, and bounds-checked neighbourhoods.
pub mod grid;
/// Wire contract shared with the networking layer.
pub mod protocol;
/// ASCII rendering of terrain grids.
pub mod render;
/// The immutable terrain map.
pub mod terrain;

/// Re-export of [`cell::CellKind`].
pub use cell::CellKind;
/// Re-exports of [`error::CoreError`] and [`error::CoreResult`].
pub use error::{CoreError, CoreResult};
/// Re-export of [`flow::FlowVec`].
pub use flow::FlowVec;
/// Re-exports of grid indexing types.
pub use grid::{Direction, GridDims};
/// Re-export of [`protocol::WorldConfig`].
pub use protocol::WorldConfig;
/// Re-export of [`terrain::TerrainMap`].
pub use terrain::TerrainMap;
