//! Fluid solver, snapshot codec, and fixed-cadence orchestration for ruinflow.
//!
//! [`FluidSolver`] evolves a non-negative contamination level over an immutable
//! [`rf_core::TerrainMap`], double-buffered so each tick reads one buffer and
//! writes the other. [`codec`] turns the field into one byte per cell for
//! observers. [`Simulation`] drives the solver at one fixed rate and exports
//! snapshots at another, running any registered [`System`] after each tick.

/// Two-buffer swap primitive backing the fluid field.
pub mod buffer;
/// Simulation clock and fixed-rate cadences.
pub mod clock;
/// Quantized snapshot encoding and run-length compression.
pub mod codec;
/// Configuration types for the solver and the orchestrator.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Field statistics sampling system.
pub mod probe;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The fluid solver.
pub mod solver;
/// The trait that all simulation systems implement.
pub mod system;

/// Re-export of [`buffer::DoubleBuffer`].
pub use buffer::DoubleBuffer;
/// Re-exports of [`clock::Cadence`] and [`clock::SimClock`].
pub use clock::{Cadence, SimClock};
/// Re-export of [`codec::Snapshot`].
pub use codec::Snapshot;
/// Re-exports of [`config::FluidParams`] and [`config::SimConfig`].
pub use config::{FluidParams, SimConfig};
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`probe::FieldProbe`] and [`probe::ProbeSample`].
pub use probe::{FieldProbe, ProbeSample};
/// Re-exports of [`simulation::Broadcast`] and [`simulation::Simulation`].
pub use simulation::{Broadcast, Simulation};
/// Re-export of [`solver::FluidSolver`].
pub use solver::FluidSolver;
/// Re-export of [`system::System`].
pub use system::System;
