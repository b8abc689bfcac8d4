use rand::rngs::StdRng;

use crate::clock::SimClock;
use crate::solver::FluidSolver;

/// Mutable context passed to each system after the solver has stepped.
pub struct SimContext<'a> {
    /// The fluid solver, already advanced for this tick.
    pub solver: &'a mut FluidSolver,
    /// The simulation clock.
    pub clock: &'a SimClock,
    /// The simulation's random source.
    pub rng: &'a mut StdRng,
}

impl SimContext<'_> {
    /// The current tick number.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Seconds of simulated time per tick.
    pub fn dt(&self) -> f32 {
        self.clock.seconds_per_tick() as f32
    }
}
