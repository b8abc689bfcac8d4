use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rf_core::TerrainMap;
use serde::Serialize;

use crate::clock::{CADENCE_EPSILON, Cadence, SimClock};
use crate::codec::Snapshot;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::solver::FluidSolver;
use crate::system::System;

/// One snapshot owed to observers by the broadcast cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Broadcast {
    /// Solver tick the snapshot reflects.
    pub tick: u64,
    /// The exported bytes.
    pub snapshot: Snapshot,
}

/// The top-level simulation orchestrator.
///
/// Owns the solver, clock, RNG, the two cadences, and registered systems.
/// Solver ticks and snapshot broadcasts run at independent fixed rates.
pub struct Simulation {
    solver: FluidSolver,
    clock: SimClock,
    rng: StdRng,
    tick_cadence: Cadence,
    broadcast_cadence: Cadence,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("enabled", &self.solver.is_enabled())
            .field("systems", &self.systems.len())
            .finish()
    }
}

impl Simulation {
    /// Create a new simulation over `terrain`.
    pub fn new(terrain: Arc<TerrainMap>, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut solver = FluidSolver::new(terrain, config.fluid.clone())?
            .with_initial_charge(config.initial_charge);
        solver.set_enabled(config.start_enabled);
        let backlog = config.max_backlog_secs();
        log::info!(
            "simulation over {}x{} terrain: {} Hz ticks, {} Hz broadcasts, seed {}",
            solver.terrain().width(),
            solver.terrain().height(),
            config.tick_rate_hz,
            config.broadcast_rate_hz,
            config.seed
        );
        Ok(Self {
            solver,
            clock: SimClock::new(config.tick_interval()),
            rng: StdRng::seed_from_u64(config.seed),
            tick_cadence: Cadence::from_hz(config.tick_rate_hz)?.with_max_backlog(backlog),
            broadcast_cadence: Cadence::from_hz(config.broadcast_rate_hz)?
                .with_max_backlog(backlog),
            systems: Vec::new(),
            initialized: false,
        })
    }

    /// Register a system. Systems are ticked in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Initialize all registered systems.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                solver: &mut self.solver,
                clock: &self.clock,
                rng: &mut self.rng,
            };
            let result = system.init(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Advance the solver by one tick, then run every system.
    pub fn tick(&mut self) -> SimResult<()> {
        if !self.initialized {
            self.init()?;
        }

        self.clock.advance();
        let dt = self.clock.seconds_per_tick() as f32;
        self.solver.tick(dt, &mut self.rng);

        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                solver: &mut self.solver,
                clock: &self.clock,
                rng: &mut self.rng,
            };
            let result = system.tick(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        Ok(())
    }

    /// Advance the simulation by `n` ticks.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Let `elapsed_secs` of wall time pass.
    ///
    /// Runs every solver tick the tick cadence owes and exports one snapshot
    /// per broadcast the broadcast cadence owes, interleaved in the order
    /// they fell due. Ties go to the solver tick. At most
    /// `max_catch_up_ticks` worth of time is owed at once; the rest is dropped.
    pub fn advance(&mut self, elapsed_secs: f64) -> SimResult<Vec<Broadcast>> {
        let dropped = self.tick_cadence.accumulate(elapsed_secs);
        self.broadcast_cadence.accumulate(elapsed_secs);
        if dropped > 0.0 {
            log::warn!(
                "dropping {dropped:.3}s of elapsed time at tick {}",
                self.clock.tick()
            );
        }
        let mut broadcasts = Vec::new();
        loop {
            match (self.tick_cadence.overdue(), self.broadcast_cadence.overdue()) {
                (Some(tick_late), Some(broadcast_late))
                    if broadcast_late > tick_late + CADENCE_EPSILON =>
                {
                    self.broadcast_cadence.fire();
                    broadcasts.push(self.broadcast());
                }
                (Some(_), _) => {
                    self.tick_cadence.fire();
                    self.tick()?;
                }
                (None, Some(_)) => {
                    self.broadcast_cadence.fire();
                    broadcasts.push(self.broadcast());
                }
                (None, None) => break,
            }
        }
        Ok(broadcasts)
    }

    fn broadcast(&self) -> Broadcast {
        Broadcast {
            tick: self.clock.tick(),
            snapshot: self.solver.export_snapshot(),
        }
    }

    /// Export the current field; all zeros while the solver is disabled.
    pub fn export_snapshot(&self) -> Snapshot {
        self.solver.export_snapshot()
    }

    /// Enable or disable the fluid solver.
    pub fn set_fluid_enabled(&mut self, enabled: bool) {
        if self.solver.is_enabled() != enabled {
            log::info!(
                "fluid {} at tick {}",
                if enabled { "enabled" } else { "disabled" },
                self.clock.tick()
            );
        }
        self.solver.set_enabled(enabled);
    }

    /// The fluid solver.
    pub fn solver(&self) -> &FluidSolver {
        &self.solver
    }

    /// Mutable access to the fluid solver.
    pub fn solver_mut(&mut self) -> &mut FluidSolver {
        &mut self.solver
    }

    /// The terrain being simulated.
    pub fn terrain(&self) -> &Arc<TerrainMap> {
        self.solver.terrain()
    }

    /// The simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Access a system by downcasting to a concrete type.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Access a system mutably by downcasting to a concrete type.
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// The number of solver ticks run so far.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }
}

/// Placeholder system used during the swap-and-tick pattern.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FluidParams;
    use crate::error::SimError;
    use crate::probe::FieldProbe;
    use rf_core::{CellKind, GridDims};

    fn terrain() -> Arc<TerrainMap> {
        let dims = GridDims::new(10, 10).unwrap();
        Arc::new(TerrainMap::filled(dims, CellKind::Dirt))
    }

    #[test]
    fn rejects_invalid_config() {
        let result = Simulation::new(terrain(), SimConfig::default().with_tick_rate(0.0));
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn run_advances_clock_and_field() {
        let mut sim = Simulation::new(terrain(), SimConfig::default()).unwrap();
        sim.run(5).unwrap();
        assert_eq!(sim.current_tick(), 5);
        assert!(sim.solver().total_mass() > 2.0);
        assert!((sim.clock().elapsed_secs() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn one_second_owes_twenty_ticks_and_ten_broadcasts() {
        let mut sim = Simulation::new(terrain(), SimConfig::default()).unwrap();
        let broadcasts = sim.advance(1.0).unwrap();
        assert_eq!(sim.current_tick(), 20);
        assert_eq!(broadcasts.len(), 10);
        let ticks: Vec<u64> = broadcasts.iter().map(|b| b.tick).collect();
        assert_eq!(ticks, vec![2, 4, 6, 8, 10, 12, 14, 16, 18, 20]);
    }

    #[test]
    fn small_steps_accumulate() {
        let mut sim = Simulation::new(terrain(), SimConfig::default()).unwrap();
        let mut broadcasts = 0;
        for _ in 0..50 {
            broadcasts += sim.advance(0.01).unwrap().len();
        }
        assert_eq!(sim.current_tick(), 10);
        assert_eq!(broadcasts, 5);
    }

    #[test]
    fn huge_elapsed_time_catches_up_only_to_the_limit() {
        let mut sim = Simulation::new(terrain(), SimConfig::default()).unwrap();
        let broadcasts = sim.advance(1e18).unwrap();
        assert_eq!(sim.current_tick(), 200);
        assert_eq!(broadcasts.len(), 100);

        // The dropped time is gone; the next call runs at the normal rate.
        let broadcasts = sim.advance(0.1).unwrap();
        assert_eq!(sim.current_tick(), 202);
        assert_eq!(broadcasts.len(), 1);
    }

    #[test]
    fn catch_up_limit_is_configurable() {
        let config = SimConfig::default().with_max_catch_up_ticks(4);
        let mut sim = Simulation::new(terrain(), config).unwrap();
        let broadcasts = sim.advance(3600.0).unwrap();
        assert_eq!(sim.current_tick(), 4);
        assert_eq!(broadcasts.len(), 2);
    }

    #[test]
    fn initial_charge_starts_at_the_emitter() {
        let config = SimConfig::default()
            .with_initial_charge(10.0)
            .with_start_enabled(false);
        let sim = Simulation::new(terrain(), config).unwrap();
        let emitter = sim.solver().emitter();
        assert_eq!(sim.solver().level(emitter), Some(10.0));
        assert!((sim.solver().total_mass() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_fluid_constants() {
        let fluid = FluidParams::default().with_base_flow_rate(-1.0);
        let result = Simulation::new(terrain(), SimConfig::default().with_fluid(fluid));
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn disabled_start_broadcasts_empty_snapshots() {
        let config = SimConfig::default().with_start_enabled(false);
        let mut sim = Simulation::new(terrain(), config).unwrap();
        let broadcasts = sim.advance(0.5).unwrap();
        assert_eq!(broadcasts.len(), 5);
        for b in &broadcasts {
            assert_eq!(b.snapshot.len(), 100);
            assert_eq!(b.snapshot.occupied(), 0);
        }
        assert_eq!(sim.solver().total_mass(), 0.0);

        sim.set_fluid_enabled(true);
        sim.run(1).unwrap();
        assert_eq!(sim.export_snapshot().occupied(), 1);
    }

    #[test]
    fn same_seed_same_field() {
        let run = |seed| {
            let mut sim =
                Simulation::new(terrain(), SimConfig::default().with_seed(seed)).unwrap();
            sim.run(30).unwrap();
            sim.solver().levels().to_vec()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn probe_samples_on_interval() {
        let mut sim = Simulation::new(terrain(), SimConfig::default()).unwrap();
        sim.add_system(FieldProbe::every(5));
        sim.run(12).unwrap();
        let probe = sim.get_system::<FieldProbe>().unwrap();
        let ticks: Vec<u64> = probe.samples().iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![5, 10]);
        let latest = probe.latest().unwrap();
        assert!(latest.total_mass > 4.0);
        assert!(latest.wet_cells > 1);
    }

    #[test]
    fn custom_system_sees_the_stepped_solver() {
        #[derive(Debug, Default)]
        struct Drain {
            calls: u32,
        }
        impl System for Drain {
            fn name(&self) -> &str {
                "drain"
            }
            fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
                self.calls += 1;
                let emitter = ctx.solver.emitter();
                let level = ctx.solver.level(emitter).unwrap_or(0.0);
                ctx.solver.seed_cell(emitter, -level)
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        let mut sim = Simulation::new(terrain(), SimConfig::default()).unwrap();
        sim.add_system(Drain::default());
        sim.run(3).unwrap();
        assert_eq!(sim.get_system::<Drain>().unwrap().calls, 3);
        assert_eq!(sim.solver().total_mass(), 0.0);
    }

    #[test]
    fn failing_system_stops_the_tick() {
        #[derive(Debug)]
        struct Broken;
        impl System for Broken {
            fn name(&self) -> &str {
                "broken"
            }
            fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
                Err(SimError::SystemError("boom".into()))
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        let mut sim = Simulation::new(terrain(), SimConfig::default()).unwrap();
        sim.add_system(Broken);
        assert!(matches!(sim.tick(), Err(SimError::SystemError(_))));
        // The system is put back even though it failed.
        assert!(sim.get_system::<Broken>().is_some());
    }
}
