use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Tuning constants of the fluid solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidParams {
    /// Fluid added at the emitter cell every tick.
    pub emitter_rate: f32,
    /// Cells at or below this level do not spread.
    pub dry_threshold: f32,
    /// Fraction of a level difference moved per tick off canals.
    pub base_flow_rate: f32,
    /// Multiplier on the flow rate for canal sources.
    pub canal_rate_multiplier: f32,
    /// Flow vectors no longer than this count as no flow.
    pub flow_epsilon: f32,
    /// Alignment beyond which a direction counts as down- or upstream.
    pub alignment_threshold: f32,
    /// Extra level a canal source gets when pushing downstream.
    pub pressure_bonus: f32,
    /// Multiplier on the amount moved downstream.
    pub downstream_boost: f32,
    /// Multiplier on the amount moved upstream.
    pub upstream_damping: f32,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            emitter_rate: 0.5,
            dry_threshold: 0.01,
            base_flow_rate: 0.1,
            canal_rate_multiplier: 4.0,
            flow_epsilon: 1e-3,
            alignment_threshold: 0.5,
            pressure_bonus: 0.5,
            downstream_boost: 3.0,
            upstream_damping: 0.1,
        }
    }
}

impl FluidParams {
    /// Set the emitter rate.
    pub fn with_emitter_rate(mut self, rate: f32) -> Self {
        self.emitter_rate = rate;
        self
    }

    /// Set the off-canal flow rate.
    pub fn with_base_flow_rate(mut self, rate: f32) -> Self {
        self.base_flow_rate = rate;
        self
    }

    /// Reject negative or non-finite constants.
    pub fn validate(&self) -> SimResult<()> {
        let values = [
            ("emitter_rate", self.emitter_rate),
            ("dry_threshold", self.dry_threshold),
            ("base_flow_rate", self.base_flow_rate),
            ("canal_rate_multiplier", self.canal_rate_multiplier),
            ("flow_epsilon", self.flow_epsilon),
            ("alignment_threshold", self.alignment_threshold),
            ("pressure_bonus", self.pressure_bonus),
            ("downstream_boost", self.downstream_boost),
            ("upstream_damping", self.upstream_damping),
        ];
        for (name, v) in values {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for deterministic simulation.
    pub seed: u64,
    /// Solver ticks per second of elapsed time.
    pub tick_rate_hz: f64,
    /// Snapshot broadcasts per second of elapsed time.
    pub broadcast_rate_hz: f64,
    /// Fluid solver constants.
    pub fluid: FluidParams,
    /// Whether the solver starts enabled.
    pub start_enabled: bool,
    /// Fluid placed at the emitter before the first tick.
    pub initial_charge: f32,
    /// Most solver ticks a single `advance` call may catch up on. Elapsed
    /// time beyond that is dropped.
    pub max_catch_up_ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate_hz: 20.0,
            broadcast_rate_hz: 10.0,
            fluid: FluidParams::default(),
            start_enabled: true,
            initial_charge: 0.0,
            max_catch_up_ticks: 200,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the solver tick rate.
    pub fn with_tick_rate(mut self, hz: f64) -> Self {
        self.tick_rate_hz = hz;
        self
    }

    /// Set the snapshot broadcast rate.
    pub fn with_broadcast_rate(mut self, hz: f64) -> Self {
        self.broadcast_rate_hz = hz;
        self
    }

    /// Set the fluid solver constants.
    pub fn with_fluid(mut self, fluid: FluidParams) -> Self {
        self.fluid = fluid;
        self
    }

    /// Set whether the solver starts enabled.
    pub fn with_start_enabled(mut self, enabled: bool) -> Self {
        self.start_enabled = enabled;
        self
    }

    /// Set the fluid placed at the emitter before the first tick.
    pub fn with_initial_charge(mut self, amount: f32) -> Self {
        self.initial_charge = amount;
        self
    }

    /// Set the catch-up limit of a single `advance` call, in ticks.
    pub fn with_max_catch_up_ticks(mut self, ticks: u32) -> Self {
        self.max_catch_up_ticks = ticks;
        self
    }

    /// Seconds of wall time `advance` may owe before the excess is dropped.
    pub fn max_backlog_secs(&self) -> f64 {
        f64::from(self.max_catch_up_ticks) * self.tick_interval()
    }

    /// Seconds of simulated time per solver tick.
    pub fn tick_interval(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    /// Reject rates and constants the orchestrator cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        for (name, hz) in [
            ("tick_rate_hz", self.tick_rate_hz),
            ("broadcast_rate_hz", self.broadcast_rate_hz),
        ] {
            if !(hz.is_finite() && hz > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be positive, got {hz}"
                )));
            }
        }
        if self.max_catch_up_ticks == 0 {
            return Err(SimError::InvalidConfig(
                "max_catch_up_ticks must be at least 1".to_string(),
            ));
        }
        if !(self.initial_charge.is_finite() && self.initial_charge >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "initial_charge must be finite and non-negative, got {}",
                self.initial_charge
            )));
        }
        self.fluid.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert!((config.tick_rate_hz - 20.0).abs() < f64::EPSILON);
        assert!((config.broadcast_rate_hz - 10.0).abs() < f64::EPSILON);
        assert!(config.start_enabled);
        assert!((config.fluid.emitter_rate - 0.5).abs() < f32::EPSILON);
        assert!((config.tick_interval() - 0.05).abs() < 1e-12);
        assert_eq!(config.initial_charge, 0.0);
        assert_eq!(config.max_catch_up_ticks, 200);
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_seed(123)
            .with_tick_rate(30.0)
            .with_broadcast_rate(5.0)
            .with_start_enabled(false)
            .with_fluid(FluidParams::default().with_emitter_rate(0.0));
        assert_eq!(config.seed, 123);
        assert!((config.tick_rate_hz - 30.0).abs() < f64::EPSILON);
        assert!((config.broadcast_rate_hz - 5.0).abs() < f64::EPSILON);
        assert!(!config.start_enabled);
        assert_eq!(config.fluid.emitter_rate, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_rates() {
        assert!(matches!(
            SimConfig::default().with_tick_rate(0.0).validate(),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(
            SimConfig::default()
                .with_broadcast_rate(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_negative_fluid_constants() {
        let fluid = FluidParams::default().with_base_flow_rate(-0.1);
        assert!(SimConfig::default().with_fluid(fluid).validate().is_err());
    }

    #[test]
    fn rejects_zero_catch_up_and_negative_charge() {
        assert!(
            SimConfig::default()
                .with_max_catch_up_ticks(0)
                .validate()
                .is_err()
        );
        assert!(
            SimConfig::default()
                .with_initial_charge(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            SimConfig::default()
                .with_initial_charge(10.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn backlog_spans_the_catch_up_ticks() {
        let config = SimConfig::default().with_max_catch_up_ticks(40);
        assert!((config.max_backlog_secs() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{"seed": 5, "fluid": {"emitter_rate": 1.0}}"#).unwrap();
        assert_eq!(config.seed, 5);
        assert_eq!(config.fluid.emitter_rate, 1.0);
        assert!((config.fluid.pressure_bonus - 0.5).abs() < f32::EPSILON);
    }
}
