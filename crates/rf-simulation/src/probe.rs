use serde::Serialize;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::system::System;

/// Field statistics captured at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbeSample {
    /// Tick the sample was taken after.
    pub tick: u64,
    /// Sum of all levels.
    pub total_mass: f64,
    /// Cells above the dry threshold.
    pub wet_cells: usize,
    /// Highest level in the field.
    pub max_level: f32,
}

/// Records field statistics every `interval` ticks.
#[derive(Debug, Clone)]
pub struct FieldProbe {
    interval: u64,
    samples: Vec<ProbeSample>,
}

impl FieldProbe {
    /// Sample every `interval` ticks; an interval of 0 samples every tick.
    pub fn every(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            samples: Vec::new(),
        }
    }

    /// Samples recorded so far, oldest first.
    pub fn samples(&self) -> &[ProbeSample] {
        &self.samples
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<&ProbeSample> {
        self.samples.last()
    }
}

impl System for FieldProbe {
    fn name(&self) -> &str {
        "field_probe"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let tick = ctx.tick();
        if tick % self.interval == 0 {
            self.samples.push(ProbeSample {
                tick,
                total_mass: ctx.solver.total_mass(),
                wet_cells: ctx.solver.wet_cells(),
                max_level: ctx.solver.max_level(),
            });
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
