use std::f32::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;
use rf_core::GridDims;

use super::Polar;
use crate::config::GenConfig;

/// One sinusoidal term of the boundary wobble.
#[derive(Debug, Clone, Copy)]
struct Harmonic {
    amplitude: f32,
    frequency: f32,
    phase: f32,
}

/// The city's outer edge: a circle whose radius wobbles with angle.
#[derive(Debug, Clone)]
pub struct CityBoundary {
    center: (f32, f32),
    base_radius: f32,
    harmonics: [Harmonic; 2],
    park_radius: f32,
}

impl CityBoundary {
    /// Sample a boundary for a map of the given size.
    pub fn sample(dims: GridDims, config: &GenConfig, rng: &mut StdRng) -> Self {
        let half_side = dims.width().min(dims.height()) as f32 / 2.0;
        let mut harmonic = |amplitude: f32, frequency: f32| Harmonic {
            amplitude,
            frequency,
            phase: rng.random_range(0.0..TAU),
        };
        let harmonics = [
            harmonic(config.boundary_wobble, 3.0),
            harmonic(config.boundary_wobble * 0.5, 7.0),
        ];
        Self {
            center: dims.center(),
            base_radius: half_side * config.city_radius,
            harmonics,
            park_radius: config.center_park_radius,
        }
    }

    /// Map centre in cell coordinates.
    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    /// Un-wobbled city radius.
    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    /// City radius in the direction `angle`.
    pub fn radius_at(&self, angle: f32) -> f32 {
        let wobble: f32 = self
            .harmonics
            .iter()
            .map(|h| h.amplitude * (h.frequency * angle + h.phase).sin())
            .sum();
        self.base_radius * (1.0 + wobble)
    }

    /// Whether the point lies inside the city.
    pub fn contains(&self, p: Polar) -> bool {
        p.radius <= self.radius_at(p.angle)
    }

    /// Whether the point lies in the reserved central park.
    pub fn in_center_park(&self, p: Polar) -> bool {
        p.radius < self.park_radius
    }

    /// Building density in `[0, 1]`: 1 at the centre, 0 at the boundary.
    pub fn density(&self, p: Polar) -> f32 {
        let edge = self.radius_at(p.angle).max(1.0);
        (1.0 - p.radius / edge).clamp(0.0, 1.0)
    }
}
