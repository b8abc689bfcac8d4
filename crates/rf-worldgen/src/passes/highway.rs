use std::f32::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;

use super::Polar;
use super::boundary::CityBoundary;
use crate::config::GenConfig;
use crate::noise::wrap_angle;

/// Ring road half-width in cells.
const RING_HALF_WIDTH: f32 = 1.0;

/// A radial highway whose heading drifts linearly with distance.
#[derive(Debug, Clone, Copy)]
pub struct Spoke {
    base_angle: f32,
    curvature: f32,
}

impl Spoke {
    /// Heading of the spoke at distance `radius` from the centre.
    pub fn angle_at(&self, radius: f32) -> f32 {
        self.base_angle + self.curvature * radius
    }
}

/// The ring road around the inner city.
#[derive(Debug, Clone, Copy)]
struct Ring {
    radius: f32,
    wobble_phase: f32,
}

/// All highways of one city: spokes plus an optional ring.
#[derive(Debug, Clone)]
pub struct HighwayNetwork {
    spokes: Vec<Spoke>,
    ring: Option<Ring>,
    half_width: f32,
}

impl HighwayNetwork {
    /// Sample evenly spaced, slightly jittered and curved spokes.
    pub fn sample(boundary: &CityBoundary, config: &GenConfig, rng: &mut StdRng) -> Self {
        let count = config.highway_count;
        let spokes = (0..count)
            .map(|k| {
                let even = k as f32 * TAU / count as f32;
                Spoke {
                    base_angle: even + rng.random_range(-0.3..0.3),
                    curvature: rng
                        .random_range(-config.highway_curvature..=config.highway_curvature),
                }
            })
            .collect();
        let ring = config.ring_enabled.then(|| Ring {
            radius: boundary.base_radius() * config.ring_fraction,
            wobble_phase: rng.random_range(0.0..TAU),
        });
        Self {
            spokes,
            ring,
            half_width: config.highway_width * config.highway_tightness,
        }
    }

    /// The sampled spokes.
    pub fn spokes(&self) -> &[Spoke] {
        &self.spokes
    }

    /// Whether the point lies on any spoke or on the ring.
    pub fn contains(&self, p: Polar) -> bool {
        self.on_spoke(p) || self.on_ring(p)
    }

    fn on_spoke(&self, p: Polar) -> bool {
        // Angular tolerance shrinks with distance so spokes keep a constant width.
        let tolerance = self.half_width / p.radius.max(1.0);
        self.spokes
            .iter()
            .any(|s| wrap_angle(p.angle - s.angle_at(p.radius)).abs() <= tolerance)
    }

    fn on_ring(&self, p: Polar) -> bool {
        self.ring.is_some_and(|ring| {
            let radius = ring.radius * (1.0 + 0.05 * (4.0 * p.angle + ring.wobble_phase).sin());
            (p.radius - radius).abs() <= RING_HALF_WIDTH
        })
    }
}
