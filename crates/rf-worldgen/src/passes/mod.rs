//! Generation passes, in the order the generator runs them.
//!
//! Boundary, highway and block layout are sampled up front and then evaluated
//! per cell in a single sweep; canals and decay rewrite the finished canvas.

/// Radial city boundary and central park.
pub mod boundary;
/// Rectangular block grid, block archetypes, and interior fill.
pub mod blocks;
/// Meandering canals that record their flow direction.
pub mod canal;
/// Cellular-automaton cleanup.
pub mod decay;
/// Radial highway spokes and the ring road.
pub mod highway;

/// A cell position relative to the map centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    /// Distance from the centre, in cells.
    pub radius: f32,
    /// Angle from the +x axis, in `[-PI, PI]`.
    pub angle: f32,
}

impl Polar {
    /// Polar coordinates of `(x, y)` around `center`.
    pub fn of(x: f32, y: f32, center: (f32, f32)) -> Self {
        let (dx, dy) = (x - center.0, y - center.1);
        Self {
            radius: dx.hypot(dy),
            angle: dy.atan2(dx),
        }
    }
}
