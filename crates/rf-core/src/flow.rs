use serde::{Deserialize, Serialize};

/// A 2D flow direction in grid space (`y` grows downwards).
///
/// Canal cells carry the direction the canal was carved in; every other cell
/// holds [`FlowVec::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowVec {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl FlowVec {
    /// The zero vector.
    pub const ZERO: FlowVec = FlowVec { x: 0.0, y: 0.0 };

    /// Build a vector from components.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians from the +x axis.
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Dot product with a raw `(x, y)` pair.
    pub fn dot(self, (x, y): (f32, f32)) -> f32 {
        self.x * x + self.y * y
    }

    /// Whether both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero() {
        assert!(FlowVec::ZERO.is_zero());
        assert!(FlowVec::default().is_zero());
        assert!(!FlowVec::new(0.0, -0.1).is_zero());
    }

    #[test]
    fn from_angle_is_unit() {
        let v = FlowVec::from_angle(1.234);
        assert!((v.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dot_with_axis() {
        let v = FlowVec::new(1.0, 0.0);
        assert_eq!(v.dot((1.0, 0.0)), 1.0);
        assert_eq!(v.dot((-1.0, 0.0)), -1.0);
        assert_eq!(v.dot((0.0, 1.0)), 0.0);
    }
}
