use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::protocol::WorldConfig;

/// Offsets of the 8-neighbourhood, row by row.
const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One of the four axis-aligned neighbour directions.
///
/// `Up` is towards row 0, `Down` towards the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards smaller `y`.
    Up,
    /// Towards larger `y`.
    Down,
    /// Towards smaller `x`.
    Left,
    /// Towards larger `x`.
    Right,
}

impl Direction {
    /// The canonical neighbour order: up, down, left, right.
    pub const CANONICAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Integer step `(dx, dy)` for this direction.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Unit vector pointing towards the neighbour, in grid space.
    pub fn unit(self) -> (f32, f32) {
        let (dx, dy) = self.offset();
        (dx as f32, dy as f32)
    }
}

/// Width and height of a row-major cell grid.
///
/// Construction rejects empty grids, so every `GridDims` indexes at least one
/// cell and `len()` never overflows. Deserialization goes through the same
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WorldConfig", into = "WorldConfig")]
pub struct GridDims {
    width: usize,
    height: usize,
}

impl GridDims {
    /// Validate and build grid dimensions.
    pub fn new(width: usize, height: usize) -> CoreResult<Self> {
        let valid = width > 0
            && height > 0
            && width
                .checked_mul(height)
                .is_some_and(|n| n <= isize::MAX as usize);
        if !valid {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, `width * height`.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false: empty grids cannot be constructed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `(x, y)` lies on the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Row-major index of `(x, y)`, or `None` when off the grid.
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    /// Column and row of a row-major index. The index must be in range.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Centre cell coordinates `(width / 2, height / 2)` as floating point.
    pub fn center(&self) -> (f32, f32) {
        ((self.width / 2) as f32, (self.height / 2) as f32)
    }

    /// Row-major index of the centre cell `(width / 2, height / 2)`.
    pub fn center_index(&self) -> usize {
        (self.height / 2) * self.width + self.width / 2
    }

    /// The neighbour of `index` in `direction`, or `None` across a grid edge.
    ///
    /// Edges never wrap.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.coords(index);
        let (dx, dy) = direction.offset();
        self.index(x as i64 + dx, y as i64 + dy)
    }

    /// In-bounds members of the 8-neighbourhood of `(x, y)`.
    pub fn moore_neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = usize> {
        let dims = *self;
        MOORE_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| dims.index(x as i64 + dx, y as i64 + dy))
    }
}

impl TryFrom<WorldConfig> for GridDims {
    type Error = CoreError;

    fn try_from(config: WorldConfig) -> CoreResult<Self> {
        config.dims()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_grids() {
        assert_eq!(
            GridDims::new(0, 10),
            Err(CoreError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert!(GridDims::new(10, 0).is_err());
        assert!(GridDims::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn row_major_indexing() {
        let dims = GridDims::new(4, 3).unwrap();
        assert_eq!(dims.len(), 12);
        assert_eq!(dims.index(0, 0), Some(0));
        assert_eq!(dims.index(3, 0), Some(3));
        assert_eq!(dims.index(1, 2), Some(9));
        assert_eq!(dims.coords(9), (1, 2));
        assert_eq!(dims.index(4, 0), None);
        assert_eq!(dims.index(-1, 0), None);
    }

    #[test]
    fn neighbors_do_not_wrap() {
        let dims = GridDims::new(3, 3).unwrap();
        // Right edge of row 0 must not reach the start of row 1.
        assert_eq!(dims.neighbor(2, Direction::Right), None);
        assert_eq!(dims.neighbor(3, Direction::Left), None);
        assert_eq!(dims.neighbor(0, Direction::Up), None);
        assert_eq!(dims.neighbor(6, Direction::Down), None);
        assert_eq!(dims.neighbor(4, Direction::Up), Some(1));
        assert_eq!(dims.neighbor(4, Direction::Down), Some(7));
    }

    #[test]
    fn moore_neighbors_clip_at_corners() {
        let dims = GridDims::new(3, 3).unwrap();
        assert_eq!(dims.moore_neighbors(0, 0).count(), 3);
        assert_eq!(dims.moore_neighbors(1, 0).count(), 5);
        assert_eq!(dims.moore_neighbors(1, 1).count(), 8);
    }

    #[test]
    fn center_index_matches_coords() {
        let dims = GridDims::new(10, 10).unwrap();
        assert_eq!(dims.center_index(), 55);
        assert_eq!(dims.coords(dims.center_index()), (5, 5));
    }

    #[test]
    fn deserialization_validates() {
        let dims: GridDims = serde_json::from_str(r#"{"width":4,"height":3}"#).unwrap();
        assert_eq!(dims, GridDims::new(4, 3).unwrap());
        assert_eq!(serde_json::to_string(&dims).unwrap(), r#"{"width":4,"height":3}"#);

        let err = serde_json::from_str::<GridDims>(r#"{"width":0,"height":3}"#).unwrap_err();
        assert!(err.to_string().contains("invalid grid dimensions"));
        assert!(serde_json::from_str::<GridDims>(r#"{"width":3,"height":0}"#).is_err());
    }
}
