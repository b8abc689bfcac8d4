use serde::Serialize;

use crate::cell::CellKind;
use crate::error::{CoreError, CoreResult};
use crate::flow::FlowVec;
use crate::grid::GridDims;
use crate::protocol::WorldConfig;

/// The static world: one category and one flow vector per cell, row-major.
///
/// A map is validated on construction (buffer lengths match the grid, flow is
/// zero away from canals) and is read-only afterwards, so it can be shared
/// between the solver and the broadcaster behind an `Arc` without locking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainMap {
    dims: GridDims,
    cells: Vec<CellKind>,
    flow: Vec<FlowVec>,
}

impl TerrainMap {
    /// Build a map from per-cell categories and flow vectors.
    pub fn new(dims: GridDims, cells: Vec<CellKind>, flow: Vec<FlowVec>) -> CoreResult<Self> {
        for len in [cells.len(), flow.len()] {
            if len != dims.len() {
                return Err(CoreError::LengthMismatch {
                    expected: dims.len(),
                    actual: len,
                });
            }
        }
        if let Some(index) = cells
            .iter()
            .zip(&flow)
            .position(|(kind, v)| *kind != CellKind::Canal && !v.is_zero())
        {
            return Err(CoreError::FlowOffCanal { index });
        }
        Ok(Self { dims, cells, flow })
    }

    /// Build a map with no flow anywhere.
    pub fn from_cells(dims: GridDims, cells: Vec<CellKind>) -> CoreResult<Self> {
        let flow = vec![FlowVec::ZERO; cells.len()];
        Self::new(dims, cells, flow)
    }

    /// A map where every cell has the same category and no flow.
    pub fn filled(dims: GridDims, kind: CellKind) -> Self {
        Self {
            dims,
            cells: vec![kind; dims.len()],
            flow: vec![FlowVec::ZERO; dims.len()],
        }
    }

    /// Rebuild a map from the byte grid an observer receives on join.
    ///
    /// Flow vectors are not part of the wire format and come back as zero.
    pub fn from_codes(dims: GridDims, codes: &[u8]) -> CoreResult<Self> {
        if codes.len() < dims.len() {
            return Err(CoreError::LengthMismatch {
                expected: dims.len(),
                actual: codes.len(),
            });
        }
        let cells = codes[..dims.len()]
            .iter()
            .map(|&c| CellKind::try_from(c))
            .collect::<CoreResult<Vec<_>>>()?;
        Self::from_cells(dims, cells)
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dims.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dims.height()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: maps are never empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All categories, row-major.
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// All flow vectors, row-major.
    pub fn flows(&self) -> &[FlowVec] {
        &self.flow
    }

    /// Category of the cell at `index`, if in range.
    pub fn kind(&self, index: usize) -> Option<CellKind> {
        self.cells.get(index).copied()
    }

    /// Category at `(x, y)`, or `None` off the grid.
    pub fn kind_at(&self, x: i64, y: i64) -> Option<CellKind> {
        self.dims.index(x, y).map(|i| self.cells[i])
    }

    /// Flow vector of the cell at `index`; zero when out of range.
    pub fn flow(&self, index: usize) -> FlowVec {
        self.flow.get(index).copied().unwrap_or(FlowVec::ZERO)
    }

    /// Whether fluid can neither enter nor leave the cell at `index`.
    ///
    /// Out-of-range indices count as blocked.
    pub fn is_blocked(&self, index: usize) -> bool {
        self.kind(index).is_none_or(CellKind::is_structural)
    }

    /// Byte-exact category grid for transmission to observers.
    pub fn cell_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|k| k.code()).collect()
    }

    /// The `{width, height}` record sent alongside the category grid.
    pub fn config(&self) -> WorldConfig {
        WorldConfig::from(self.dims)
    }

    /// Number of cells per category, indexed by wire code.
    pub fn histogram(&self) -> [usize; 8] {
        let mut counts = [0; 8];
        for kind in &self.cells {
            counts[kind.code() as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: usize, h: usize) -> GridDims {
        GridDims::new(w, h).unwrap()
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = TerrainMap::from_cells(dims(2, 2), vec![CellKind::Dirt; 3]).unwrap_err();
        assert_eq!(
            err,
            CoreError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_flow_off_canal() {
        let cells = vec![CellKind::Canal, CellKind::Road];
        let flow = vec![FlowVec::new(1.0, 0.0), FlowVec::new(1.0, 0.0)];
        let err = TerrainMap::new(dims(2, 1), cells, flow).unwrap_err();
        assert_eq!(err, CoreError::FlowOffCanal { index: 1 });
    }

    #[test]
    fn accepts_flow_on_canal() {
        let cells = vec![CellKind::Canal, CellKind::Road];
        let flow = vec![FlowVec::new(0.0, 1.0), FlowVec::ZERO];
        let map = TerrainMap::new(dims(2, 1), cells, flow).unwrap();
        assert_eq!(map.flow(0), FlowVec::new(0.0, 1.0));
        assert_eq!(map.flow(99), FlowVec::ZERO);
    }

    #[test]
    fn blocked_cells() {
        let cells = vec![
            CellKind::Wall,
            CellKind::Tank,
            CellKind::Skyscraper,
            CellKind::Water,
        ];
        let map = TerrainMap::from_cells(dims(2, 2), cells).unwrap();
        assert!(map.is_blocked(0));
        assert!(map.is_blocked(1));
        assert!(map.is_blocked(2));
        assert!(!map.is_blocked(3));
        assert!(map.is_blocked(4));
    }

    #[test]
    fn bytes_round_trip_through_codes() {
        let cells = CellKind::ALL.to_vec();
        let map = TerrainMap::from_cells(dims(4, 2), cells).unwrap();
        let bytes = map.cell_bytes();
        assert_eq!(bytes, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        let decoded = TerrainMap::from_codes(dims(4, 2), &bytes).unwrap();
        assert_eq!(decoded.cells(), map.cells());
    }

    #[test]
    fn from_codes_rejects_short_and_unknown() {
        assert!(TerrainMap::from_codes(dims(2, 2), &[0, 0, 0]).is_err());
        assert_eq!(
            TerrainMap::from_codes(dims(1, 1), &[9]).unwrap_err(),
            CoreError::UnknownCellKind(9)
        );
    }

    #[test]
    fn histogram_counts_categories() {
        let mut cells = vec![CellKind::Dirt; 6];
        cells[1] = CellKind::Road;
        cells[2] = CellKind::Road;
        cells[5] = CellKind::Skyscraper;
        let map = TerrainMap::from_cells(dims(3, 2), cells).unwrap();
        assert_eq!(map.histogram(), [3, 0, 2, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn config_reports_dimensions() {
        let map = TerrainMap::filled(dims(7, 5), CellKind::Park);
        assert_eq!(
            map.config(),
            WorldConfig {
                width: 7,
                height: 5
            }
        );
    }
}
