use rf_core::{CellKind, CoreResult, FlowVec, GridDims, TerrainMap};

/// Mutable grid the generation passes write into.
///
/// Starts as all dirt with zero flow and is frozen into a [`TerrainMap`] once
/// every pass has run.
#[derive(Debug, Clone)]
pub struct Canvas {
    dims: GridDims,
    cells: Vec<CellKind>,
    flow: Vec<FlowVec>,
}

impl Canvas {
    /// A canvas of dirt with no flow.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![CellKind::Dirt; dims.len()],
            flow: vec![FlowVec::ZERO; dims.len()],
        }
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Category of the cell at `index`.
    pub fn get(&self, index: usize) -> CellKind {
        self.cells[index]
    }

    /// Overwrite a cell's category, clearing its flow unless it stays a canal.
    pub fn set(&mut self, index: usize, kind: CellKind) {
        self.cells[index] = kind;
        if kind != CellKind::Canal {
            self.flow[index] = FlowVec::ZERO;
        }
    }

    /// Turn a cell into a canal flowing along `direction`.
    pub fn set_canal(&mut self, index: usize, direction: FlowVec) {
        self.cells[index] = CellKind::Canal;
        self.flow[index] = direction;
    }

    /// All categories, row-major.
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// All flow vectors, row-major.
    pub fn flows(&self) -> &[FlowVec] {
        &self.flow
    }

    /// Number of cells of a category.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Freeze into an immutable terrain map.
    pub fn into_map(self) -> CoreResult<TerrainMap> {
        TerrainMap::new(self.dims, self.cells, self.flow)
    }
}
