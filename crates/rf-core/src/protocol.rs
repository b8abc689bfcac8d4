//! Message tags and payload records exchanged with observers.
//!
//! The transport itself lives outside this workspace; these types pin down
//! what goes over it.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::grid::GridDims;
use crate::terrain::TerrainMap;

/// Tag of the periodic fluid snapshot broadcast.
pub const MSG_FLUID_PATCH: &str = "fluidPatch";

/// Tag of the world configuration sent once when an observer joins.
pub const MSG_FLUID_CONFIG: &str = "fluidConfig";

/// Tag of observer click input, handled outside the simulation core.
pub const MSG_INPUT_CLICK: &str = "input_click";

/// World size record sent to newly joined observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
}

impl WorldConfig {
    /// Validate the record into grid dimensions.
    pub fn dims(&self) -> CoreResult<GridDims> {
        GridDims::new(self.width, self.height)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<GridDims> for WorldConfig {
    fn from(dims: GridDims) -> Self {
        Self {
            width: dims.width(),
            height: dims.height(),
        }
    }
}

/// Everything a newly joined observer needs to draw the static world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainSync {
    /// World size.
    pub config: WorldConfig,
    /// Category codes, row-major, one byte per cell.
    pub cells: Vec<u8>,
}

impl TerrainSync {
    /// Capture the join payload for a terrain map.
    pub fn from_map(map: &TerrainMap) -> Self {
        Self {
            config: map.config(),
            cells: map.cell_bytes(),
        }
    }

    /// Rebuild the category grid on the receiving side.
    pub fn to_map(&self) -> CoreResult<TerrainMap> {
        TerrainMap::from_codes(self.config.dims()?, &self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;

    #[test]
    fn message_tags() {
        assert_eq!(MSG_FLUID_PATCH, "fluidPatch");
        assert_eq!(MSG_FLUID_CONFIG, "fluidConfig");
        assert_eq!(MSG_INPUT_CLICK, "input_click");
    }

    #[test]
    fn config_json_shape() {
        let config = WorldConfig {
            width: 100,
            height: 80,
        };
        assert_eq!(config.to_json().unwrap(), r#"{"width":100,"height":80}"#);
    }

    #[test]
    fn zero_sized_config_is_rejected() {
        let config = WorldConfig {
            width: 0,
            height: 5,
        };
        assert!(config.dims().is_err());
    }

    #[test]
    fn terrain_sync_rebuilds_map() {
        let dims = GridDims::new(2, 2).unwrap();
        let map = TerrainMap::from_cells(
            dims,
            vec![CellKind::Road, CellKind::Wall, CellKind::Canal, CellKind::Dirt],
        )
        .unwrap();
        let sync = TerrainSync::from_map(&map);
        let json = serde_json::to_string(&sync).unwrap();
        let back: TerrainSync = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_map().unwrap().cells(), map.cells());
    }
}
