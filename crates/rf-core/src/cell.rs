use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Terrain category of a single cell.
///
/// The discriminants are the wire codes shipped to observers and must stay
/// stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellKind {
    /// Open ground and rubble.
    #[default]
    Dirt = 0,
    /// Ruined walls.
    Wall = 1,
    /// Streets and highways.
    Road = 2,
    /// Overgrowth and parks.
    Park = 3,
    /// Stagnant water.
    Water = 4,
    /// Carved canals that carry a flow direction.
    Canal = 5,
    /// Round industrial tanks.
    Tank = 6,
    /// Intact high-rise structures.
    Skyscraper = 7,
}

impl CellKind {
    /// Every category, in wire-code order.
    pub const ALL: [CellKind; 8] = [
        CellKind::Dirt,
        CellKind::Wall,
        CellKind::Road,
        CellKind::Park,
        CellKind::Water,
        CellKind::Canal,
        CellKind::Tank,
        CellKind::Skyscraper,
    ];

    /// Wire code of this category.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the category is solid structure that blocks fluid entirely.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::Wall | Self::Tank | Self::Skyscraper)
    }

    /// Whether the category counts as water for neighbourhood rules.
    pub fn is_water_like(self) -> bool {
        matches!(self, Self::Water | Self::Canal)
    }

    /// Single-character glyph used by the ASCII renderer.
    pub fn glyph(self) -> char {
        match self {
            Self::Dirt => '.',
            Self::Wall => '#',
            Self::Road => '=',
            Self::Park => '"',
            Self::Water => '~',
            Self::Canal => '%',
            Self::Tank => 'o',
            Self::Skyscraper => 'H',
        }
    }
}

impl TryFrom<u8> for CellKind {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(CoreError::UnknownCellKind(code))
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dirt => write!(f, "dirt"),
            Self::Wall => write!(f, "wall"),
            Self::Road => write!(f, "road"),
            Self::Park => write!(f, "park"),
            Self::Water => write!(f, "water"),
            Self::Canal => write!(f, "canal"),
            Self::Tank => write!(f, "tank"),
            Self::Skyscraper => write!(f, "skyscraper"),
        }
    }
}
