//! Cells: the static and dynamic state of one hex position.

use crate::hex::HexCoordinate;
use crate::state::PieceId;

/// Static attributes of a cell, authored once per legend symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSpec {
    /// Movement may not cross this cell.
    pub blocks_pathing: bool,
    /// Sightlines may not cross this cell.
    pub blocks_targeting: bool,
    /// A piece may stand here.
    pub occupiable: bool,
}

impl CellSpec {
    /// Open ground: crossable, see-through, occupiable.
    pub const GROUND: Self = Self {
        blocks_pathing: false,
        blocks_targeting: false,
        occupiable: true,
    };

    /// Solid wall: blocks everything, never occupiable.
    pub const WALL: Self = Self {
        blocks_pathing: true,
        blocks_targeting: true,
        occupiable: false,
    };

    /// Chasm: impassable but see-through.
    pub const CHASM: Self = Self {
        blocks_pathing: true,
        blocks_targeting: false,
        occupiable: false,
    };
}

/// One hex position on a board.
///
/// Created once during board generation, never destroyed during a match.
/// The occupant reference is mutated by PositionChange actions only.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    coordinate: HexCoordinate,
    pub blocks_pathing: bool,
    pub blocks_targeting: bool,
    pub occupiable: bool,
    occupant: Option<PieceId>,
}

impl Cell {
    pub fn new(coordinate: HexCoordinate, spec: CellSpec) -> Self {
        Self {
            coordinate,
            blocks_pathing: spec.blocks_pathing,
            blocks_targeting: spec.blocks_targeting,
            occupiable: spec.occupiable,
            occupant: None,
        }
    }

    pub fn coordinate(&self) -> HexCoordinate {
        self.coordinate
    }

    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// True if a piece could stand here right now.
    pub fn is_free(&self) -> bool {
        self.occupiable && self.occupant.is_none()
    }

    pub(crate) fn set_occupant(&mut self, piece: Option<PieceId>) {
        self.occupant = piece;
    }
}
