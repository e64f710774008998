//! Board generation from authored map descriptions.
//!
//! A map is an ordered sequence of equal-meaning row strings, each character
//! mapped through a legend to a cell spec; blank characters mean "no cell
//! here". Spawn points are authored as small (column, row) pair lists per
//! team, converted through the same axis convention as the rows. Malformed
//! layouts fail immediately and fatally at generation time: they are
//! authored-data bugs, not runtime conditions.

use std::collections::BTreeMap;

use crate::board::{Board, BoardError, CellSpec};
use crate::hex::HexCoordinate;
use crate::state::{PieceId, Team};

/// Errors raised while generating a board from an authored layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("row {row}, column {column}: no legend entry for {symbol:?}")]
    UnknownSymbol { symbol: char, row: usize, column: usize },

    #[error("more spawn teams than sides: {teams}")]
    TooManyTeams { teams: usize },

    #[error("spawn for {team} at {coordinate} failed: {source}")]
    BadSpawn {
        team: Team,
        coordinate: HexCoordinate,
        source: BoardError,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// An authored map description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    /// Row strings, top to bottom. Each character is one cell column.
    pub rows: Vec<String>,
    /// Character-to-cell-spec legend. Space never needs an entry.
    pub legend: BTreeMap<char, CellSpec>,
    /// Per-team spawn points as (column, row) pairs into the row grid.
    pub spawns: Vec<Vec<(i32, i32)>>,
}

/// Converts a (column, row) layout offset to a board coordinate.
///
/// Columns run along the x axis and rows along the z axis; y is derived.
/// This is the single axis convention shared by row parsing and spawn lists.
pub fn offset_to_cube(column: i32, row: i32) -> HexCoordinate {
    HexCoordinate::axial(column, row)
}

impl Board {
    /// Builds a board and its starting pieces from an authored layout.
    ///
    /// Returns the board plus the spawned piece ids, grouped per team in
    /// authoring order.
    pub fn generate(
        layout: &MapLayout,
        starting_health: i32,
    ) -> Result<(Board, Vec<Vec<PieceId>>), MapError> {
        let mut board = Board::new();
        for (row, line) in layout.rows.iter().enumerate() {
            for (column, symbol) in line.chars().enumerate() {
                if symbol == ' ' {
                    continue;
                }
                let spec = layout
                    .legend
                    .get(&symbol)
                    .copied()
                    .ok_or(MapError::UnknownSymbol {
                        symbol,
                        row,
                        column,
                    })?;
                board.insert_cell(offset_to_cube(column as i32, row as i32), spec)?;
            }
        }

        if layout.spawns.len() > Team::ALL.len() {
            return Err(MapError::TooManyTeams {
                teams: layout.spawns.len(),
            });
        }
        let mut spawned = Vec::with_capacity(layout.spawns.len());
        for (&team, points) in Team::ALL.iter().zip(&layout.spawns) {
            let mut ids = Vec::with_capacity(points.len());
            for &(column, row) in points {
                let coordinate = offset_to_cube(column, row);
                let id = board
                    .spawn_piece(team, coordinate, starting_health)
                    .map_err(|source| MapError::BadSpawn {
                        team,
                        coordinate,
                        source,
                    })?;
                ids.push(id);
            }
            spawned.push(ids);
        }
        Ok((board, spawned))
    }
}
