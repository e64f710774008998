//! The board: cell storage, occupancy, and path search.
//!
//! A board owns the coordinate-to-cell mapping and every piece standing on
//! it. Invariant: a piece's stored position always names exactly one cell
//! whose occupant is that piece, and a cell holds at most one occupant.
//! Occupancy is mutated only through [`Board::move_piece`], which is in turn
//! called only by PositionChange action bodies.

mod cell;
mod map;
mod path;

pub use cell::{Cell, CellSpec};
pub use map::{MapError, MapLayout, offset_to_cube};
pub use path::PathMap;

use std::collections::{BTreeMap, BTreeSet};

use crate::hex::HexCoordinate;
use crate::state::{Piece, PieceId, Team};

/// Errors surfaced by board lookups and occupancy mutation.
///
/// Strict lookup misses and occupancy desyncs indicate authoring or logic
/// bugs, not recoverable runtime conditions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("no cell at {0}")]
    MissingCell(HexCoordinate),

    #[error("duplicate cell at {0}")]
    DuplicateCell(HexCoordinate),

    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),

    #[error("cell {0} is not occupiable")]
    NotOccupiable(HexCoordinate),

    #[error("cell {0} is already occupied")]
    Occupied(HexCoordinate),

    #[error("occupancy desync for {piece} at {coordinate}")]
    OccupancyDesync {
        piece: PieceId,
        coordinate: HexCoordinate,
    },
}

/// Cell map plus the set of pieces occupying it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: BTreeMap<HexCoordinate, Cell>,
    pieces: BTreeMap<PieceId, Piece>,
    next_piece_id: u32,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell during generation. Duplicate coordinates are an authoring
    /// error and fail fatally.
    pub fn insert_cell(
        &mut self,
        coordinate: HexCoordinate,
        spec: CellSpec,
    ) -> Result<(), BoardError> {
        if self.cells.contains_key(&coordinate) {
            return Err(BoardError::DuplicateCell(coordinate));
        }
        self.cells.insert(coordinate, Cell::new(coordinate, spec));
        Ok(())
    }

    /// Looks up one cell.
    ///
    /// With `strict`, a missing coordinate is a fatal authoring/logic error;
    /// without it, the miss is the caller's to handle as `None`.
    pub fn cell_at(
        &self,
        coordinate: HexCoordinate,
        strict: bool,
    ) -> Result<Option<&Cell>, BoardError> {
        match self.cells.get(&coordinate) {
            Some(cell) => Ok(Some(cell)),
            None if strict => Err(BoardError::MissingCell(coordinate)),
            None => Ok(None),
        }
    }

    /// Batch lookup with the same strict/lenient contract as [`cell_at`],
    /// suppressing duplicate coordinates.
    ///
    /// [`cell_at`]: Board::cell_at
    pub fn cells_at(
        &self,
        coordinates: impl IntoIterator<Item = HexCoordinate>,
        strict: bool,
    ) -> Result<Vec<&Cell>, BoardError> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for coordinate in coordinates {
            if !seen.insert(coordinate) {
                continue;
            }
            if let Some(cell) = self.cell_at(coordinate, strict)? {
                out.push(cell);
            }
        }
        Ok(out)
    }

    pub fn contains(&self, coordinate: HexCoordinate) -> bool {
        self.cells.contains_key(&coordinate)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Places a new piece on an existing, free cell.
    pub fn spawn_piece(
        &mut self,
        team: Team,
        coordinate: HexCoordinate,
        max_health: i32,
    ) -> Result<PieceId, BoardError> {
        let cell = self
            .cells
            .get_mut(&coordinate)
            .ok_or(BoardError::MissingCell(coordinate))?;
        if !cell.occupiable {
            return Err(BoardError::NotOccupiable(coordinate));
        }
        if cell.is_occupied() {
            return Err(BoardError::Occupied(coordinate));
        }

        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;
        cell.set_occupant(Some(id));
        self.pieces
            .insert(id, Piece::new(id, team, coordinate, max_health));
        Ok(id)
    }

    pub fn piece(&self, id: PieceId) -> Result<&Piece, BoardError> {
        self.pieces.get(&id).ok_or(BoardError::UnknownPiece(id))
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Result<&mut Piece, BoardError> {
        self.pieces.get_mut(&id).ok_or(BoardError::UnknownPiece(id))
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Relocates a piece, keeping the position/occupant invariant intact.
    ///
    /// Only PositionChange bodies call this. Both endpoints are validated so
    /// that a desync surfaces here rather than corrupting later undo.
    pub(crate) fn move_piece(
        &mut self,
        id: PieceId,
        from: HexCoordinate,
        to: HexCoordinate,
    ) -> Result<(), BoardError> {
        let piece = self.pieces.get(&id).ok_or(BoardError::UnknownPiece(id))?;
        if piece.position != from {
            return Err(BoardError::OccupancyDesync {
                piece: id,
                coordinate: from,
            });
        }
        let origin = self
            .cells
            .get(&from)
            .ok_or(BoardError::MissingCell(from))?;
        if origin.occupant() != Some(id) {
            return Err(BoardError::OccupancyDesync {
                piece: id,
                coordinate: from,
            });
        }
        let destination = self.cells.get(&to).ok_or(BoardError::MissingCell(to))?;
        if !destination.occupiable {
            return Err(BoardError::NotOccupiable(to));
        }
        if destination.is_occupied() {
            return Err(BoardError::Occupied(to));
        }

        self.cells
            .get_mut(&from)
            .ok_or(BoardError::MissingCell(from))?
            .set_occupant(None);
        self.cells
            .get_mut(&to)
            .ok_or(BoardError::MissingCell(to))?
            .set_occupant(Some(id));
        self.pieces
            .get_mut(&id)
            .ok_or(BoardError::UnknownPiece(id))?
            .position = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoordinate;

    fn open_board(radius: i32) -> Board {
        let mut board = Board::new();
        for x in -radius..=radius {
            for y in (-radius).max(-x - radius)..=radius.min(-x + radius) {
                board
                    .insert_cell(HexCoordinate::new(x, y, -x - y), CellSpec::GROUND)
                    .unwrap();
            }
        }
        board
    }

    #[test]
    fn strict_lookup_fails_on_missing_cell() {
        let board = open_board(1);
        let far = HexCoordinate::new(5, 0, -5);
        assert_eq!(board.cell_at(far, false).unwrap(), None);
        assert_eq!(
            board.cell_at(far, true),
            Err(BoardError::MissingCell(far))
        );
    }

    #[test]
    fn batch_lookup_suppresses_duplicates() {
        let board = open_board(1);
        let origin = HexCoordinate::ORIGIN;
        let cells = board
            .cells_at([origin, origin, HexCoordinate::new(1, 0, -1)], true)
            .unwrap();
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn duplicate_cell_insert_is_fatal() {
        let mut board = open_board(0);
        assert_eq!(
            board.insert_cell(HexCoordinate::ORIGIN, CellSpec::WALL),
            Err(BoardError::DuplicateCell(HexCoordinate::ORIGIN))
        );
    }

    #[test]
    fn spawn_and_move_keep_occupancy_in_sync() {
        let mut board = open_board(1);
        let origin = HexCoordinate::ORIGIN;
        let next = HexCoordinate::new(0, 1, -1);
        let id = board.spawn_piece(Team::Red, origin, 5).unwrap();

        assert_eq!(board.cell_at(origin, true).unwrap().unwrap().occupant(), Some(id));
        board.move_piece(id, origin, next).unwrap();
        assert_eq!(board.piece(id).unwrap().position, next);
        assert_eq!(board.cell_at(origin, true).unwrap().unwrap().occupant(), None);
        assert_eq!(board.cell_at(next, true).unwrap().unwrap().occupant(), Some(id));
    }

    #[test]
    fn move_from_wrong_origin_is_a_desync() {
        let mut board = open_board(1);
        let id = board.spawn_piece(Team::Red, HexCoordinate::ORIGIN, 5).unwrap();
        let wrong = HexCoordinate::new(1, -1, 0);
        assert_eq!(
            board.move_piece(id, wrong, HexCoordinate::new(0, 1, -1)),
            Err(BoardError::OccupancyDesync {
                piece: id,
                coordinate: wrong,
            })
        );
    }

    #[test]
    fn spawn_rejects_occupied_and_unoccupiable_cells() {
        let mut board = open_board(1);
        board.spawn_piece(Team::Red, HexCoordinate::ORIGIN, 5).unwrap();
        assert_eq!(
            board.spawn_piece(Team::Blue, HexCoordinate::ORIGIN, 5),
            Err(BoardError::Occupied(HexCoordinate::ORIGIN))
        );

        let mut walled = Board::new();
        walled.insert_cell(HexCoordinate::ORIGIN, CellSpec::WALL).unwrap();
        assert_eq!(
            walled.spawn_piece(Team::Red, HexCoordinate::ORIGIN, 5),
            Err(BoardError::NotOccupiable(HexCoordinate::ORIGIN))
        );
    }
}
