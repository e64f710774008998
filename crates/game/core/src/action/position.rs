//! Board-occupancy action bodies.

use crate::error::EngineError;
use crate::hex::HexCoordinate;
use crate::state::{GameState, PieceId};

/// Relocates one piece by exactly one recorded step.
///
/// A declared Move is a container whose resultants are one PositionChange
/// per path step, so undo retraces the route cell by cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionChange {
    pub piece: PieceId,
    pub from: HexCoordinate,
    pub to: HexCoordinate,
}

impl PositionChange {
    pub fn new(piece: PieceId, from: HexCoordinate, to: HexCoordinate) -> Self {
        Self { piece, from, to }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        state.board.move_piece(self.piece, self.from, self.to)?;
        Ok(())
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        state.board.move_piece(self.piece, self.to, self.from)?;
        Ok(())
    }
}
