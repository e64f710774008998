//! Declaration marker bodies.
//!
//! Move and PlayAbility resolve entirely at declaration time: pathfinding,
//! rule checks, and reaction hooks all run before the action is pushed, and
//! their consequences are attached as resultants. The bodies themselves are
//! markers that record what was declared.

use crate::ability::AbilityId;
use crate::error::EngineError;
use crate::hex::HexCoordinate;
use crate::state::{GameState, PieceId};

use super::{ActionError, ActionKind};

/// Marker body of a declared Move; the route itself is carried by the
/// PositionChange resultants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveBody {
    pub piece: PieceId,
    pub destination: HexCoordinate,
}

impl MoveBody {
    pub fn new(piece: PieceId, destination: HexCoordinate) -> Self {
        Self { piece, destination }
    }

    pub(super) fn perform(&mut self, _state: &mut GameState) -> Result<(), EngineError> {
        Ok(())
    }

    pub(super) fn undo(&mut self, _state: &mut GameState) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Marker body of a declared PlayAbility.
///
/// Undo is not supported: ability callbacks may capture state that cannot
/// be replayed in reverse, so the history refuses to cross one of these
/// rather than half-restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayAbilityBody {
    pub ability: AbilityId,
    pub source: Option<PieceId>,
}

impl PlayAbilityBody {
    pub fn new(ability: AbilityId, source: Option<PieceId>) -> Self {
        Self { ability, source }
    }

    pub(super) fn perform(&mut self, _state: &mut GameState) -> Result<(), EngineError> {
        Ok(())
    }

    pub(super) fn undo(&mut self, _state: &mut GameState) -> Result<(), EngineError> {
        Err(ActionError::UndoUnsupported(ActionKind::PlayAbility).into())
    }
}
