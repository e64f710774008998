//! Turn-economy action bodies.

use crate::error::EngineError;
use crate::state::{GameState, PlayerId};

use super::{ActionError, ActionKind};

/// Hands the turn from `outgoing` to `incoming`.
///
/// The body owns only the current-player transfer and the turn counter;
/// everything else that happens at a turn boundary (energy upkeep, effect
/// duration ticks, damage ticks) arrives as resultants queued by Turn-hook
/// subscribers before the action is performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnBody {
    pub outgoing: PlayerId,
    pub incoming: PlayerId,
}

impl TurnBody {
    pub fn new(outgoing: PlayerId, incoming: PlayerId) -> Self {
        Self { outgoing, incoming }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        if state.current_player != self.outgoing {
            return Err(ActionError::StaleTurn {
                expected: self.outgoing,
                actual: state.current_player,
            }
            .into());
        }
        state.current_player = self.incoming;
        state.turn_count += 1;
        Ok(())
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        if state.current_player != self.incoming {
            return Err(ActionError::StaleTurn {
                expected: self.incoming,
                actual: state.current_player,
            }
            .into());
        }
        state.current_player = self.outgoing;
        state.turn_count -= 1;
        Ok(())
    }
}

/// Sets a player's remaining manual actions to an absolute value.
///
/// Used where a relative delta would be wrong: turn upkeep resets the
/// budget, and a declared Move charges one by setting `current - 1`
/// computed at declaration time. The previous values are stacked so
/// perform/undo cycles restore exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualActionsSet {
    pub player: PlayerId,
    pub value: i32,
    previous: Vec<i32>,
}

impl ManualActionsSet {
    pub fn new(player: PlayerId, value: i32) -> Self {
        Self {
            player,
            value,
            previous: Vec::new(),
        }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let player = state.player_mut(self.player)?;
        self.previous.push(player.manual_actions);
        player.manual_actions = self.value;
        Ok(())
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let restored = self
            .previous
            .pop()
            .ok_or(ActionError::DeltaUnderflow(ActionKind::ManualActionsSet))?;
        state.player_mut(self.player)?.manual_actions = restored;
        Ok(())
    }
}
