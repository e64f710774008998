//! Value-change action bodies.
//!
//! Each body captures a change function (old value -> new value) at
//! construction time and keeps a stack of the deltas it actually applied.
//! Undo pops the last delta and subtracts it, so repeated perform/undo
//! cycles stay exact even when other actions moved the underlying value in
//! between.

use std::fmt;

use crate::effect::EffectId;
use crate::error::EngineError;
use crate::state::{GameState, PieceId, PlayerId};

use super::{ActionError, ActionKind};

/// Change function captured at construction: old value in, new value out.
pub type ChangeFn = Box<dyn Fn(i32) -> i32>;

/// Shared perform/undo bookkeeping for all value-change bodies.
struct DeltaTrack {
    change: ChangeFn,
    applied: Vec<i32>,
}

impl DeltaTrack {
    fn new(change: impl Fn(i32) -> i32 + 'static) -> Self {
        Self {
            change: Box::new(change),
            applied: Vec::new(),
        }
    }

    fn apply(&mut self, current: i32) -> i32 {
        let next = (self.change)(current);
        self.applied.push(next - current);
        next
    }

    fn revert(&mut self, current: i32, kind: ActionKind) -> Result<i32, ActionError> {
        let delta = self
            .applied
            .pop()
            .ok_or(ActionError::DeltaUnderflow(kind))?;
        Ok(current - delta)
    }
}

impl fmt::Debug for DeltaTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeltaTrack")
            .field("applied", &self.applied)
            .finish_non_exhaustive()
    }
}

/// Changes a piece's current health.
#[derive(Debug)]
pub struct HpChange {
    pub piece: PieceId,
    track: DeltaTrack,
}

impl HpChange {
    pub fn new(piece: PieceId, change: impl Fn(i32) -> i32 + 'static) -> Self {
        Self {
            piece,
            track: DeltaTrack::new(change),
        }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let piece = state.board.piece_mut(self.piece)?;
        piece.health = self.track.apply(piece.health);
        Ok(())
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let current = state.board.piece(self.piece)?.health;
        let restored = self.track.revert(current, ActionKind::HpChange)?;
        state.board.piece_mut(self.piece)?.health = restored;
        Ok(())
    }
}

/// Changes a player's energy.
#[derive(Debug)]
pub struct EnergyChange {
    pub player: PlayerId,
    track: DeltaTrack,
}

impl EnergyChange {
    pub fn new(player: PlayerId, change: impl Fn(i32) -> i32 + 'static) -> Self {
        Self {
            player,
            track: DeltaTrack::new(change),
        }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let player = state.player_mut(self.player)?;
        player.energy = self.track.apply(player.energy);
        Ok(())
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let current = state.player(self.player)?.energy;
        let restored = self.track.revert(current, ActionKind::EnergyChange)?;
        state.player_mut(self.player)?.energy = restored;
        Ok(())
    }
}

/// Changes a player's control-sphere count.
#[derive(Debug)]
pub struct ControlSphereChange {
    pub player: PlayerId,
    track: DeltaTrack,
}

impl ControlSphereChange {
    pub fn new(player: PlayerId, change: impl Fn(i32) -> i32 + 'static) -> Self {
        Self {
            player,
            track: DeltaTrack::new(change),
        }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let player = state.player_mut(self.player)?;
        player.control_spheres = self.track.apply(player.control_spheres);
        Ok(())
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let current = state.player(self.player)?.control_spheres;
        let restored = self.track.revert(current, ActionKind::ControlSphereChange)?;
        state.player_mut(self.player)?.control_spheres = restored;
        Ok(())
    }
}

/// Changes a status effect's remaining duration.
#[derive(Debug)]
pub struct EffectDurationChange {
    pub effect: EffectId,
    track: DeltaTrack,
}

impl EffectDurationChange {
    pub fn new(effect: EffectId, change: impl Fn(i32) -> i32 + 'static) -> Self {
        Self {
            effect,
            track: DeltaTrack::new(change),
        }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let effect = state.effects.get_mut(self.effect)?;
        effect.duration = self.track.apply(effect.duration);
        Ok(())
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let current = state.effects.get(self.effect)?.duration;
        let restored = self.track.revert(current, ActionKind::EffectDurationChange)?;
        state.effects.get_mut(self.effect)?.duration = restored;
        Ok(())
    }
}
