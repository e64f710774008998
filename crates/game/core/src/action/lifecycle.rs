//! Effect and passive lifecycle action bodies.
//!
//! These bodies are the only writers of the active flags and hook
//! subscriptions, so activating and deactivating always stays on the undo
//! stack.

use crate::effect::passive::PassiveId;
use crate::effect::{EffectId, EffectSeed};
use crate::error::EngineError;
use crate::state::{GameState, PieceId, PlayerId};

use super::{ActionError, ActionKind};

/// Registers (on first perform) and activates a status effect.
///
/// The instance keeps its id across undo/redo cycles, so re-performing
/// re-activates the same registry entry instead of minting a new one.
#[derive(Debug)]
pub struct InflictEffect {
    pub seed: EffectSeed,
    pub target: PieceId,
    pub inflicted_by: PlayerId,
    effect: Option<EffectId>,
}

impl InflictEffect {
    pub fn new(seed: EffectSeed, target: PieceId, inflicted_by: PlayerId) -> Self {
        Self {
            seed,
            target,
            inflicted_by,
            effect: None,
        }
    }

    /// The registered instance, once performed at least once.
    pub fn effect(&self) -> Option<EffectId> {
        self.effect
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let id = match self.effect {
            Some(id) => id,
            None => {
                let id = state
                    .effects
                    .register(self.seed, self.target, self.inflicted_by);
                self.effect = Some(id);
                id
            }
        };
        state.activate_effect(id)
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        let id = self
            .effect
            .ok_or(ActionError::NotPerformed(ActionKind::InflictEffect))?;
        state.deactivate_effect(id)
    }
}

/// Deactivates an active status effect; undo re-activates it.
///
/// Queued by reactions when a duration expires or a shield is consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeactivateEffect {
    pub effect: EffectId,
}

impl DeactivateEffect {
    pub fn new(effect: EffectId) -> Self {
        Self { effect }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        state.deactivate_effect(self.effect)
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        state.activate_effect(self.effect)
    }
}

/// Activates a registered passive; undo deactivates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivatePassive {
    pub passive: PassiveId,
}

impl ActivatePassive {
    pub fn new(passive: PassiveId) -> Self {
        Self { passive }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        state.activate_passive(self.passive)
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        state.deactivate_passive(self.passive)
    }
}

/// Deactivates an active passive; undo re-activates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeactivatePassive {
    pub passive: PassiveId,
}

impl DeactivatePassive {
    pub fn new(passive: PassiveId) -> Self {
        Self { passive }
    }

    pub(super) fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        state.deactivate_passive(self.passive)
    }

    pub(super) fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        state.activate_passive(self.passive)
    }
}
