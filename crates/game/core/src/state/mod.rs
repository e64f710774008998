//! Authoritative match state.
//!
//! Everything here is plain data: the board with its pieces, the players,
//! every effect and passive instance, and the hook subscriber lists. All of
//! it is mutated exclusively inside action bodies during perform/undo; that
//! single write-discipline rule is what keeps the undo stack exact.

mod piece;
mod player;

pub use piece::{Piece, PieceId, Team};
pub use player::{Player, PlayerId};

use std::collections::BTreeMap;

use crate::action::hook::{HookRegistry, SubscriberId};
use crate::board::Board;
use crate::config::GameConfig;
use crate::effect::passive::{PassiveId, PassiveSet};
use crate::effect::{EffectId, EffectSet};
use crate::error::EngineError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}

/// Canonical snapshot of one match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub config: GameConfig,
    pub board: Board,
    players: BTreeMap<PlayerId, Player>,
    pub effects: EffectSet,
    pub passives: PassiveSet,
    pub hooks: HookRegistry,
    /// Player whose turn it currently is; transferred only by Turn bodies.
    pub current_player: PlayerId,
    /// Count of Turn actions performed so far.
    pub turn_count: u32,
}

impl GameState {
    /// Assembles a fresh state. The first player in `players` opens the
    /// match.
    pub fn new(config: GameConfig, board: Board, players: Vec<Player>) -> Self {
        let current_player = players.first().map(|p| p.id).unwrap_or(PlayerId(0));
        Self {
            config,
            board,
            players: players.into_iter().map(|p| (p.id, p)).collect(),
            effects: EffectSet::new(),
            passives: PassiveSet::new(),
            hooks: HookRegistry::new(),
            current_player,
            turn_count: 0,
        }
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, StateError> {
        self.players.get(&id).ok_or(StateError::UnknownPlayer(id))
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, StateError> {
        self.players
            .get_mut(&id)
            .ok_or(StateError::UnknownPlayer(id))
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// The player whose turn follows `id`, cycling in id order.
    pub fn player_after(&self, id: PlayerId) -> Result<PlayerId, StateError> {
        if !self.players.contains_key(&id) {
            return Err(StateError::UnknownPlayer(id));
        }
        let next = self
            .players
            .range((std::ops::Bound::Excluded(id), std::ops::Bound::Unbounded))
            .next()
            .or_else(|| self.players.iter().next())
            .map(|(&id, _)| id);
        next.ok_or(StateError::UnknownPlayer(id))
    }

    /// Activates a status effect: flips the flag and subscribes the instance
    /// to the hooks its kind declares. Double activation fails loudly.
    pub(crate) fn activate_effect(&mut self, id: EffectId) -> Result<(), EngineError> {
        self.effects.mark_active(id)?;
        let kind = self.effects.get(id)?.kind;
        for &hook in kind.hooks() {
            self.hooks.subscribe(hook, SubscriberId::Effect(id))?;
        }
        Ok(())
    }

    /// Deactivates a status effect and unsubscribes it, exactly once.
    pub(crate) fn deactivate_effect(&mut self, id: EffectId) -> Result<(), EngineError> {
        self.effects.mark_inactive(id)?;
        let kind = self.effects.get(id)?.kind;
        for &hook in kind.hooks() {
            self.hooks.unsubscribe(hook, SubscriberId::Effect(id))?;
        }
        Ok(())
    }

    pub(crate) fn activate_passive(&mut self, id: PassiveId) -> Result<(), EngineError> {
        self.passives.mark_active(id)?;
        let kind = self.passives.get(id)?.kind;
        for &hook in kind.hooks() {
            self.hooks.subscribe(hook, SubscriberId::Passive(id))?;
        }
        Ok(())
    }

    pub(crate) fn deactivate_passive(&mut self, id: PassiveId) -> Result<(), EngineError> {
        self.passives.mark_inactive(id)?;
        let kind = self.passives.get(id)?.kind;
        for &hook in kind.hooks() {
            self.hooks.unsubscribe(hook, SubscriberId::Passive(id))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectKind, EffectSeed};

    fn two_player_state() -> GameState {
        GameState::new(
            GameConfig::default(),
            Board::new(),
            vec![
                Player::new(PlayerId(0), Team::Red),
                Player::new(PlayerId(1), Team::Blue),
            ],
        )
    }

    #[test]
    fn player_order_cycles() {
        let state = two_player_state();
        assert_eq!(state.player_after(PlayerId(0)).unwrap(), PlayerId(1));
        assert_eq!(state.player_after(PlayerId(1)).unwrap(), PlayerId(0));
        assert!(state.player_after(PlayerId(9)).is_err());
    }

    #[test]
    fn effect_activation_subscribes_declared_hooks() {
        use crate::action::hook::HookKind;

        let mut state = two_player_state();
        let id = state.effects.register(
            EffectSeed {
                kind: EffectKind::Slow { penalty: 1 },
                duration: 2,
            },
            PieceId(0),
            PlayerId(0),
        );
        state.activate_effect(id).unwrap();
        assert_eq!(state.hooks.subscribers(HookKind::Turn).len(), 1);
        assert_eq!(state.hooks.subscribers(HookKind::MovePrompt).len(), 1);

        state.deactivate_effect(id).unwrap();
        assert!(state.hooks.subscribers(HookKind::Turn).is_empty());
        assert!(state.hooks.subscribers(HookKind::MovePrompt).is_empty());
        // A second deactivation must not silently no-op.
        assert!(state.deactivate_effect(id).is_err());
    }
}
