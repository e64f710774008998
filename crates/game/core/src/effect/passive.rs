//! Passives: indefinite reactive modifiers bound to a player.
//!
//! Unlike status effects, passives carry no duration; they are switched on
//! and off only by the ActivatePassive/DeactivatePassive actions, so the
//! whole lifecycle stays on the undo stack.

use std::collections::BTreeMap;
use std::fmt;

use crate::action::hook::HookKind;
use crate::state::PlayerId;

/// Unique identifier for a passive instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveId(pub u32);

impl fmt::Display for PassiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "passive#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PassiveError {
    #[error("unknown passive {0}")]
    Unknown(PassiveId),

    #[error("{0} is already active")]
    AlreadyActive(PassiveId),

    #[error("{0} is not active")]
    NotActive(PassiveId),
}

/// The closed set of passive kinds; reactions live in [`react`].
///
/// [`react`]: crate::effect::react
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveKind {
    /// Standard turn economy: when the empowering player's turn begins,
    /// grant them energy, zero the outgoing player's energy, and reset
    /// manual actions.
    EnergyUpkeep { grant: i32, base_actions: i32 },

    /// The empowering player's pieces move `bonus` cells further.
    LongStride { bonus: u32 },

    /// Grants the empowering player a control sphere at each of their turns.
    SphereTribute { amount: i32 },
}

impl PassiveKind {
    /// The causality hooks an active instance of this kind subscribes to.
    pub fn hooks(self) -> &'static [HookKind] {
        match self {
            PassiveKind::EnergyUpkeep { .. } => &[HookKind::Turn],
            PassiveKind::LongStride { .. } => &[HookKind::MovePrompt],
            PassiveKind::SphereTribute { .. } => &[HookKind::Turn],
        }
    }
}

/// A passive instance empowering one player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passive {
    pub id: PassiveId,
    pub kind: PassiveKind,
    pub player: PlayerId,
    pub active: bool,
}

/// Registry of every passive instance in a match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveSet {
    passives: BTreeMap<PassiveId, Passive>,
    next_id: u32,
}

impl PassiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a detached (inactive) passive and returns its id.
    pub fn register(&mut self, kind: PassiveKind, player: PlayerId) -> PassiveId {
        let id = PassiveId(self.next_id);
        self.next_id += 1;
        self.passives.insert(
            id,
            Passive {
                id,
                kind,
                player,
                active: false,
            },
        );
        id
    }

    pub fn get(&self, id: PassiveId) -> Result<&Passive, PassiveError> {
        self.passives.get(&id).ok_or(PassiveError::Unknown(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Passive> {
        self.passives.values()
    }

    pub(crate) fn mark_active(&mut self, id: PassiveId) -> Result<(), PassiveError> {
        let passive = self.passives.get_mut(&id).ok_or(PassiveError::Unknown(id))?;
        if passive.active {
            return Err(PassiveError::AlreadyActive(id));
        }
        passive.active = true;
        Ok(())
    }

    pub(crate) fn mark_inactive(&mut self, id: PassiveId) -> Result<(), PassiveError> {
        let passive = self.passives.get_mut(&id).ok_or(PassiveError::Unknown(id))?;
        if !passive.active {
            return Err(PassiveError::NotActive(id));
        }
        passive.active = false;
        Ok(())
    }
}
