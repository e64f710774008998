//! Status effects: duration-bound reactive modifiers on pieces.
//!
//! An effect instance is inert data until an InflictEffect action activates
//! it; while active it is subscribed to the causality hooks its kind
//! declares, and its reactions (in [`react`]) are what give the kind its
//! gameplay meaning. Activation and deactivation must pair exactly:
//! double activation or double deactivation is a programming error and
//! fails loudly, because hook subscriber lists carry no duplicate
//! suppression.
//!
//! [`react`]: crate::effect::react

pub mod passive;
pub mod react;

use std::collections::BTreeMap;
use std::fmt;

use crate::action::hook::HookKind;
use crate::state::{PieceId, PlayerId};

/// Unique identifier for a status-effect instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u32);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect#{}", self.0)
    }
}

/// Errors from the effect registry and activation lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("unknown effect {0}")]
    Unknown(EffectId),

    #[error("{0} is already active")]
    AlreadyActive(EffectId),

    #[error("{0} is not active")]
    NotActive(EffectId),
}

/// The closed set of status-effect kinds.
///
/// Reactions are dispatched by exhaustive match in [`react`], which keeps
/// the "which kinds answer which hooks" mapping statically checkable.
///
/// [`react`]: crate::effect::react
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Deals `amount` damage to its target on each of the owner's turns,
    /// unless a Shield on the same target absorbs it.
    DamageOverTime { amount: i32 },

    /// Absorbs one incoming damage tick, consuming itself.
    Shield,

    /// Reduces the target's maximum move distance while active.
    Slow { penalty: u32 },

    /// The target's pieces cannot source abilities while active.
    Silence,
}

impl EffectKind {
    /// The causality hooks an active instance of this kind subscribes to.
    ///
    /// Every kind listens to Turn for its own duration tick.
    pub fn hooks(self) -> &'static [HookKind] {
        match self {
            EffectKind::DamageOverTime { .. } => &[HookKind::Turn],
            EffectKind::Shield => &[HookKind::Turn],
            EffectKind::Slow { .. } => &[HookKind::Turn, HookKind::MovePrompt],
            EffectKind::Silence => &[HookKind::Turn, HookKind::AbilityPrompt],
        }
    }
}

/// A detached effect description, as produced by ability effect factories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSeed {
    pub kind: EffectKind,
    pub duration: i32,
}

/// A status-effect instance bound to one piece.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: EffectId,
    pub kind: EffectKind,
    pub target: PieceId,
    pub inflicted_by: PlayerId,
    /// Remaining duration in owner turns; the instance deactivates once this
    /// would cross below zero.
    pub duration: i32,
    pub active: bool,
}

/// Registry of every effect instance created during a match.
///
/// Instances are registered detached and never removed; the `active` flag
/// plus hook subscriptions carry the lifecycle, which is what lets undo
/// re-activate an instance under its original id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSet {
    effects: BTreeMap<EffectId, StatusEffect>,
    next_id: u32,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a detached (inactive) instance and returns its id.
    pub fn register(
        &mut self,
        seed: EffectSeed,
        target: PieceId,
        inflicted_by: PlayerId,
    ) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.effects.insert(
            id,
            StatusEffect {
                id,
                kind: seed.kind,
                target,
                inflicted_by,
                duration: seed.duration,
                active: false,
            },
        );
        id
    }

    pub fn get(&self, id: EffectId) -> Result<&StatusEffect, EffectError> {
        self.effects.get(&id).ok_or(EffectError::Unknown(id))
    }

    pub(crate) fn get_mut(&mut self, id: EffectId) -> Result<&mut StatusEffect, EffectError> {
        self.effects.get_mut(&id).ok_or(EffectError::Unknown(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.values()
    }

    /// Active effects currently bound to `target`.
    pub fn active_on(&self, target: PieceId) -> impl Iterator<Item = &StatusEffect> {
        self.effects
            .values()
            .filter(move |e| e.active && e.target == target)
    }

    /// Marks an instance active. The caller (GameState) is responsible for
    /// the matching hook subscriptions.
    pub(crate) fn mark_active(&mut self, id: EffectId) -> Result<(), EffectError> {
        let effect = self.get_mut(id)?;
        if effect.active {
            return Err(EffectError::AlreadyActive(id));
        }
        effect.active = true;
        Ok(())
    }

    pub(crate) fn mark_inactive(&mut self, id: EffectId) -> Result<(), EffectError> {
        let effect = self.get_mut(id)?;
        if !effect.active {
            return Err(EffectError::NotActive(id));
        }
        effect.active = false;
        Ok(())
    }
}
