//! Causality hooks: per-action-kind publication points.
//!
//! A hook fires synchronously when an action of its kind is constructed (or,
//! for Move and PlayAbility, while a mutable prompt object is still being
//! shaped), before anything is performed. Subscribers are invoked in
//! subscription order and may queue resultants on the pending action or
//! mutate the prompt in place. Subscription and unsubscription are tied
//! deterministically to effect/passive activation; the lists carry no
//! duplicate suppression, so a double subscribe or a missing unsubscribe is
//! a programming error and fails loudly.

use std::collections::BTreeMap;

use crate::ability::{AbilityId, SourceRule, TargetRule};
use crate::effect::{EffectId, passive::PassiveId};
use crate::state::{PieceId, PlayerId};

/// The action kinds that publish a causality hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HookKind {
    /// Fired with a freshly constructed, not-yet-performed Turn action.
    Turn,
    /// Fired with a mutable [`MovePrompt`] before a Move's range is final.
    MovePrompt,
    /// Fired with a mutable [`AbilityPrompt`] before a PlayAbility resolves.
    AbilityPrompt,
}

/// Who reacted: an active status effect or an active passive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubscriberId {
    Effect(EffectId),
    Passive(PassiveId),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("{subscriber:?} is already subscribed to {kind}")]
    AlreadySubscribed {
        kind: HookKind,
        subscriber: SubscriberId,
    },

    #[error("{subscriber:?} is not subscribed to {kind}")]
    NotSubscribed {
        kind: HookKind,
        subscriber: SubscriberId,
    },
}

/// Ordered subscriber lists, one per hook kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HookRegistry {
    lists: BTreeMap<HookKind, Vec<SubscriberId>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subscriber; first subscribed reacts first.
    pub fn subscribe(&mut self, kind: HookKind, subscriber: SubscriberId) -> Result<(), HookError> {
        let list = self.lists.entry(kind).or_default();
        if list.contains(&subscriber) {
            return Err(HookError::AlreadySubscribed { kind, subscriber });
        }
        list.push(subscriber);
        Ok(())
    }

    pub fn unsubscribe(
        &mut self,
        kind: HookKind,
        subscriber: SubscriberId,
    ) -> Result<(), HookError> {
        let list = self.lists.entry(kind).or_default();
        let position = list
            .iter()
            .position(|&s| s == subscriber)
            .ok_or(HookError::NotSubscribed { kind, subscriber })?;
        list.remove(position);
        Ok(())
    }

    /// Subscribers of one hook, in subscription order.
    pub fn subscribers(&self, kind: HookKind) -> &[SubscriberId] {
        self.lists.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Mutable parameters of a Move being declared, exposed to the MovePrompt
/// hook before pathfinding runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePrompt {
    pub piece: PieceId,
    pub min_distance: u32,
    pub max_distance: u32,
}

/// Mutable parameters of a PlayAbility being declared, exposed to the
/// AbilityPrompt hook before rules are evaluated. Extra rules apply to this
/// single resolution only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityPrompt {
    pub ability: AbilityId,
    pub performer: PlayerId,
    pub source: Option<PieceId>,
    pub extra_source_rules: Vec<SourceRule>,
    pub extra_target_rules: Vec<TargetRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_order_is_preserved() {
        let mut hooks = HookRegistry::new();
        let first = SubscriberId::Effect(EffectId(0));
        let second = SubscriberId::Passive(PassiveId(0));
        hooks.subscribe(HookKind::Turn, first).unwrap();
        hooks.subscribe(HookKind::Turn, second).unwrap();
        assert_eq!(hooks.subscribers(HookKind::Turn), &[first, second]);
    }

    #[test]
    fn duplicate_subscribe_and_missing_unsubscribe_are_loud() {
        let mut hooks = HookRegistry::new();
        let sub = SubscriberId::Effect(EffectId(3));
        hooks.subscribe(HookKind::Turn, sub).unwrap();
        assert!(matches!(
            hooks.subscribe(HookKind::Turn, sub),
            Err(HookError::AlreadySubscribed { .. })
        ));
        hooks.unsubscribe(HookKind::Turn, sub).unwrap();
        assert!(matches!(
            hooks.unsubscribe(HookKind::Turn, sub),
            Err(HookError::NotSubscribed { .. })
        ));
    }

    #[test]
    fn unsubscribe_removes_only_one_kind() {
        let mut hooks = HookRegistry::new();
        let sub = SubscriberId::Effect(EffectId(1));
        hooks.subscribe(HookKind::Turn, sub).unwrap();
        hooks.subscribe(HookKind::MovePrompt, sub).unwrap();
        hooks.unsubscribe(HookKind::Turn, sub).unwrap();
        assert!(hooks.subscribers(HookKind::Turn).is_empty());
        assert_eq!(hooks.subscribers(HookKind::MovePrompt), &[sub]);
    }
}
