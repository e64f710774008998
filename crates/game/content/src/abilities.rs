//! The standard ability book.

use hexmarch_core::{
    Ability, AbilityBook, Action, ActionBody, ControlSphereChange, EffectKind, EffectSeed,
    EnergyChange, FollowUp, GameConfig, HexCoordinate, SourceRule, SourcedAbility, TargetRule,
    UnsourcedAbility,
};

fn seed(kind: EffectKind) -> EffectSeed {
    EffectSeed {
        kind,
        duration: GameConfig::STANDARD_EFFECT_DURATION,
    }
}

/// A single target cell plus its six neighbors.
fn burst_area() -> Vec<HexCoordinate> {
    let mut area = vec![HexCoordinate::ORIGIN];
    area.extend(HexCoordinate::ORIGIN.adjacent());
    area
}

/// Registers the standard abilities, in fixed book order.
pub fn standard_abilities() -> AbilityBook {
    let mut book = AbilityBook::new();

    // 0: single-target poison, needs line of sight.
    book.register(Ability::Sourced(SourcedAbility {
        name: "venom dart".into(),
        hit_area: vec![HexCoordinate::ORIGIN],
        effects: vec![Box::new(|| seed(EffectKind::DamageOverTime { amount: 1 }))],
        source_rules: vec![SourceRule::SameTeam],
        target_rules: vec![TargetRule::OppositeTeam, TargetRule::StandardCollision],
        energy_cost: 2,
        follow_up: None,
    }));

    // 1: shield a friendly piece; wards pass through walls.
    book.register(Ability::Sourced(SourcedAbility {
        name: "aegis".into(),
        hit_area: vec![HexCoordinate::ORIGIN],
        effects: vec![Box::new(|| seed(EffectKind::Shield))],
        source_rules: vec![SourceRule::SameTeam],
        target_rules: vec![TargetRule::SameTeam],
        energy_cost: 1,
        follow_up: None,
    }));

    // 2: area slow around the anchor cell.
    book.register(Ability::Sourced(SourcedAbility {
        name: "mire burst".into(),
        hit_area: burst_area(),
        effects: vec![Box::new(|| seed(EffectKind::Slow { penalty: 1 }))],
        source_rules: vec![SourceRule::SameTeam],
        target_rules: vec![TargetRule::OppositeTeam, TargetRule::StandardCollision],
        energy_cost: 2,
        follow_up: None,
    }));

    // 3: silence one enemy piece.
    book.register(Ability::Sourced(SourcedAbility {
        name: "hush".into(),
        hit_area: vec![HexCoordinate::ORIGIN],
        effects: vec![Box::new(|| seed(EffectKind::Silence))],
        source_rules: vec![SourceRule::SameTeam],
        target_rules: vec![TargetRule::OppositeTeam, TargetRule::StandardCollision],
        energy_cost: 2,
        follow_up: None,
    }));

    // 4: slow an adjacent enemy, then reposition the caster for free.
    book.register(Ability::Sourced(SourcedAbility {
        name: "lunge".into(),
        hit_area: vec![HexCoordinate::ORIGIN],
        effects: vec![Box::new(|| seed(EffectKind::Slow { penalty: 1 }))],
        source_rules: vec![SourceRule::SameTeam],
        target_rules: vec![TargetRule::OppositeTeam, TargetRule::StandardCollision],
        energy_cost: 1,
        follow_up: Some(FollowUp::MoveAfterCast { max_distance: 2 }),
    }));

    // 5: trade a control sphere for energy; anchored on any occupied cell.
    book.register(Ability::Unsourced(UnsourcedAbility {
        name: "tithe".into(),
        target_rules: vec![TargetRule::Occupied],
        energy_cost: 0,
        action: Box::new(|_, performer, _| {
            vec![
                Action::new(
                    performer,
                    ActionBody::ControlSphereChange(ControlSphereChange::new(performer, |c| c - 1)),
                ),
                Action::new(
                    performer,
                    ActionBody::EnergyChange(EnergyChange::new(performer, |e| e + 2)),
                ),
            ]
        }),
    }));

    book
}
