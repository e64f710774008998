//! Reaction dispatch for causality hooks.
//!
//! Firing a hook walks the subscriber list in subscription order and lets
//! each active effect or passive answer: Turn subscribers queue resultants
//! on the pending Turn action, prompt subscribers mutate the prompt in
//! place. Dispatch is an exhaustive match over the closed kind sets, so a
//! new kind cannot forget to say how it reacts.

use crate::ability::SourceRule;
use crate::action::hook::{AbilityPrompt, HookKind, MovePrompt, SubscriberId};
use crate::action::{
    Action, ActionBody, ControlSphereChange, DeactivateEffect, EffectDurationChange,
    EnergyChange, HpChange, ManualActionsSet,
};
use crate::effect::passive::{PassiveId, PassiveKind};
use crate::effect::{EffectId, EffectKind};
use crate::error::EngineError;
use crate::state::{GameState, PlayerId};

/// Fires the Turn hook with a freshly constructed, not-yet-performed Turn
/// action. Subscribers queue their consequences as resultants.
pub fn fire_turn_hook(state: &GameState, action: &mut Action) -> Result<(), EngineError> {
    let ActionBody::Turn(body) = action.body() else {
        debug_assert!(false, "turn hook fired with a non-Turn action");
        return Ok(());
    };
    let outgoing = body.outgoing;
    let incoming = body.incoming;

    for subscriber in state.hooks.subscribers(HookKind::Turn).to_vec() {
        match subscriber {
            SubscriberId::Effect(id) => {
                effect_turn(state, action, id, incoming)?;
            }
            SubscriberId::Passive(id) => {
                passive_turn(state, action, id, outgoing, incoming)?;
            }
        }
    }
    Ok(())
}

/// Fires the MovePrompt hook, letting subscribers reshape the pending
/// move's distance window before pathfinding runs.
pub fn fire_move_prompt(state: &GameState, prompt: &mut MovePrompt) -> Result<(), EngineError> {
    for subscriber in state.hooks.subscribers(HookKind::MovePrompt).to_vec() {
        match subscriber {
            SubscriberId::Effect(id) => {
                let effect = state.effects.get(id)?;
                if let EffectKind::Slow { penalty } = effect.kind
                    && effect.target == prompt.piece
                {
                    prompt.max_distance = prompt.max_distance.saturating_sub(penalty);
                }
            }
            SubscriberId::Passive(id) => {
                let passive = state.passives.get(id)?;
                if let PassiveKind::LongStride { bonus } = passive.kind {
                    let mover = state.board.piece(prompt.piece)?.team;
                    if state.player(passive.player)?.team == mover {
                        prompt.max_distance += bonus;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Fires the AbilityPrompt hook, letting subscribers append extra predicate
/// rules for this single resolution.
pub fn fire_ability_prompt(
    state: &GameState,
    prompt: &mut AbilityPrompt,
) -> Result<(), EngineError> {
    for subscriber in state.hooks.subscribers(HookKind::AbilityPrompt).to_vec() {
        match subscriber {
            SubscriberId::Effect(id) => {
                let effect = state.effects.get(id)?;
                if matches!(effect.kind, EffectKind::Silence)
                    && prompt.source == Some(effect.target)
                {
                    prompt.extra_source_rules.push(SourceRule::Never);
                }
            }
            // No passive kind answers the ability prompt.
            SubscriberId::Passive(_) => {}
        }
    }
    Ok(())
}

fn effect_turn(
    state: &GameState,
    action: &mut Action,
    id: EffectId,
    incoming: PlayerId,
) -> Result<(), EngineError> {
    let effect = state.effects.get(id)?;
    // A turn qualifies for an effect when it hands the turn to the team of
    // the piece the effect sits on.
    let owner_team = state.board.piece(effect.target)?.team;
    if state.player(incoming)?.team != owner_team {
        return Ok(());
    }
    let performer = action.performer();

    if let EffectKind::DamageOverTime { amount } = effect.kind {
        // A shield on the same target absorbs the tick; first reacting
        // damage wins the shield, so skip shields already consumed by an
        // earlier resultant of this very action.
        let shield = state
            .effects
            .active_on(effect.target)
            .find(|e| matches!(e.kind, EffectKind::Shield) && !deactivates(action, e.id));
        match shield {
            Some(shield) => {
                action.queue_resultant(Action::new(
                    performer,
                    ActionBody::DeactivateEffect(DeactivateEffect::new(shield.id)),
                ))?;
            }
            None => {
                let target = effect.target;
                action.queue_resultant(Action::new(
                    performer,
                    ActionBody::HpChange(HpChange::new(target, move |h| h - amount)),
                ))?;
            }
        }
    }

    // Every kind ticks its duration on a qualifying turn and expires once
    // the remaining duration would cross below zero.
    action.queue_resultant(Action::new(
        performer,
        ActionBody::EffectDurationChange(EffectDurationChange::new(id, |d| d - 1)),
    ))?;
    if effect.duration - 1 < 0 && !deactivates(action, id) {
        action.queue_resultant(Action::new(
            performer,
            ActionBody::DeactivateEffect(DeactivateEffect::new(id)),
        ))?;
    }
    Ok(())
}

fn passive_turn(
    state: &GameState,
    action: &mut Action,
    id: PassiveId,
    outgoing: PlayerId,
    incoming: PlayerId,
) -> Result<(), EngineError> {
    let passive = state.passives.get(id)?;
    if passive.player != incoming {
        return Ok(());
    }
    let performer = action.performer();

    match passive.kind {
        PassiveKind::EnergyUpkeep {
            grant,
            base_actions,
        } => {
            action.queue_resultant(Action::new(
                performer,
                ActionBody::EnergyChange(EnergyChange::new(incoming, move |e| e + grant)),
            ))?;
            action.queue_resultant(Action::new(
                performer,
                ActionBody::EnergyChange(EnergyChange::new(outgoing, |_| 0)),
            ))?;
            action.queue_resultant(Action::new(
                performer,
                ActionBody::ManualActionsSet(ManualActionsSet::new(incoming, base_actions)),
            ))?;
        }
        PassiveKind::SphereTribute { amount } => {
            action.queue_resultant(Action::new(
                performer,
                ActionBody::ControlSphereChange(ControlSphereChange::new(incoming, move |c| {
                    c + amount
                })),
            ))?;
        }
        PassiveKind::LongStride { .. } => {}
    }
    Ok(())
}

/// Whether a DeactivateEffect for `id` is already queued on this action.
fn deactivates(action: &Action, id: EffectId) -> bool {
    action.resultants().iter().any(|resultant| {
        matches!(resultant.body(), ActionBody::DeactivateEffect(d) if d.effect == id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, TurnBody};
    use crate::board::{Board, CellSpec};
    use crate::config::GameConfig;
    use crate::effect::EffectSeed;
    use crate::hex::HexCoordinate;
    use crate::state::{PieceId, Player, Team};

    fn state() -> GameState {
        let mut board = Board::new();
        for x in -2..=2i32 {
            for y in (-2).max(-x - 2)..=2.min(-x + 2) {
                board
                    .insert_cell(HexCoordinate::new(x, y, -x - y), CellSpec::GROUND)
                    .unwrap();
            }
        }
        GameState::new(
            GameConfig::default(),
            board,
            vec![
                Player::new(PlayerId(0), Team::Red),
                Player::new(PlayerId(1), Team::Blue),
            ],
        )
    }

    fn spawn(state: &mut GameState, team: Team, x: i32, z: i32) -> PieceId {
        state
            .board
            .spawn_piece(team, HexCoordinate::axial(x, z), 5)
            .unwrap()
    }

    fn inflict(state: &mut GameState, kind: EffectKind, duration: i32, target: PieceId) -> EffectId {
        let id = state
            .effects
            .register(EffectSeed { kind, duration }, target, PlayerId(0));
        state.activate_effect(id).unwrap();
        id
    }

    fn turn_action(outgoing: u32, incoming: u32) -> Action {
        Action::new(
            PlayerId(outgoing),
            ActionBody::Turn(TurnBody::new(PlayerId(outgoing), PlayerId(incoming))),
        )
    }

    fn kinds(action: &Action) -> Vec<ActionKind> {
        action.resultants().iter().map(Action::kind).collect()
    }

    #[test]
    fn damage_ticks_on_qualifying_turns_only() {
        let mut state = state();
        let target = spawn(&mut state, Team::Blue, 0, 0);
        inflict(&mut state, EffectKind::DamageOverTime { amount: 2 }, 2, target);

        // Handing the turn back to Red does not qualify.
        let mut to_red = turn_action(1, 0);
        fire_turn_hook(&state, &mut to_red).unwrap();
        assert!(to_red.resultants().is_empty());

        let mut to_blue = turn_action(0, 1);
        fire_turn_hook(&state, &mut to_blue).unwrap();
        assert_eq!(
            kinds(&to_blue),
            vec![ActionKind::HpChange, ActionKind::EffectDurationChange]
        );
    }

    #[test]
    fn shield_absorbs_the_tick_and_is_consumed_once() {
        let mut state = state();
        let target = spawn(&mut state, Team::Blue, 0, 0);
        inflict(&mut state, EffectKind::DamageOverTime { amount: 2 }, 2, target);
        inflict(&mut state, EffectKind::DamageOverTime { amount: 1 }, 2, target);
        inflict(&mut state, EffectKind::Shield, 2, target);

        let mut action = turn_action(0, 1);
        fire_turn_hook(&state, &mut action).unwrap();
        // First damage consumes the shield; the second, finding it already
        // consumed in this action, deals its damage. Each of the three
        // effects also ticks its duration.
        assert_eq!(
            kinds(&action),
            vec![
                ActionKind::DeactivateEffect,
                ActionKind::EffectDurationChange,
                ActionKind::HpChange,
                ActionKind::EffectDurationChange,
                ActionKind::EffectDurationChange,
            ]
        );
    }

    #[test]
    fn expiring_effect_deactivates_itself() {
        let mut state = state();
        let target = spawn(&mut state, Team::Blue, 0, 0);
        let id = inflict(&mut state, EffectKind::Silence, 0, target);

        let mut action = turn_action(0, 1);
        fire_turn_hook(&state, &mut action).unwrap();
        assert_eq!(
            kinds(&action),
            vec![ActionKind::EffectDurationChange, ActionKind::DeactivateEffect]
        );
        assert!(deactivates(&action, id));
    }

    #[test]
    fn upkeep_passive_reacts_only_for_its_own_player() {
        let mut state = state();
        let id = state.passives.register(
            PassiveKind::EnergyUpkeep {
                grant: 2,
                base_actions: 2,
            },
            PlayerId(1),
        );
        state.activate_passive(id).unwrap();

        let mut to_red = turn_action(1, 0);
        fire_turn_hook(&state, &mut to_red).unwrap();
        assert!(to_red.resultants().is_empty());

        let mut to_blue = turn_action(0, 1);
        fire_turn_hook(&state, &mut to_blue).unwrap();
        assert_eq!(
            kinds(&to_blue),
            vec![
                ActionKind::EnergyChange,
                ActionKind::EnergyChange,
                ActionKind::ManualActionsSet,
            ]
        );
    }

    #[test]
    fn sphere_tribute_grants_on_the_owners_turns_only() {
        let mut state = state();
        let id = state
            .passives
            .register(PassiveKind::SphereTribute { amount: 1 }, PlayerId(1));
        state.activate_passive(id).unwrap();

        let mut to_red = turn_action(1, 0);
        fire_turn_hook(&state, &mut to_red).unwrap();
        assert!(to_red.resultants().is_empty());

        let mut to_blue = turn_action(0, 1);
        fire_turn_hook(&state, &mut to_blue).unwrap();
        assert_eq!(kinds(&to_blue), vec![ActionKind::ControlSphereChange]);

        to_blue.perform(&mut state).unwrap();
        assert_eq!(state.player(PlayerId(1)).unwrap().control_spheres, 1);
        to_blue.undo(&mut state).unwrap();
        assert_eq!(state.player(PlayerId(1)).unwrap().control_spheres, 0);
    }

    #[test]
    fn slow_and_long_stride_reshape_the_move_prompt() {
        let mut state = state();
        let piece = spawn(&mut state, Team::Red, 0, 0);
        inflict(&mut state, EffectKind::Slow { penalty: 2 }, 2, piece);
        let stride = state
            .passives
            .register(PassiveKind::LongStride { bonus: 1 }, PlayerId(0));
        state.activate_passive(stride).unwrap();

        let mut prompt = MovePrompt {
            piece,
            min_distance: 1,
            max_distance: 3,
        };
        fire_move_prompt(&state, &mut prompt).unwrap();
        assert_eq!(prompt.max_distance, 2);
    }

    #[test]
    fn silence_closes_the_source_for_one_resolution() {
        use crate::ability::AbilityId;

        let mut state = state();
        let piece = spawn(&mut state, Team::Red, 0, 0);
        let other = spawn(&mut state, Team::Red, 1, 0);
        inflict(&mut state, EffectKind::Silence, 2, piece);

        let mut prompt = AbilityPrompt {
            ability: AbilityId(0),
            performer: PlayerId(0),
            source: Some(piece),
            extra_source_rules: Vec::new(),
            extra_target_rules: Vec::new(),
        };
        fire_ability_prompt(&state, &mut prompt).unwrap();
        assert_eq!(prompt.extra_source_rules, vec![SourceRule::Never]);

        let mut unsilenced = AbilityPrompt {
            ability: AbilityId(0),
            performer: PlayerId(0),
            source: Some(other),
            extra_source_rules: Vec::new(),
            extra_target_rules: Vec::new(),
        };
        fire_ability_prompt(&state, &mut unsilenced).unwrap();
        assert!(unsilenced.extra_source_rules.is_empty());
    }
}
