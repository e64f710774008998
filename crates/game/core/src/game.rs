//! The match controller.
//!
//! Owns the authoritative state, the registered abilities, and the action
//! history, and exposes the declare-style entry points that are the only
//! sanctioned way to mutate a match: build the action, fire its causality
//! hook, perform it, record it. Declarations resolve fully at declaration
//! time; a declaration that cannot finish synchronously suspends into a
//! selection prompt instead.

use crate::ability::{Ability, AbilityBook, AbilityError, AbilityId, FollowUp};
use crate::action::hook::{AbilityPrompt, MovePrompt};
use crate::action::{
    Action, ActionBody, ActionLog, EnergyChange, InflictEffect, ManualActionsSet, MoveBody,
    PlayAbilityBody, PositionChange, TurnBody,
};
use crate::board::Cell;
use crate::effect::passive::{PassiveId, PassiveKind};
use crate::effect::react;
use crate::error::EngineError;
use crate::hex::HexCoordinate;
use crate::selector::{PromptError, PromptPurpose, PromptRequest, Selectable};
use crate::state::{GameState, PieceId, PlayerId};

/// Declaration failures above the subsystem level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{piece} does not belong to {player}")]
    NotYourPiece { piece: PieceId, player: PlayerId },

    #[error("{0} has no manual actions left")]
    NoManualActions(PlayerId),

    #[error("no legal route to {0}")]
    Unreachable(HexCoordinate),
}

/// How a PlayAbility declaration finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Completed,
    /// The declaration resolved, but a follow-up choice is outstanding.
    AwaitingSelection(PromptRequest),
}

/// One running match: state, ability definitions, history, and at most one
/// outstanding selection prompt.
#[derive(Debug)]
pub struct Game {
    state: GameState,
    abilities: AbilityBook,
    history: ActionLog,
    pending: Option<PromptRequest>,
}

impl Game {
    pub fn new(state: GameState, abilities: AbilityBook) -> Self {
        Self {
            state,
            abilities,
            history: ActionLog::new(),
            pending: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn abilities(&self) -> &AbilityBook {
        &self.abilities
    }

    pub fn history(&self) -> &ActionLog {
        &self.history
    }

    pub fn pending_prompt(&self) -> Option<&PromptRequest> {
        self.pending.as_ref()
    }

    /// Registers a detached passive for later activation through an
    /// ActivatePassive action. Registration itself is inert and therefore
    /// not part of the undo history.
    pub fn register_passive(&mut self, kind: PassiveKind, player: PlayerId) -> PassiveId {
        self.state.passives.register(kind, player)
    }

    /// Performs a fully built action and records it.
    ///
    /// Refused while a selection prompt is outstanding: the suspended
    /// declaration must resolve or cancel first.
    pub fn push_action(&mut self, mut action: Action) -> Result<(), EngineError> {
        if self.pending.is_some() {
            return Err(PromptError::Outstanding.into());
        }
        action.perform(&mut self.state)?;
        self.history.record(action)?;
        Ok(())
    }

    /// Undoes the top of the history.
    ///
    /// `Ok(false)` reports a Turn action on top refused without
    /// `can_undo_turns`; an empty history is an error.
    pub fn undo_last(&mut self, can_undo_turns: bool) -> Result<bool, EngineError> {
        if self.pending.is_some() {
            return Err(PromptError::Outstanding.into());
        }
        self.history.undo_last(&mut self.state, can_undo_turns)
    }

    /// Hands the turn to the next player, with every Turn-hook reaction
    /// attached as a resultant.
    pub fn declare_turn(&mut self) -> Result<(), EngineError> {
        let outgoing = self.state.current_player;
        let incoming = self.state.player_after(outgoing)?;
        let mut action = Action::new(outgoing, ActionBody::Turn(TurnBody::new(outgoing, incoming)));
        react::fire_turn_hook(&self.state, &mut action)?;
        self.push_action(action)
    }

    /// Declares a move of one of the current player's pieces, spending one
    /// manual action.
    pub fn declare_move(
        &mut self,
        piece: PieceId,
        destination: HexCoordinate,
    ) -> Result<(), EngineError> {
        let performer = self.state.current_player;
        let remaining = self.state.player(performer)?.manual_actions;
        if remaining <= 0 {
            return Err(GameError::NoManualActions(performer).into());
        }
        self.check_ownership(performer, piece)?;

        let mut prompt = MovePrompt {
            piece,
            min_distance: 1,
            max_distance: self.state.config.base_move_range,
        };
        react::fire_move_prompt(&self.state, &mut prompt)?;

        let mut action = self.build_move(performer, piece, destination, &prompt)?;
        action.queue_resultant(Action::new(
            performer,
            ActionBody::ManualActionsSet(ManualActionsSet::new(performer, remaining - 1)),
        ))?;
        self.push_action(action)
    }

    /// Declares an ability play. The whole resolution happens here, before
    /// anything is performed: prompt hook, rule checks, target resolution,
    /// energy cost. The performed action carries the consequences as
    /// resultants; only a follow-up selection is deferred.
    pub fn declare_play_ability(
        &mut self,
        ability: AbilityId,
        source: Option<PieceId>,
        target: HexCoordinate,
    ) -> Result<PlayOutcome, EngineError> {
        if self.pending.is_some() {
            return Err(PromptError::Outstanding.into());
        }
        let performer = self.state.current_player;

        let mut prompt = AbilityPrompt {
            ability,
            performer,
            source,
            extra_source_rules: Vec::new(),
            extra_target_rules: Vec::new(),
        };
        react::fire_ability_prompt(&self.state, &mut prompt)?;

        let definition = self.abilities.get(ability)?;
        let cost = definition.energy_cost();
        let available = self.state.player(performer)?.energy;
        if available < cost {
            return Err(AbilityError::InsufficientEnergy {
                required: cost,
                available,
            }
            .into());
        }

        let mut action = Action::new(
            performer,
            ActionBody::PlayAbility(PlayAbilityBody::new(ability, source)),
        );
        let mut follow_up = None;

        match definition {
            Ability::Sourced(sourced) => {
                let source = source.ok_or(AbilityError::MissingSource)?;
                for &rule in sourced.source_rules.iter().chain(&prompt.extra_source_rules) {
                    if !rule.allows(&self.state, performer, source)? {
                        return Err(AbilityError::SourceRejected { rule }.into());
                    }
                }

                for cell in sourced.target_cells(target) {
                    let mut allowed = true;
                    for &rule in sourced.target_rules.iter().chain(&prompt.extra_target_rules) {
                        if !rule.allows(&self.state, performer, Some(source), cell)? {
                            allowed = false;
                            break;
                        }
                    }
                    if !allowed {
                        continue;
                    }
                    let Some(hit) = self
                        .state
                        .board
                        .cell_at(cell, false)?
                        .and_then(Cell::occupant)
                    else {
                        continue;
                    };
                    for factory in &sourced.effects {
                        action.queue_resultant(Action::new(
                            performer,
                            ActionBody::InflictEffect(InflictEffect::new(
                                factory(),
                                hit,
                                performer,
                            )),
                        ))?;
                    }
                }
                follow_up = sourced.follow_up.map(|f| (f, source));
            }
            Ability::Unsourced(unsourced) => {
                for &rule in unsourced.target_rules.iter().chain(&prompt.extra_target_rules) {
                    if !rule.allows(&self.state, performer, None, target)? {
                        return Err(AbilityError::TargetRejected { rule, cell: target }.into());
                    }
                }
                for resultant in (unsourced.action)(&self.state, performer, target) {
                    action.queue_resultant(resultant)?;
                }
            }
        }

        if cost != 0 {
            action.queue_resultant(Action::new(
                performer,
                ActionBody::EnergyChange(EnergyChange::new(performer, move |e| e - cost)),
            ))?;
        }
        self.push_action(action)?;

        if let Some((FollowUp::MoveAfterCast { max_distance }, piece)) = follow_up {
            let from = self.state.board.piece(piece)?.position;
            let reachable = self.state.board.path_find(
                from,
                (1, max_distance),
                |_, next| !next.blocks_pathing && !next.is_occupied(),
                Cell::is_free,
                |_, _| 1,
            )?;
            let candidates: Vec<Selectable> = reachable
                .iter()
                .map(|(coordinate, _)| Selectable::Cell(coordinate))
                .collect();
            if !candidates.is_empty() {
                let request = PromptRequest {
                    performer,
                    purpose: PromptPurpose::FollowUpMove {
                        piece,
                        max_distance,
                    },
                    candidates,
                };
                self.pending = Some(request.clone());
                return Ok(PlayOutcome::AwaitingSelection(request));
            }
        }
        Ok(PlayOutcome::Completed)
    }

    /// Resolves (or, with `None`, cancels) the outstanding selection prompt.
    ///
    /// An answer outside the candidate set leaves the prompt outstanding
    /// and errors.
    pub fn resolve_selection(&mut self, choice: Option<Selectable>) -> Result<(), EngineError> {
        let request = self.pending.take().ok_or(PromptError::NoneOutstanding)?;
        let Some(choice) = choice else {
            return Ok(());
        };
        if !request.candidates.contains(&choice) {
            self.pending = Some(request);
            return Err(PromptError::NotACandidate(choice).into());
        }

        match request.purpose {
            PromptPurpose::FollowUpMove {
                piece,
                max_distance,
            } => {
                let Selectable::Cell(destination) = choice else {
                    self.pending = Some(request);
                    return Err(PromptError::NotACandidate(choice).into());
                };
                let mut prompt = MovePrompt {
                    piece,
                    min_distance: 1,
                    max_distance,
                };
                react::fire_move_prompt(&self.state, &mut prompt)?;
                // Free move: no manual action is charged.
                let action = self.build_move(request.performer, piece, destination, &prompt)?;
                self.push_action(action)
            }
        }
    }

    fn check_ownership(&self, player: PlayerId, piece: PieceId) -> Result<(), EngineError> {
        let team = self.state.player(player)?.team;
        if self.state.board.piece(piece)?.team != team {
            return Err(GameError::NotYourPiece { piece, player }.into());
        }
        Ok(())
    }

    /// Builds a Move action: a marker body carrying one PositionChange
    /// resultant per route step.
    fn build_move(
        &self,
        performer: PlayerId,
        piece: PieceId,
        destination: HexCoordinate,
        prompt: &MovePrompt,
    ) -> Result<Action, EngineError> {
        let from = self.state.board.piece(piece)?.position;
        let reachable = self.state.board.path_find(
            from,
            (prompt.min_distance, prompt.max_distance),
            |_, next| !next.blocks_pathing && !next.is_occupied(),
            Cell::is_free,
            |_, _| 1,
        )?;
        let route = reachable
            .route_to(destination)
            .ok_or(GameError::Unreachable(destination))?;

        let mut action = Action::new(performer, ActionBody::Move(MoveBody::new(piece, destination)));
        let mut cursor = from;
        for step in route {
            action.queue_resultant(Action::new(
                performer,
                ActionBody::PositionChange(PositionChange::new(piece, cursor, step)),
            ))?;
            cursor = step;
        }
        Ok(action)
    }
}
