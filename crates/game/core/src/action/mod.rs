//! The reversible action engine.
//!
//! Every state mutation in a match flows through an [`Action`]: a body plus
//! an ordered list of resultant actions attached by causality-hook
//! reactions and by declaration logic. Perform runs the body first and then
//! the resultants depth-first in order; undo replays the exact mirror
//! (resultants in reverse, then the body), so the whole tree is a single
//! reversible unit on the history stack.

pub mod hook;

mod change;
mod history;
mod lifecycle;
mod play;
mod position;
mod turn;

pub use change::{
    ChangeFn, ControlSphereChange, EffectDurationChange, EnergyChange, HpChange,
};
pub use history::ActionLog;
pub use lifecycle::{ActivatePassive, DeactivateEffect, DeactivatePassive, InflictEffect};
pub use play::{MoveBody, PlayAbilityBody};
pub use position::PositionChange;
pub use turn::{ManualActionsSet, TurnBody};

use crate::error::EngineError;
use crate::state::{GameState, PlayerId};

/// Discriminant of an action body, used in errors and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum ActionKind {
    PositionChange,
    HpChange,
    EnergyChange,
    ControlSphereChange,
    EffectDurationChange,
    InflictEffect,
    DeactivateEffect,
    ActivatePassive,
    DeactivatePassive,
    ManualActionsSet,
    Turn,
    Move,
    PlayAbility,
    Container,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("{0} action has already been performed")]
    AlreadyPerformed(ActionKind),

    #[error("{0} action has not been performed")]
    NotPerformed(ActionKind),

    #[error("{0} action does not support undo")]
    UndoUnsupported(ActionKind),

    #[error("{0} action has no applied delta to revert")]
    DeltaUnderflow(ActionKind),

    #[error("cannot queue a resultant on a performed {0} action")]
    ResultantAfterPerform(ActionKind),

    #[error("turn transfer expected {expected} to hold the turn, found {actual}")]
    StaleTurn {
        expected: PlayerId,
        actual: PlayerId,
    },

    #[error("action history is empty")]
    HistoryEmpty,
}

/// Closed set of action bodies.
///
/// Dispatch is a plain exhaustive match rather than a trait object so that
/// adding a kind forces every site (perform, undo, reactions) to say what
/// it does with it.
#[derive(Debug)]
pub enum ActionBody {
    PositionChange(PositionChange),
    HpChange(HpChange),
    EnergyChange(EnergyChange),
    ControlSphereChange(ControlSphereChange),
    EffectDurationChange(EffectDurationChange),
    InflictEffect(InflictEffect),
    DeactivateEffect(DeactivateEffect),
    ActivatePassive(ActivatePassive),
    DeactivatePassive(DeactivatePassive),
    ManualActionsSet(ManualActionsSet),
    Turn(TurnBody),
    Move(MoveBody),
    PlayAbility(PlayAbilityBody),
    /// No-op body grouping pre-built resultants into one reversible unit.
    Container,
}

impl ActionBody {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionBody::PositionChange(_) => ActionKind::PositionChange,
            ActionBody::HpChange(_) => ActionKind::HpChange,
            ActionBody::EnergyChange(_) => ActionKind::EnergyChange,
            ActionBody::ControlSphereChange(_) => ActionKind::ControlSphereChange,
            ActionBody::EffectDurationChange(_) => ActionKind::EffectDurationChange,
            ActionBody::InflictEffect(_) => ActionKind::InflictEffect,
            ActionBody::DeactivateEffect(_) => ActionKind::DeactivateEffect,
            ActionBody::ActivatePassive(_) => ActionKind::ActivatePassive,
            ActionBody::DeactivatePassive(_) => ActionKind::DeactivatePassive,
            ActionBody::ManualActionsSet(_) => ActionKind::ManualActionsSet,
            ActionBody::Turn(_) => ActionKind::Turn,
            ActionBody::Move(_) => ActionKind::Move,
            ActionBody::PlayAbility(_) => ActionKind::PlayAbility,
            ActionBody::Container => ActionKind::Container,
        }
    }

    fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        match self {
            ActionBody::PositionChange(body) => body.perform(state),
            ActionBody::HpChange(body) => body.perform(state),
            ActionBody::EnergyChange(body) => body.perform(state),
            ActionBody::ControlSphereChange(body) => body.perform(state),
            ActionBody::EffectDurationChange(body) => body.perform(state),
            ActionBody::InflictEffect(body) => body.perform(state),
            ActionBody::DeactivateEffect(body) => body.perform(state),
            ActionBody::ActivatePassive(body) => body.perform(state),
            ActionBody::DeactivatePassive(body) => body.perform(state),
            ActionBody::ManualActionsSet(body) => body.perform(state),
            ActionBody::Turn(body) => body.perform(state),
            ActionBody::Move(body) => body.perform(state),
            ActionBody::PlayAbility(body) => body.perform(state),
            ActionBody::Container => Ok(()),
        }
    }

    fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        match self {
            ActionBody::PositionChange(body) => body.undo(state),
            ActionBody::HpChange(body) => body.undo(state),
            ActionBody::EnergyChange(body) => body.undo(state),
            ActionBody::ControlSphereChange(body) => body.undo(state),
            ActionBody::EffectDurationChange(body) => body.undo(state),
            ActionBody::InflictEffect(body) => body.undo(state),
            ActionBody::DeactivateEffect(body) => body.undo(state),
            ActionBody::ActivatePassive(body) => body.undo(state),
            ActionBody::DeactivatePassive(body) => body.undo(state),
            ActionBody::ManualActionsSet(body) => body.undo(state),
            ActionBody::Turn(body) => body.undo(state),
            ActionBody::Move(body) => body.undo(state),
            ActionBody::PlayAbility(body) => body.undo(state),
            ActionBody::Container => Ok(()),
        }
    }

    fn undo_supported(&self) -> bool {
        !matches!(self, ActionBody::PlayAbility(_))
    }
}

/// One reversible unit: a body plus its resultant actions.
#[derive(Debug)]
pub struct Action {
    performer: PlayerId,
    body: ActionBody,
    resultants: Vec<Action>,
    performed: bool,
}

impl Action {
    pub fn new(performer: PlayerId, body: ActionBody) -> Self {
        Self {
            performer,
            body,
            resultants: Vec::new(),
            performed: false,
        }
    }

    pub fn performer(&self) -> PlayerId {
        self.performer
    }

    pub fn kind(&self) -> ActionKind {
        self.body.kind()
    }

    pub fn body(&self) -> &ActionBody {
        &self.body
    }

    pub fn resultants(&self) -> &[Action] {
        &self.resultants
    }

    pub fn is_performed(&self) -> bool {
        self.performed
    }

    /// Whether this whole tree can be undone.
    pub fn undo_supported(&self) -> bool {
        self.body.undo_supported() && self.resultants.iter().all(Action::undo_supported)
    }

    /// Appends a resultant to a not-yet-performed action. Reactions use this
    /// while the hook is firing.
    pub fn queue_resultant(&mut self, action: Action) -> Result<(), ActionError> {
        if self.performed {
            return Err(ActionError::ResultantAfterPerform(self.kind()));
        }
        self.resultants.push(action);
        Ok(())
    }

    /// Appends a resultant to an already-performed action, performing it
    /// immediately so the tree and the state stay in step.
    pub fn add_resultant(
        &mut self,
        mut action: Action,
        state: &mut GameState,
    ) -> Result<(), EngineError> {
        if !self.performed {
            return Err(ActionError::NotPerformed(self.kind()).into());
        }
        action.perform(state)?;
        self.resultants.push(action);
        Ok(())
    }

    /// Performs the body, then every resultant depth-first in queue order.
    pub fn perform(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        if self.performed {
            return Err(ActionError::AlreadyPerformed(self.kind()).into());
        }
        self.body.perform(state)?;
        for resultant in &mut self.resultants {
            resultant.perform(state)?;
        }
        self.performed = true;
        Ok(())
    }

    /// Undoes the tree in the exact mirror of perform: resultants in reverse
    /// order (each depth-first), then the body.
    ///
    /// An unsupported undo anywhere in the tree is rejected up front, before
    /// any part of the state is touched.
    pub fn undo(&mut self, state: &mut GameState) -> Result<(), EngineError> {
        if !self.performed {
            return Err(ActionError::NotPerformed(self.kind()).into());
        }
        if !self.undo_supported() {
            return Err(ActionError::UndoUnsupported(self.kind()).into());
        }
        for resultant in self.resultants.iter_mut().rev() {
            resultant.undo(state)?;
        }
        self.body.undo(state)?;
        self.performed = false;
        Ok(())
    }
}
