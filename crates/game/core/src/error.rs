//! Crate-wide error aggregation.

use crate::ability::AbilityError;
use crate::action::ActionError;
use crate::action::hook::HookError;
use crate::board::{BoardError, MapError};
use crate::effect::EffectError;
use crate::effect::passive::PassiveError;
use crate::game::GameError;
use crate::selector::PromptError;
use crate::state::StateError;

/// Any failure the engine can surface; each subsystem keeps its own enum
/// and converts via `?`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error(transparent)]
    Passive(#[from] PassiveError),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Ability(#[from] AbilityError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Game(#[from] GameError),
}
