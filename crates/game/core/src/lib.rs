//! Deterministic hex-tactics rules engine.
//!
//! `hexmarch-core` defines the canonical match rules: cube-coordinate
//! geometry, the board and its path search, the reversible action engine
//! with its causality hooks, status effects and passives, abilities, and
//! the match controller. All state mutation flows through [`game::Game`]'s
//! declare entry points, and supporting crates depend on the types
//! re-exported here.
pub mod ability;
pub mod action;
pub mod board;
pub mod config;
pub mod effect;
pub mod error;
pub mod game;
pub mod hex;
pub mod selector;
pub mod state;

pub use ability::{
    Ability, AbilityBook, AbilityError, AbilityId, EffectFactory, FollowUp, SourceRule,
    SourcedAbility, TargetRule, UnsourcedAbility, UnsourcedAction,
};
pub use action::hook::{AbilityPrompt, HookError, HookKind, HookRegistry, MovePrompt, SubscriberId};
pub use action::{
    Action, ActionBody, ActionError, ActionKind, ActionLog, ActivatePassive, ChangeFn,
    ControlSphereChange, DeactivateEffect, DeactivatePassive, EffectDurationChange, EnergyChange,
    HpChange, InflictEffect, ManualActionsSet, MoveBody, PlayAbilityBody, PositionChange, TurnBody,
};
pub use board::{Board, BoardError, Cell, CellSpec, MapError, MapLayout, PathMap, offset_to_cube};
pub use config::GameConfig;
pub use effect::passive::{Passive, PassiveError, PassiveId, PassiveKind, PassiveSet};
pub use effect::{EffectError, EffectId, EffectKind, EffectSeed, EffectSet, StatusEffect};
pub use error::EngineError;
pub use game::{Game, GameError, PlayOutcome};
pub use hex::{Axis, HexCoordinate, LineIntersections};
pub use selector::{PromptError, PromptPurpose, PromptRequest, Selectable, Selector};
pub use state::{GameState, Piece, PieceId, Player, PlayerId, StateError, Team};
