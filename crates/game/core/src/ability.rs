//! Ability definitions and targeting predicates.
//!
//! An ability is static authored data: predicate lists plus effect
//! factories (Sourced) or an arbitrary resultant-producing callback
//! (Unsourced). Abilities are registered once at startup and consumed, not
//! mutated, by PlayAbility declarations.

use std::fmt;

use crate::action::Action;
use crate::board::Cell;
use crate::effect::EffectSeed;
use crate::error::EngineError;
use crate::hex::HexCoordinate;
use crate::state::{GameState, PieceId, PlayerId, Team};

/// Index of an ability within one [`AbilityBook`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u32);

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("unknown ability {0}")]
    Unknown(AbilityId),

    #[error("sourced ability played without a source piece")]
    MissingSource,

    #[error("source piece rejected by {rule} rule")]
    SourceRejected { rule: SourceRule },

    #[error("target {cell} rejected by {rule} rule")]
    TargetRejected {
        rule: TargetRule,
        cell: HexCoordinate,
    },

    #[error("ability costs {required} energy, performer has {available}")]
    InsufficientEnergy { required: i32, available: i32 },
}

/// Validity predicate for the piece an ability is sourced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceRule {
    /// The source piece must belong to the performer's team.
    SameTeam,
    /// No source is ever valid; appended by Silence for one resolution.
    Never,
}

impl SourceRule {
    pub fn allows(
        self,
        state: &GameState,
        performer: PlayerId,
        source: PieceId,
    ) -> Result<bool, EngineError> {
        match self {
            SourceRule::SameTeam => {
                let team = state.player(performer)?.team;
                Ok(state.board.piece(source)?.team == team)
            }
            SourceRule::Never => Ok(false),
        }
    }
}

/// Validity predicate for one target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRule {
    /// The cell must hold a piece from the opposing team.
    OppositeTeam,
    /// The cell must hold a piece from the performer's team.
    SameTeam,
    /// The cell must hold any piece.
    Occupied,
    /// There must be an unobstructed sightline from the source piece to the
    /// cell. A crossed cell obstructs when it blocks targeting and is not
    /// held by one of the performer's own pieces; an edge-aligned step
    /// obstructs only when both straddled cells do. Cells outside the board
    /// never obstruct.
    StandardCollision,
    /// No target is ever valid.
    Never,
}

impl TargetRule {
    pub fn allows(
        self,
        state: &GameState,
        performer: PlayerId,
        source: Option<PieceId>,
        target: HexCoordinate,
    ) -> Result<bool, EngineError> {
        let team = state.player(performer)?.team;
        match self {
            TargetRule::OppositeTeam => occupant_team(state, target, false)
                .map(|found| found == Some(team.opponent())),
            TargetRule::SameTeam => {
                occupant_team(state, target, false).map(|found| found == Some(team))
            }
            TargetRule::Occupied => occupant_team(state, target, false).map(|found| found.is_some()),
            TargetRule::StandardCollision => {
                let source = source.ok_or(AbilityError::MissingSource)?;
                let from = state.board.piece(source)?.position;
                let line = from.line_intersections(target);
                for coordinate in line.cells {
                    if let Some(cell) = state.board.cell_at(coordinate, false)?
                        && blocks_sight(state, team, cell)?
                    {
                        return Ok(false);
                    }
                }
                for (left, right) in line.edge_pairs {
                    let left_blocks = match state.board.cell_at(left, false)? {
                        Some(cell) => blocks_sight(state, team, cell)?,
                        None => false,
                    };
                    let right_blocks = match state.board.cell_at(right, false)? {
                        Some(cell) => blocks_sight(state, team, cell)?,
                        None => false,
                    };
                    if left_blocks && right_blocks {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            TargetRule::Never => Ok(false),
        }
    }
}

/// Team of the piece standing at `coordinate`, if any.
fn occupant_team(
    state: &GameState,
    coordinate: HexCoordinate,
    strict: bool,
) -> Result<Option<Team>, EngineError> {
    let Some(cell) = state.board.cell_at(coordinate, strict)? else {
        return Ok(None);
    };
    match cell.occupant() {
        Some(piece) => Ok(Some(state.board.piece(piece)?.team)),
        None => Ok(None),
    }
}

fn blocks_sight(state: &GameState, team: Team, cell: &Cell) -> Result<bool, EngineError> {
    if !cell.blocks_targeting {
        return Ok(false);
    }
    match cell.occupant() {
        // An allied piece holding the cell keeps the sightline open.
        Some(piece) => Ok(state.board.piece(piece)?.team != team),
        None => Ok(true),
    }
}

/// Builds a fresh effect description each time a target resolves.
pub type EffectFactory = Box<dyn Fn() -> EffectSeed>;

/// Produces the resultant actions of an unsourced ability at play time.
pub type UnsourcedAction = Box<dyn Fn(&GameState, PlayerId, HexCoordinate) -> Vec<Action>>;

/// What the performer may do immediately after a sourced ability resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    /// A free move of the source piece, up to `max_distance` cells.
    MoveAfterCast { max_distance: u32 },
}

/// Area-of-effect ability cast from an originating piece.
pub struct SourcedAbility {
    pub name: String,
    /// Offsets added to the anchor cell to yield absolute target cells.
    pub hit_area: Vec<HexCoordinate>,
    /// One effect per factory is inflicted on each resolved target.
    pub effects: Vec<EffectFactory>,
    pub source_rules: Vec<SourceRule>,
    pub target_rules: Vec<TargetRule>,
    pub energy_cost: i32,
    pub follow_up: Option<FollowUp>,
}

impl SourcedAbility {
    /// Absolute target cells for a cast anchored at `anchor`.
    pub fn target_cells(&self, anchor: HexCoordinate) -> impl Iterator<Item = HexCoordinate> {
        self.hit_area.iter().map(move |&offset| anchor + offset)
    }
}

impl fmt::Debug for SourcedAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourcedAbility")
            .field("name", &self.name)
            .field("hit_area", &self.hit_area)
            .field("effects", &self.effects.len())
            .field("source_rules", &self.source_rules)
            .field("target_rules", &self.target_rules)
            .field("energy_cost", &self.energy_cost)
            .field("follow_up", &self.follow_up)
            .finish()
    }
}

/// Single-target ability resolved by an arbitrary callback.
pub struct UnsourcedAbility {
    pub name: String,
    pub target_rules: Vec<TargetRule>,
    pub energy_cost: i32,
    pub action: UnsourcedAction,
}

impl fmt::Debug for UnsourcedAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsourcedAbility")
            .field("name", &self.name)
            .field("target_rules", &self.target_rules)
            .field("energy_cost", &self.energy_cost)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum Ability {
    Sourced(SourcedAbility),
    Unsourced(UnsourcedAbility),
}

impl Ability {
    pub fn name(&self) -> &str {
        match self {
            Ability::Sourced(ability) => &ability.name,
            Ability::Unsourced(ability) => &ability.name,
        }
    }

    pub fn energy_cost(&self) -> i32 {
        match self {
            Ability::Sourced(ability) => ability.energy_cost,
            Ability::Unsourced(ability) => ability.energy_cost,
        }
    }
}

/// The abilities registered for one match, addressed by [`AbilityId`].
#[derive(Debug, Default)]
pub struct AbilityBook {
    abilities: Vec<Ability>,
}

impl AbilityBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, ability: Ability) -> AbilityId {
        let id = AbilityId(self.abilities.len() as u32);
        self.abilities.push(ability);
        id
    }

    pub fn get(&self, id: AbilityId) -> Result<&Ability, AbilityError> {
        self.abilities
            .get(id.0 as usize)
            .ok_or(AbilityError::Unknown(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (AbilityId, &Ability)> {
        self.abilities
            .iter()
            .enumerate()
            .map(|(i, a)| (AbilityId(i as u32), a))
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}
