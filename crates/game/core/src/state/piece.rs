//! Pieces (units) and team identity.

use std::fmt;

use crate::hex::HexCoordinate;

/// Unique identifier for a piece, allocated sequentially by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece#{}", self.0)
    }
}

/// The two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Red, Team::Blue];

    /// The opposing side.
    pub fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// A unit on the board.
///
/// Position is mutated only by the PositionChange action's perform/undo pair;
/// health only by HpChange. Everything else reads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub id: PieceId,
    pub team: Team,
    pub position: HexCoordinate,
    pub health: i32,
    pub max_health: i32,
}

impl Piece {
    pub fn new(id: PieceId, team: Team, position: HexCoordinate, max_health: i32) -> Self {
        Self {
            id,
            team,
            position,
            health: max_health,
            max_health,
        }
    }
}
