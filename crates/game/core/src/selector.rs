//! Selection prompts: how the engine asks the outside world to choose.
//!
//! Some declarations cannot finish synchronously (a follow-up move after an
//! ability, for example). The engine then suspends with a [`PromptRequest`]
//! describing the choice and resumes when the controller answers through
//! the match's resolve path. At most one prompt is outstanding at a time.

use crate::hex::HexCoordinate;
use crate::state::{PieceId, PlayerId};

/// Anything the outside world can be asked to pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selectable {
    Cell(HexCoordinate),
    Piece(PieceId),
    Player(PlayerId),
}

/// Why a prompt was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PromptPurpose {
    /// Pick a destination cell for a free post-ability move of `piece`.
    FollowUpMove { piece: PieceId, max_distance: u32 },
}

/// A suspended choice, carrying every candidate the answer may name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromptRequest {
    pub performer: PlayerId,
    pub purpose: PromptPurpose,
    pub candidates: Vec<Selectable>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("a selection prompt is already outstanding")]
    Outstanding,

    #[error("no selection prompt is outstanding")]
    NoneOutstanding,

    #[error("{0:?} is not among the prompt's candidates")]
    NotACandidate(Selectable),
}

/// Answers prompts on behalf of a player.
///
/// Implementations live outside the engine (UI, scripted tests, bots); the
/// engine only guarantees each request names its full candidate set.
pub trait Selector {
    /// Picks one of the request's candidates, or `None` to cancel.
    fn select(&mut self, request: &PromptRequest) -> Option<Selectable>;
}
