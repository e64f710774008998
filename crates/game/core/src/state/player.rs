//! Players and their per-match resources.

use std::fmt;

use crate::state::piece::Team;

/// Unique identifier for a player in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// A player's mutable match state.
///
/// Energy, control spheres, and manual actions are mutated exclusively by
/// their dedicated action bodies (EnergyChange, ControlSphereChange,
/// ManualActionsSet); that write discipline is what keeps undo exact.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub team: Team,
    pub energy: i32,
    pub control_spheres: i32,
    pub manual_actions: i32,
}

impl Player {
    pub fn new(id: PlayerId, team: Team) -> Self {
        Self {
            id,
            team,
            energy: 0,
            control_spheres: 0,
            manual_actions: 0,
        }
    }
}
