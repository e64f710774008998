//! Game configuration constants and tunable parameters.

/// Tunable match rules, captured once at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Base maximum move distance before prompt hooks adjust it.
    pub base_move_range: u32,
    /// Manual actions a player starts each of their turns with.
    pub base_manual_actions: i32,
    /// Energy granted to the incoming player by the standard ruleset.
    pub turn_energy_grant: i32,
    /// Health each piece spawns with.
    pub starting_health: i32,
}

impl GameConfig {
    // ===== authored constants =====
    /// Duration most authored effects are inflicted with, in owner turns.
    pub const STANDARD_EFFECT_DURATION: i32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_RANGE: u32 = 3;
    pub const DEFAULT_MANUAL_ACTIONS: i32 = 2;
    pub const DEFAULT_TURN_ENERGY_GRANT: i32 = 2;
    pub const DEFAULT_STARTING_HEALTH: i32 = 5;

    pub fn new() -> Self {
        Self {
            base_move_range: Self::DEFAULT_MOVE_RANGE,
            base_manual_actions: Self::DEFAULT_MANUAL_ACTIONS,
            turn_energy_grant: Self::DEFAULT_TURN_ENERGY_GRANT,
            starting_health: Self::DEFAULT_STARTING_HEALTH,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
