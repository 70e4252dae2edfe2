//! Battle-wide settings supplied by the caller

/// Settings fixed for the duration of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Level used for stat estimation
    pub level: u32,

    /// How many combatants each side brings to battle
    pub selection_size: usize,

    /// How many combatants the opponent declares in team preview
    pub opponent_team_size: usize,
}

impl BattleConfig {
    pub const DEFAULT_LEVEL: u32 = 50;
    pub const DEFAULT_SELECTION_SIZE: usize = 3;
    pub const DEFAULT_TEAM_SIZE: usize = 6;
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            level: Self::DEFAULT_LEVEL,
            selection_size: Self::DEFAULT_SELECTION_SIZE,
            opponent_team_size: Self::DEFAULT_TEAM_SIZE,
        }
    }
}
