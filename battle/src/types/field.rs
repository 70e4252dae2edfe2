//! Global field state

use super::conditions::{Terrain, Weather};
use super::side::{Side, SideConditions};

/// Global field state plus the conditions on each side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldState {
    /// Current weather condition
    pub weather: Option<Weather>,

    /// Current terrain
    pub terrain: Option<Terrain>,

    /// Trick Room active (slower combatant moves first)
    pub trick_room: bool,

    /// Conditions on the user's side
    pub mine: SideConditions,

    /// Conditions on the opponent's side
    pub opponent: SideConditions,
}

impl FieldState {
    /// Create a new empty field state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all field conditions
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn side(&self, side: Side) -> &SideConditions {
        match side {
            Side::Mine => &self.mine,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideConditions {
        match side {
            Side::Mine => &mut self.mine,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Check if any global field condition is active
    pub fn has_any_condition(&self) -> bool {
        self.weather.is_some() || self.terrain.is_some() || self.trick_room
    }
}
