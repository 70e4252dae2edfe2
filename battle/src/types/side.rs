//! Sides and per-side conditions

use super::conditions::SideCondition;

/// Which side of the battle a combatant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The user's own side
    Mine,
    Opponent,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Mine => Side::Opponent,
            Side::Opponent => Side::Mine,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Mine => write!(f, "me"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Conditions active on one side of the field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideConditions {
    pub tailwind: bool,
    pub reflect: bool,
    pub light_screen: bool,
    pub stealth_rock: bool,
}

impl SideConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, condition: SideCondition) -> bool {
        match condition {
            SideCondition::Tailwind => self.tailwind,
            SideCondition::Reflect => self.reflect,
            SideCondition::LightScreen => self.light_screen,
            SideCondition::StealthRock => self.stealth_rock,
        }
    }

    pub fn set(&mut self, condition: SideCondition, active: bool) {
        match condition {
            SideCondition::Tailwind => self.tailwind = active,
            SideCondition::Reflect => self.reflect = active,
            SideCondition::LightScreen => self.light_screen = active,
            SideCondition::StealthRock => self.stealth_rock = active,
        }
    }

    /// Active conditions in canonical order
    pub fn active(&self) -> impl Iterator<Item = SideCondition> + '_ {
        SideCondition::ALL.into_iter().filter(|c| self.has(*c))
    }
}
