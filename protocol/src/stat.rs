//! Stat identifiers and the six-value stat block

use serde::{Deserialize, Serialize};

/// A stat that can carry a stage modifier (HP never does)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    /// The five stageable stats in canonical order
    pub const ALL: [Stat; 5] = [Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    /// Parse from a short or long stat name ("atk", "Attack", "SpA", ...)
    pub fn from_protocol(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace([' ', '-', '.'], "");
        match normalized.as_str() {
            "atk" | "attack" => Some(Stat::Atk),
            "def" | "defense" | "defence" => Some(Stat::Def),
            "spa" | "specialattack" | "spatk" => Some(Stat::Spa),
            "spd" | "specialdefense" | "spdef" => Some(Stat::Spd),
            "spe" | "speed" => Some(Stat::Spe),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Six computed stat values (or six base stats, depending on context)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

impl StatBlock {
    pub const fn new(hp: u32, atk: u32, def: u32, spa: u32, spd: u32, spe: u32) -> Self {
        Self {
            hp,
            atk,
            def,
            spa,
            spd,
            spe,
        }
    }

    /// Every stat set to the same value
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    /// Get a non-HP stat
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_from_protocol() {
        assert_eq!(Stat::from_protocol("atk"), Some(Stat::Atk));
        assert_eq!(Stat::from_protocol("SpA"), Some(Stat::Spa));
        assert_eq!(Stat::from_protocol("Special Defense"), Some(Stat::Spd));
        assert_eq!(Stat::from_protocol("Speed"), Some(Stat::Spe));
        assert_eq!(Stat::from_protocol("hp"), None);
    }

    #[test]
    fn test_stat_block_get() {
        let block = StatBlock::new(1, 2, 3, 4, 5, 6);
        assert_eq!(block.get(Stat::Atk), 2);
        assert_eq!(block.get(Stat::Spe), 6);
        assert_eq!(StatBlock::uniform(100).spd, 100);
    }
}
