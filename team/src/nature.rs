//! Natures and their stat modifiers

use serde::{Deserialize, Serialize};
use tera_protocol::Stat;

/// The 25 natures. Five of them are neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// Parse from a nature name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hardy" => Some(Nature::Hardy),
            "lonely" => Some(Nature::Lonely),
            "brave" => Some(Nature::Brave),
            "adamant" => Some(Nature::Adamant),
            "naughty" => Some(Nature::Naughty),
            "bold" => Some(Nature::Bold),
            "docile" => Some(Nature::Docile),
            "relaxed" => Some(Nature::Relaxed),
            "impish" => Some(Nature::Impish),
            "lax" => Some(Nature::Lax),
            "timid" => Some(Nature::Timid),
            "hasty" => Some(Nature::Hasty),
            "serious" => Some(Nature::Serious),
            "jolly" => Some(Nature::Jolly),
            "naive" => Some(Nature::Naive),
            "modest" => Some(Nature::Modest),
            "mild" => Some(Nature::Mild),
            "quiet" => Some(Nature::Quiet),
            "bashful" => Some(Nature::Bashful),
            "rash" => Some(Nature::Rash),
            "calm" => Some(Nature::Calm),
            "gentle" => Some(Nature::Gentle),
            "sassy" => Some(Nature::Sassy),
            "careful" => Some(Nature::Careful),
            "quirky" => Some(Nature::Quirky),
            _ => None,
        }
    }

    /// (raised, lowered) stats, or `None` for the neutral natures
    pub fn effect(&self) -> Option<(Stat, Stat)> {
        use Stat::*;
        match self {
            Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => {
                None
            }
            Nature::Lonely => Some((Atk, Def)),
            Nature::Brave => Some((Atk, Spe)),
            Nature::Adamant => Some((Atk, Spa)),
            Nature::Naughty => Some((Atk, Spd)),
            Nature::Bold => Some((Def, Atk)),
            Nature::Relaxed => Some((Def, Spe)),
            Nature::Impish => Some((Def, Spa)),
            Nature::Lax => Some((Def, Spd)),
            Nature::Timid => Some((Spe, Atk)),
            Nature::Hasty => Some((Spe, Def)),
            Nature::Jolly => Some((Spe, Spa)),
            Nature::Naive => Some((Spe, Spd)),
            Nature::Modest => Some((Spa, Atk)),
            Nature::Mild => Some((Spa, Def)),
            Nature::Quiet => Some((Spa, Spe)),
            Nature::Rash => Some((Spa, Spd)),
            Nature::Calm => Some((Spd, Atk)),
            Nature::Gentle => Some((Spd, Def)),
            Nature::Sassy => Some((Spd, Spe)),
            Nature::Careful => Some((Spd, Spa)),
        }
    }

    /// Modifier in tenths: 11 for the raised stat, 9 for the lowered one, 10 otherwise
    pub fn modifier_tenths(&self, stat: Stat) -> u32 {
        match self.effect() {
            Some((up, _)) if up == stat => 11,
            Some((_, down)) if down == stat => 9,
            _ => 10,
        }
    }
}
