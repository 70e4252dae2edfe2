//! Stat formula and EV spreads

use tera_protocol::{Stat, StatBlock};

use crate::nature::Nature;
use crate::TeamError;

/// Individual value assumed for every stat of a competitive set
pub const MAX_IV: u32 = 31;

/// Compute one stat at `level`.
///
/// HP: `floor((2B + IV + floor(EV/4)) * L / 100) + L + 10`
/// Others: `floor((floor((2B + IV + floor(EV/4)) * L / 100) + 5) * nature)`
///
/// The core is floored before the nature is applied, as in game.
pub fn calc_stat(base: u32, iv: u32, ev: u32, level: u32, nature_tenths: u32, is_hp: bool) -> u32 {
    let core = (2 * base + iv + ev / 4) * level / 100;
    if is_hp {
        core + level + 10
    } else {
        (core + 5) * nature_tenths / 10
    }
}

/// Compute a full stat block from base stats, IVs, EVs and nature
pub fn calc_stats(base: &StatBlock, ivs: &StatBlock, evs: &StatBlock, nature: Nature, level: u32) -> StatBlock {
    let other = |stat: Stat| {
        calc_stat(
            base.get(stat),
            ivs.get(stat),
            evs.get(stat),
            level,
            nature.modifier_tenths(stat),
            false,
        )
    };

    StatBlock {
        hp: calc_stat(base.hp, ivs.hp, evs.hp, level, 10, true),
        atk: other(Stat::Atk),
        def: other(Stat::Def),
        spa: other(Stat::Spa),
        spd: other(Stat::Spd),
        spe: other(Stat::Spe),
    }
}

/// A nature + EV spread as published in usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread {
    pub nature: Nature,
    pub evs: StatBlock,
}

impl Spread {
    /// Stats for this spread with perfect IVs
    pub fn stats(&self, base: &StatBlock, level: u32) -> StatBlock {
        calc_stats(base, &StatBlock::uniform(MAX_IV), &self.evs, self.nature, level)
    }
}

/// Parse `"Nature:hp/atk/def/spa/spd/spe"`
pub fn parse_spread(s: &str) -> Result<Spread, TeamError> {
    let (nature, evs) = s
        .split_once(':')
        .ok_or_else(|| TeamError::InvalidSpread(s.to_string()))?;

    let nature = Nature::from_name(nature).ok_or_else(|| TeamError::UnknownNature(nature.to_string()))?;

    let values = evs
        .split('/')
        .map(|v| v.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| TeamError::InvalidSpread(s.to_string()))?;

    let [hp, atk, def, spa, spd, spe] = values[..] else {
        return Err(TeamError::InvalidSpread(s.to_string()));
    };

    Ok(Spread {
        nature,
        evs: StatBlock::new(hp, atk, def, spa, spd, spe),
    })
}
