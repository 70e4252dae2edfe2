//! Damage range and knockout classification for a single attack
//!
//! Every step works on integers and floors immediately. Multipliers are kept
//! as exact ratios so results never depend on float rounding.

use std::fmt;

use tera_protocol::MoveCategory;

use super::snapshot::{AttackerSnapshot, DefenderSnapshot, FieldSnapshot, MoveSnapshot};
use crate::types::{effectiveness, Item, StatStages, Status, Terrain, Type, Weather};

/// All calculations assume this level
pub const LEVEL: u64 = 50;

/// Lowest random roll, in percent
const MIN_ROLL: u64 = 85;

/// (numerator, denominator)
type Ratio = (u64, u64);

const NEUTRAL: Ratio = (1, 1);
const HALF: Ratio = (1, 2);
const ONE_AND_HALF: Ratio = (3, 2);
const DOUBLE: Ratio = (2, 1);
const TERRAIN_BOOST: Ratio = (13, 10);
const LIFE_ORB: Ratio = (13, 10);

/// How reliably the attack knocks out the defender
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnockoutClass {
    GuaranteedOhko,
    PossibleOhko,
    GuaranteedTwoHko,
    TwoPlusHits,
}

impl KnockoutClass {
    fn classify(min: u32, max: u32, hp: u32) -> Self {
        if min >= hp {
            KnockoutClass::GuaranteedOhko
        } else if max >= hp {
            KnockoutClass::PossibleOhko
        } else if min.saturating_mul(2) >= hp {
            KnockoutClass::GuaranteedTwoHko
        } else {
            KnockoutClass::TwoPlusHits
        }
    }

    /// Guaranteed to KO within two hits
    pub fn is_guaranteed(&self) -> bool {
        matches!(
            self,
            KnockoutClass::GuaranteedOhko | KnockoutClass::GuaranteedTwoHko
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KnockoutClass::GuaranteedOhko => "guaranteed OHKO",
            KnockoutClass::PossibleOhko => "possible OHKO",
            KnockoutClass::GuaranteedTwoHko => "guaranteed 2HKO",
            KnockoutClass::TwoPlusHits => "2+ hits, not guaranteed",
        }
    }
}

impl fmt::Display for KnockoutClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one damage calculation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    pub min: u32,
    pub max: u32,
    /// Percent of the defender's max HP, one decimal
    pub min_percent: f64,
    pub max_percent: f64,
    pub knockout: KnockoutClass,
    pub effectiveness: f32,
}

impl DamageResult {
    /// Mean of the percent range
    pub fn mean_percent(&self) -> f64 {
        (self.min_percent + self.max_percent) / 2.0
    }
}

impl fmt::Display for DamageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} ({:.1}%-{:.1}%) {} (x{})",
            self.min, self.max, self.min_percent, self.max_percent, self.knockout, self.effectiveness
        )
    }
}

/// Compute the damage range of `mv` from `attacker` against `defender`.
///
/// Non-damaging moves produce an all-zero result.
pub fn resolve(
    attacker: &AttackerSnapshot,
    defender: &DefenderSnapshot,
    mv: &MoveSnapshot,
    field: &FieldSnapshot,
) -> DamageResult {
    let type_mod = effectiveness(mv.move_type, &defender.types);
    let hp = defender.stats.hp.max(1);

    if !mv.is_damaging() {
        return DamageResult {
            min: 0,
            max: 0,
            min_percent: 0.0,
            max_percent: 0.0,
            knockout: KnockoutClass::classify(0, 0, hp),
            effectiveness: type_mod,
        };
    }

    let power = effective_power(mv, field);

    // Stats after stages
    let (atk_stat, def_stat) = mv.stat_pair();
    let mut atk_stage = attacker.boosts.get(atk_stat);
    let mut def_stage = defender.boosts.get(def_stat);
    if mv.critical {
        atk_stage = atk_stage.max(0);
        def_stage = def_stage.min(0);
    }
    let atk = StatStages::apply(attacker.stats.get(atk_stat), atk_stage) as u64;
    let def = (StatStages::apply(defender.stats.get(def_stat), def_stage) as u64).max(1);

    let base_factor = 2 * LEVEL / 5 + 2;
    let mut damage = base_factor * power * atk / def / 50 + 2;

    let physical = mv.category == MoveCategory::Physical;

    // Burn
    if physical && attacker.status == Some(Status::Burn) {
        damage = scale(damage, HALF);
    }

    // Screens
    if !mv.critical && ((physical && defender.reflect) || (!physical && defender.light_screen)) {
        damage = scale(damage, HALF);
    }

    damage = scale(damage, item_modifier(attacker.item, mv.category));
    damage = scale(damage, stab_modifier(attacker, mv.move_type));
    damage = (damage as f64 * type_mod as f64).floor() as u64;

    let max = u32::try_from(damage).unwrap_or(u32::MAX);
    let min = u32::try_from(damage * MIN_ROLL / 100).unwrap_or(u32::MAX);

    DamageResult {
        min,
        max,
        min_percent: percent_of(min, hp),
        max_percent: percent_of(max, hp),
        knockout: KnockoutClass::classify(min, max, hp),
        effectiveness: type_mod,
    }
}

/// Base power after weather and terrain
fn effective_power(mv: &MoveSnapshot, field: &FieldSnapshot) -> u64 {
    let weather = match (field.weather, mv.move_type) {
        (Some(Weather::Sun), Type::Fire) | (Some(Weather::Rain), Type::Water) => ONE_AND_HALF,
        (Some(Weather::Sun), Type::Water) | (Some(Weather::Rain), Type::Fire) => HALF,
        _ => NEUTRAL,
    };
    let terrain = match (field.terrain, mv.move_type) {
        (Some(Terrain::Electric), Type::Electric)
        | (Some(Terrain::Grassy), Type::Grass)
        | (Some(Terrain::Psychic), Type::Psychic) => TERRAIN_BOOST,
        (Some(Terrain::Misty), Type::Dragon) => HALF,
        _ => NEUTRAL,
    };

    mv.power as u64 * weather.0 * terrain.0 / (weather.1 * terrain.1)
}

fn item_modifier(item: Option<Item>, category: MoveCategory) -> Ratio {
    match (item, category) {
        (Some(Item::ChoiceBand), MoveCategory::Physical) => ONE_AND_HALF,
        (Some(Item::ChoiceSpecs), MoveCategory::Special) => ONE_AND_HALF,
        (Some(Item::LifeOrb), _) => LIFE_ORB,
        _ => NEUTRAL,
    }
}

/// Same-type bonus, accounting for terastallization
fn stab_modifier(attacker: &AttackerSnapshot, move_type: Type) -> Ratio {
    let original = attacker.types.contains(&move_type);
    let tera_match = attacker.terastallized && attacker.tera_type == Some(move_type);

    match (tera_match, original) {
        (true, true) => DOUBLE,
        (true, false) | (false, true) => ONE_AND_HALF,
        (false, false) => NEUTRAL,
    }
}

fn scale(value: u64, (num, den): Ratio) -> u64 {
    value * num / den
}

fn percent_of(damage: u32, hp: u32) -> f64 {
    (damage as f64 / hp as f64 * 1000.0).round() / 10.0
}
