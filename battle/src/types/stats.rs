//! Stat stages and stage math

use tera_protocol::Stat;

/// Stat stages (-6 to +6) for the five stageable stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
}

impl StatStages {
    pub const MIN: i8 = -6;
    pub const MAX: i8 = 6;

    /// Create new stat stages (all at 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Get stage for a stat
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }

    /// Set stage for a stat (clamped to -6..+6)
    pub fn set(&mut self, stat: Stat, value: i8) {
        let clamped = value.clamp(Self::MIN, Self::MAX);
        match stat {
            Stat::Atk => self.atk = clamped,
            Stat::Def => self.def = clamped,
            Stat::Spa => self.spa = clamped,
            Stat::Spd => self.spd = clamped,
            Stat::Spe => self.spe = clamped,
        }
    }

    /// Apply a signed change to a stat, returns actual change applied
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = current.saturating_add(amount).clamp(Self::MIN, Self::MAX);
        self.set(stat, new_value);
        new_value - current
    }

    /// Reset all stages to 0
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if all stats are at 0
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }

    /// Multiplier for a stage: +1 = 1.5x ... +6 = 4x, -1 = 0.67x ... -6 = 0.25x
    pub fn multiplier(stage: i8) -> f64 {
        let (num, den) = Self::ratio(stage);
        num as f64 / den as f64
    }

    /// `floor(value * multiplier(stage))`, computed exactly
    pub fn apply(value: u32, stage: i8) -> u32 {
        let (num, den) = Self::ratio(stage);
        value * num / den
    }

    fn ratio(stage: i8) -> (u32, u32) {
        let stage = stage.clamp(Self::MIN, Self::MAX);
        if stage >= 0 {
            (2 + stage as u32, 2)
        } else {
            (2, 2 + stage.unsigned_abs() as u32)
        }
    }
}
