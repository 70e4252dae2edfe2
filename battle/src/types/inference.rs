//! Speed-nature and Choice Scarf inference from observed turn order

use std::fmt;

use super::field::FieldState;
use super::items::Item;
use super::pokemon::{CombatantState, Revealed};
use super::side::Side;
use super::status::Status;

/// Neutral-nature speed at level 50 with 252 EVs and 31 IVs
pub const fn neutral_max_speed(base: u32) -> u32 {
    (2 * base + 31 + 63) / 2 + 5
}

/// Positive-nature speed at level 50 with 252 EVs and 31 IVs
pub const fn positive_max_speed(base: u32) -> u32 {
    neutral_max_speed(base) * 11 / 10
}

/// What was concluded about the opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InferredFact {
    /// Faster than any nature allows: holds a Choice Scarf
    ChoiceScarf,
    /// Faster than neutral max speed: speed-boosting nature
    MaxSpeedNature,
    /// Slower than positive max speed: likely a bulk-oriented spread
    NotMaxSpeed,
}

impl InferredFact {
    /// Stable code for this conclusion
    pub fn code(&self) -> &'static str {
        match self {
            InferredFact::ChoiceScarf => "choice_scarf",
            InferredFact::MaxSpeedNature => "max_speed_nature",
            InferredFact::NotMaxSpeed => "not_max_speed",
        }
    }
}

impl fmt::Display for InferredFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The numbers an inference was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rationale {
    pub my_speed: u32,
    pub neutral_max: u32,
    pub positive_max: u32,
    pub opponent_moved_first: bool,
}

/// Outcome of a speed inference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedInference {
    NoInference,
    Inferred {
        fact: InferredFact,
        rationale: Rationale,
    },
}

impl SpeedInference {
    pub fn fact(&self) -> Option<InferredFact> {
        match self {
            SpeedInference::Inferred { fact, .. } => Some(*fact),
            SpeedInference::NoInference => None,
        }
    }
}

impl fmt::Display for SpeedInference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedInference::NoInference => write!(f, "no inference"),
            SpeedInference::Inferred { fact, rationale } => match fact {
                InferredFact::ChoiceScarf => write!(
                    f,
                    "outsped {} despite positive max speed {}: Choice Scarf",
                    rationale.my_speed, rationale.positive_max
                ),
                InferredFact::MaxSpeedNature => write!(
                    f,
                    "outsped {} above neutral max speed {}: speed nature",
                    rationale.my_speed, rationale.neutral_max
                ),
                InferredFact::NotMaxSpeed => write!(
                    f,
                    "slower than {} under positive max speed {}: bulk nature likely",
                    rationale.my_speed, rationale.positive_max
                ),
            },
        }
    }
}

impl CombatantState {
    /// Infer the opponent's speed investment from who moved first.
    ///
    /// Only meaningful for opponents with known base stats. Tailwind on the
    /// opponent's side, paralysis and trick room make the order uninformative.
    /// A Choice Scarf conclusion is revealed on the combatant.
    pub fn infer_speed_and_item(
        &mut self,
        my_speed: u32,
        opponent_moved_first: bool,
        field: &FieldState,
    ) -> SpeedInference {
        if self.side != Side::Opponent {
            return SpeedInference::NoInference;
        }
        let Some(base) = self.base_stats else {
            return SpeedInference::NoInference;
        };
        if field.opponent.tailwind || field.trick_room || self.status == Some(Status::Paralysis) {
            return SpeedInference::NoInference;
        }

        let rationale = Rationale {
            my_speed,
            neutral_max: neutral_max_speed(base.spe),
            positive_max: positive_max_speed(base.spe),
            opponent_moved_first,
        };

        let fact = if opponent_moved_first {
            if my_speed >= rationale.positive_max {
                if self.item.is_known() {
                    return SpeedInference::NoInference;
                }
                self.reveal(Revealed::Item(Item::ChoiceScarf.to_string()));
                InferredFact::ChoiceScarf
            } else if my_speed >= rationale.neutral_max {
                InferredFact::MaxSpeedNature
            } else {
                return SpeedInference::NoInference;
            }
        } else if my_speed < rationale.positive_max {
            InferredFact::NotMaxSpeed
        } else {
            return SpeedInference::NoInference;
        };

        tracing::debug!(name = %self.name, %fact, ?rationale, "speed inference");
        SpeedInference::Inferred { fact, rationale }
    }
}
