//! Domain types for battle state tracking

mod conditions;
mod field;
mod inference;
mod info;
mod items;
mod pokemon;
mod pokemon_type;
mod side;
mod stats;
mod status;

pub use conditions::{SideCondition, Terrain, Weather};
pub use field::FieldState;
pub use inference::{
    neutral_max_speed, positive_max_speed, InferredFact, Rationale, SpeedInference,
};
pub use info::Fact;
pub use items::{Ability, Item};
pub use pokemon::{CombatantState, Predictions, Revealed, FALLBACK_STATS};
pub use pokemon_type::{effectiveness, Type, TYPE_CHART};
pub use side::{Side, SideConditions};
pub use stats::StatStages;
pub use status::{Status, Volatile};
