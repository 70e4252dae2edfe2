//! Wire-level records exchanged with the tera-coach battle engine.
//!
//! Everything in this crate is plain data: the structured [`BattleUpdate`] event
//! produced by an external narrator, and the records returned by the move,
//! usage-statistics and species collaborators. Interpretation (closed enums,
//! clamping, defaults) happens in `tera-battle`.

use thiserror::Error;

pub mod data;
pub mod stat;
pub mod update;

pub use data::{MoveCategory, MoveData, SpeciesData, UsageData};
pub use stat::{Stat, StatBlock};
pub use update::{BattleUpdate, RankChange};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed update event: {0}")]
    Json(#[from] serde_json::Error),
}
