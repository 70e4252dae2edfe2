//! Queries over a live battle
//!
//! The lookup providers a session consults, and the [`Session`] that ties a
//! [`BattleState`](crate::tracking::BattleState) to them.

mod providers;
mod session;

pub use providers::{
    MoveProvider, MoveTable, SpeciesProvider, SpeciesTable, UsageProvider, UsageTable,
};
pub use session::{ApplyOutcome, MoveReport, Session, SimulationReport};
