//! Battle state tracking from structured update events

mod battle;
mod config;
mod roster;
mod updater;

pub use battle::{ActiveReport, BattleState, StateReport};
pub use config::BattleConfig;
pub use roster::{build_roster, RosterEntry};
