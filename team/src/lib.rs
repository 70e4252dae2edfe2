//! Team definitions for tera-coach.
//!
//! - [`Nature`] and the level-scaled stat formula ([`calc_stat`], [`calc_stats`])
//! - [`Spread`] parsing for usage-statistics spreads (`"Timid:4/0/0/252/0/252"`)
//! - [`parse_team`] for Showdown-style team exports
//!
//! # Example Usage
//!
//! ```
//! use tera_team::{parse_team, Nature};
//! use tera_protocol::StatBlock;
//!
//! let team = parse_team("Dragonite @ Choice Band\nAbility: Multiscale\nAdamant Nature\n- Extreme Speed").unwrap();
//! let base = StatBlock::new(91, 134, 95, 100, 100, 80);
//! let stats = team[0].stats(&base, 50);
//! assert_eq!(team[0].nature, Nature::Adamant);
//! assert!(stats.atk > stats.spa);
//! ```

use thiserror::Error;

mod export;
mod nature;
mod spread;

pub use export::{parse_team, TeamMember};
pub use nature::Nature;
pub use spread::{calc_stat, calc_stats, parse_spread, Spread, MAX_IV};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TeamError {
    #[error("Invalid spread: {0}")]
    InvalidSpread(String),

    #[error("Invalid stat line: {0}")]
    InvalidStatLine(String),

    #[error("Unknown nature: {0}")]
    UnknownNature(String),

    #[error("Empty team")]
    EmptyTeam,
}
