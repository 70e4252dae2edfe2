//! Battle state tracking, damage and turn-order calculation for singles battles.
//!
//! # Overview
//!
//! `tera-battle` sits between `tera-protocol` (wire records) and whatever
//! narrates the battle:
//!
//! ```text
//! tera-protocol (update events, lookup records)    tera-team (team exports, stats)
//!        │                                              │
//!        └──────────────────────┬───────────────────────┘
//!                               ▼
//!                 tera-battle (state + engines)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Type`] - Types with the effectiveness chart
//! - [`Status`], [`Volatile`] - Status conditions
//! - [`StatStages`] - Stage modifiers (-6 to +6)
//! - [`Weather`], [`Terrain`], [`SideCondition`] - Field conditions
//! - [`Fact`] - Confirmed, predicted or unknown information
//! - [`CombatantState`] - One combatant for the whole battle
//!
//! ## Engines
//! - [`calc::resolve`] - Damage range and knockout class
//! - [`calc::resolve_order`] - Turn order from priority and effective speed
//!
//! ## State Tracking
//! - [`BattleState`] - Both sides, the field and the turn counter
//! - [`Session`] - A state plus move, usage and species providers
//!
//! # Example Usage
//!
//! ```
//! use tera_battle::{BattleConfig, BattleState, Side};
//! use tera_protocol::BattleUpdate;
//!
//! let mut battle = BattleState::new(BattleConfig::default(), &[]);
//! battle.set_active(Side::Opponent, "Flutter Mane");
//!
//! let update = BattleUpdate::from_json(r#"{"opp_hp_change_input": -40, "weather": "rain"}"#)?;
//! battle.apply_update(&update);
//!
//! assert_eq!(battle.opp_active().map(|c| c.hp_percent), Some(60.0));
//! # Ok::<(), tera_protocol::ParseError>(())
//! ```

pub mod calc;
pub mod query;
pub mod tracking;
pub mod types;

// Re-export main types at crate root for convenience
pub use calc::{DamageResult, KnockoutClass, OrderResult, TurnOrder};
pub use query::{MoveProvider, Session, SimulationReport, SpeciesProvider, UsageProvider};
pub use tracking::{BattleConfig, BattleState, RosterEntry, StateReport};
pub use types::{
    Ability, CombatantState, Fact, FieldState, Item, Side, SideCondition, SpeedInference,
    StatStages, Status, Terrain, Type, Volatile, Weather,
};

// Re-export commonly used protocol types
pub use tera_protocol::{BattleUpdate, Stat, StatBlock};
