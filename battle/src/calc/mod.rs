//! Stateless damage and turn-order calculation over point-in-time snapshots

mod damage;
mod snapshot;
mod speed;

pub use damage::{resolve, DamageResult, KnockoutClass, LEVEL};
pub use snapshot::{
    AttackerSnapshot, DefenderSnapshot, FieldSnapshot, MoveSnapshot, SideField, SpeedSnapshot,
};
pub use speed::{effective_speed, priority_bonus, resolve_order, OrderReason, OrderResult, TurnOrder};
