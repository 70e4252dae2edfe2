//! Effective speed, priority and turn order

use std::fmt;

use tera_protocol::MoveCategory;

use super::snapshot::{FieldSnapshot, MoveSnapshot, SideField, SpeedSnapshot};
use crate::types::{Ability, Item, Side, StatStages, Status, Terrain, Type, Weather};

/// Final speed after stage, item, ability, paralysis and tailwind, truncating
/// after each step.
pub fn effective_speed(snapshot: &SpeedSnapshot, side: &SideField) -> u32 {
    let mut speed = StatStages::apply(snapshot.spe, snapshot.stage);

    match snapshot.item {
        Some(Item::ChoiceScarf) => speed = speed * 3 / 2,
        Some(Item::IronBall) => speed /= 2,
        _ => {}
    }

    let ability_boost = match snapshot.ability {
        Some(Ability::SwiftSwim) => side.weather == Some(Weather::Rain),
        Some(Ability::Chlorophyll) => side.weather == Some(Weather::Sun),
        Some(Ability::SandRush) => side.weather == Some(Weather::Sand),
        Some(Ability::SlushRush) => side.weather == Some(Weather::Snow),
        Some(Ability::SurgeSurfer) => side.terrain == Some(Terrain::Electric),
        Some(Ability::Unburden) => snapshot.item_consumed,
        _ => false,
    };
    if ability_boost {
        speed = speed.saturating_mul(2);
    }

    if snapshot.status == Some(Status::Paralysis) {
        if snapshot.ability == Some(Ability::QuickFeet) {
            speed = speed * 3 / 2;
        } else {
            speed /= 2;
        }
    }

    if side.tailwind {
        speed = speed.saturating_mul(2);
    }

    speed
}

/// Move priority including ability bonuses
pub fn priority_bonus(
    base: i8,
    category: MoveCategory,
    move_type: Type,
    ability: Option<Ability>,
    hp_percent: f64,
) -> i8 {
    let mut priority = base;
    if ability == Some(Ability::Prankster) && category == MoveCategory::Status {
        priority = priority.saturating_add(1);
    }
    if ability == Some(Ability::GaleWings) && move_type == Type::Flying && hp_percent >= 100.0 {
        priority = priority.saturating_add(1);
    }
    priority
}

/// Who acts first this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnOrder {
    MeFirst,
    OpponentFirst,
    /// Equal priority and equal speed; decided at random in play
    SpeedTie,
}

impl TurnOrder {
    /// The side that moves first, if determined
    pub fn first(&self) -> Option<Side> {
        match self {
            TurnOrder::MeFirst => Some(Side::Mine),
            TurnOrder::OpponentFirst => Some(Side::Opponent),
            TurnOrder::SpeedTie => None,
        }
    }
}

/// Why the order came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderReason {
    HigherPriority,
    LowerPriority,
    Faster,
    Slower,
    /// Trick room, and I'm slower
    TrickRoomSlower,
    /// Trick room, and I'm faster
    TrickRoomFaster,
    SpeedTie,
}

impl OrderReason {
    /// Stable code for this reason
    pub fn code(&self) -> &'static str {
        match self {
            OrderReason::HigherPriority => "higher_priority",
            OrderReason::LowerPriority => "lower_priority",
            OrderReason::Faster => "faster",
            OrderReason::Slower => "slower",
            OrderReason::TrickRoomSlower => "trick_room_slower",
            OrderReason::TrickRoomFaster => "trick_room_faster",
            OrderReason::SpeedTie => "speed_tie",
        }
    }
}

impl fmt::Display for OrderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Resolved turn order with the numbers behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderResult {
    pub order: TurnOrder,
    pub reason: OrderReason,
    pub my_speed: u32,
    pub opp_speed: u32,
    pub my_priority: i8,
    pub opp_priority: i8,
}

impl fmt::Display for OrderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.order {
            TurnOrder::MeFirst => "me first",
            TurnOrder::OpponentFirst => "opponent first",
            TurnOrder::SpeedTie => "speed tie",
        };
        write!(
            f,
            "{} ({}): me S{}/P{} vs opponent S{}/P{}",
            order, self.reason, self.my_speed, self.my_priority, self.opp_speed, self.opp_priority
        )
    }
}

/// Decide who moves first.
///
/// Priority wins outright; on equal priority the faster side goes first, or
/// the slower one under trick room. With no known opponent move its priority
/// is taken as 0.
pub fn resolve_order(
    me: &SpeedSnapshot,
    opp: &SpeedSnapshot,
    field: &FieldSnapshot,
    my_move: &MoveSnapshot,
    opp_move: Option<&MoveSnapshot>,
) -> OrderResult {
    let my_speed = effective_speed(me, &field.side_field(Side::Mine));
    let opp_speed = effective_speed(opp, &field.side_field(Side::Opponent));

    let my_priority = priority_bonus(
        my_move.priority,
        my_move.category,
        my_move.move_type,
        me.ability,
        me.hp_percent,
    );
    let opp_priority = opp_move.map_or(0, |mv| {
        priority_bonus(mv.priority, mv.category, mv.move_type, opp.ability, opp.hp_percent)
    });

    let (order, reason) = if my_priority != opp_priority {
        if my_priority > opp_priority {
            (TurnOrder::MeFirst, OrderReason::HigherPriority)
        } else {
            (TurnOrder::OpponentFirst, OrderReason::LowerPriority)
        }
    } else if my_speed == opp_speed {
        (TurnOrder::SpeedTie, OrderReason::SpeedTie)
    } else if field.trick_room {
        if my_speed < opp_speed {
            (TurnOrder::MeFirst, OrderReason::TrickRoomSlower)
        } else {
            (TurnOrder::OpponentFirst, OrderReason::TrickRoomFaster)
        }
    } else if my_speed > opp_speed {
        (TurnOrder::MeFirst, OrderReason::Faster)
    } else {
        (TurnOrder::OpponentFirst, OrderReason::Slower)
    };

    OrderResult {
        order,
        reason,
        my_speed,
        opp_speed,
        my_priority,
        opp_priority,
    }
}
