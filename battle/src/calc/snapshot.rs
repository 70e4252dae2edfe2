//! Immutable inputs for the damage and speed engines

use tera_protocol::{MoveCategory, MoveData, Stat, StatBlock};

use crate::types::{
    Ability, CombatantState, FieldState, Item, Side, SideConditions, StatStages, Status, Terrain,
    Type, Weather,
};

/// The attacking side of one damage calculation
#[derive(Debug, Clone, PartialEq)]
pub struct AttackerSnapshot {
    pub stats: StatBlock,
    pub boosts: StatStages,
    pub status: Option<Status>,
    pub item: Option<Item>,
    /// Original types
    pub types: Vec<Type>,
    pub tera_type: Option<Type>,
    pub terastallized: bool,
}

impl AttackerSnapshot {
    /// Snapshot a combatant, using best guesses for unconfirmed facts
    pub fn from_combatant(state: &CombatantState) -> Self {
        Self {
            stats: state.effective_stats(),
            boosts: state.boosts,
            status: state.status,
            item: state.item.best_guess().and_then(|name| Item::from_name(name)),
            types: state.types.clone(),
            tera_type: state.tera_type.best_guess().copied(),
            terastallized: state.terastallized,
        }
    }
}

/// The defending side of one damage calculation
#[derive(Debug, Clone, PartialEq)]
pub struct DefenderSnapshot {
    pub stats: StatBlock,
    pub boosts: StatStages,
    /// Effective defensive types; empty when unknown
    pub types: Vec<Type>,
    pub reflect: bool,
    pub light_screen: bool,
}

impl DefenderSnapshot {
    /// Snapshot a combatant behind its side's screens.
    ///
    /// A terastallized defender with a known or predicted tera type defends
    /// as that single type.
    pub fn from_combatant(state: &CombatantState, screens: &SideConditions) -> Self {
        let types = match (state.terastallized, state.tera_type.best_guess()) {
            (true, Some(tera)) => vec![*tera],
            _ => state.types.clone(),
        };
        Self {
            stats: state.effective_stats(),
            boosts: state.boosts,
            types,
            reflect: screens.reflect,
            light_screen: screens.light_screen,
        }
    }
}

/// The move being used
#[derive(Debug, Clone, PartialEq)]
pub struct MoveSnapshot {
    pub name: String,
    pub move_type: Type,
    pub category: MoveCategory,
    pub power: u32,
    pub priority: i8,
    pub critical: bool,
}

impl MoveSnapshot {
    /// Build from move metadata. An unrecognised type string counts as Normal.
    pub fn from_data(data: &MoveData) -> Self {
        let move_type = Type::from_protocol(&data.move_type).unwrap_or_else(|| {
            tracing::debug!(name = %data.name, move_type = %data.move_type, "unknown move type");
            Type::Normal
        });
        Self {
            name: data.name.clone(),
            move_type,
            category: data.category,
            power: data.power,
            priority: data.priority,
            critical: false,
        }
    }

    /// Same move, landing a critical hit
    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    /// Whether the move deals direct damage
    pub fn is_damaging(&self) -> bool {
        self.power > 0 && self.category != MoveCategory::Status
    }

    /// Attacking and defending stat used by this move
    pub fn stat_pair(&self) -> (Stat, Stat) {
        match self.category {
            MoveCategory::Physical => (Stat::Atk, Stat::Def),
            MoveCategory::Special | MoveCategory::Status => (Stat::Spa, Stat::Spd),
        }
    }
}

/// Field effects relevant to a calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub trick_room: bool,
    pub mine: SideConditions,
    pub opponent: SideConditions,
}

impl FieldSnapshot {
    /// The field as seen from one side
    pub fn side_field(&self, side: Side) -> SideField {
        let conditions = match side {
            Side::Mine => &self.mine,
            Side::Opponent => &self.opponent,
        };
        SideField {
            weather: self.weather,
            terrain: self.terrain,
            tailwind: conditions.tailwind,
        }
    }
}

impl From<&FieldState> for FieldSnapshot {
    fn from(field: &FieldState) -> Self {
        Self {
            weather: field.weather,
            terrain: field.terrain,
            trick_room: field.trick_room,
            mine: field.mine,
            opponent: field.opponent,
        }
    }
}

/// Field effects acting on one side's speed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideField {
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub tailwind: bool,
}

/// Speed-relevant state of one combatant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSnapshot {
    pub spe: u32,
    pub stage: i8,
    pub item: Option<Item>,
    pub ability: Option<Ability>,
    pub status: Option<Status>,
    /// Consumed its item this turn
    pub item_consumed: bool,
    pub hp_percent: f64,
}

impl SpeedSnapshot {
    pub fn from_combatant(state: &CombatantState) -> Self {
        Self {
            spe: state.effective_stats().spe,
            stage: state.boosts.spe,
            item: state.item.best_guess().and_then(|name| Item::from_name(name)),
            ability: state.ability.best_guess().and_then(|name| Ability::from_name(name)),
            status: state.status,
            item_consumed: state.item_consumed,
            hp_percent: state.hp_percent,
        }
    }
}
