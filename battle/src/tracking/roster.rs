//! The user's own roster, built from a team export

use tera_protocol::StatBlock;
use tera_team::TeamMember;

use crate::query::SpeciesProvider;
use crate::types::{CombatantState, Fact, Side, Type};

/// A fully known member of the user's team
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub name: String,
    pub stats: StatBlock,
    pub base_stats: StatBlock,
    pub types: Vec<Type>,
    pub item: Option<String>,
    pub ability: Option<String>,
    pub tera_type: Option<Type>,
    pub moves: Vec<String>,
}

impl RosterEntry {
    /// Combine a parsed team member with species data
    pub fn from_member(member: &TeamMember, base_stats: StatBlock, types: Vec<Type>, level: u32) -> Self {
        Self {
            name: member.name.clone(),
            stats: member.stats(&base_stats, level),
            base_stats,
            types,
            item: member.item.clone(),
            ability: member.ability.clone(),
            tera_type: member.tera_type.as_deref().and_then(Type::from_protocol),
            moves: member.moves.clone(),
        }
    }
}

/// Build roster entries for every member with species data. Members without
/// it are skipped.
pub fn build_roster(members: &[TeamMember], species: &impl SpeciesProvider, level: u32) -> Vec<RosterEntry> {
    members
        .iter()
        .filter_map(|member| {
            let Some(data) = species.species(&member.name) else {
                tracing::warn!(name = %member.name, "no species data, skipping roster member");
                return None;
            };
            let types = Type::parse_all(&data.types);
            Some(RosterEntry::from_member(member, data.base_stats, types, level))
        })
        .collect()
}

impl CombatantState {
    /// One of the user's own combatants. Everything the roster supplies is known.
    pub fn new_mine(entry: &RosterEntry) -> Self {
        let mut state = CombatantState::new(entry.name.clone(), Side::Mine);
        state.types = entry.types.clone();
        state.base_stats = Some(entry.base_stats);
        state.known_moves = entry.moves.clone();
        state.item = Fact::from_known(entry.item.clone());
        state.ability = Fact::from_known(entry.ability.clone());
        state.tera_type = Fact::from_known(entry.tera_type);
        state.stats = Fact::Known(entry.stats);
        state
    }

    /// An opponent seen for the first time
    pub fn new_opponent(name: impl Into<String>) -> Self {
        CombatantState::new(name, Side::Opponent)
    }
}
