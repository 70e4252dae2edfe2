//! A battle session: state plus the lookup collaborators it needs

use std::fmt;

use tera_protocol::{BattleUpdate, MoveData};
use tera_team::parse_spread;

use super::providers::{MoveProvider, SpeciesProvider, UsageProvider};
use crate::calc::{
    effective_speed, resolve, resolve_order, AttackerSnapshot, DamageResult, DefenderSnapshot,
    FieldSnapshot, MoveSnapshot, OrderResult, SpeedSnapshot,
};
use crate::tracking::BattleState;
use crate::types::{CombatantState, Predictions, Side, SpeedInference, Type};

/// Moves considered when looking for threats
const THREAT_MOVES: usize = 5;

/// Minimum share of max HP for a move to count as a threat
const THREAT_THRESHOLD: f64 = 0.3;

/// Owns a [`BattleState`] and consults the providers on its behalf
pub struct Session<'a> {
    state: BattleState,
    moves: &'a dyn MoveProvider,
    usage: &'a dyn UsageProvider,
    species: &'a dyn SpeciesProvider,
}

/// What [`Session::apply`] did beyond the event itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyOutcome {
    /// Estimated HP change of my active, when not given explicitly
    pub my_hp_estimate: Option<f64>,
    /// Estimated HP change of the opponent's active, when not given explicitly
    pub opp_hp_estimate: Option<f64>,
    /// Opponents seen for the first time
    pub revealed: Vec<String>,
}

/// Damage of one move in a [`SimulationReport`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveReport {
    pub name: String,
    pub damage: DamageResult,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1}%-{:.1}% ({})",
            self.name, self.damage.min_percent, self.damage.max_percent, self.damage.knockout
        )
    }
}

/// Turn order and damage outlook for the current matchup
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    pub attacker: String,
    pub defender: String,
    pub order: OrderResult,
    /// My known damaging moves against the opponent
    pub attacks: Vec<MoveReport>,
    /// Opponent moves that hit hard
    pub threats: Vec<MoveReport>,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Speed: {}", self.order)?;
        writeln!(f, "Attacking {} -> {}", self.attacker, self.defender)?;
        for attack in &self.attacks {
            writeln!(f, "  {attack}")?;
        }
        write!(f, "Threats from {}", self.defender)?;
        if self.threats.is_empty() {
            write!(f, ": none")?;
        }
        for threat in &self.threats {
            write!(f, "\n  {threat}")?;
        }
        Ok(())
    }
}

impl<'a> Session<'a> {
    pub fn new(
        state: BattleState,
        moves: &'a dyn MoveProvider,
        usage: &'a dyn UsageProvider,
        species: &'a dyn SpeciesProvider,
    ) -> Self {
        Self {
            state,
            moves,
            usage,
            species,
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BattleState {
        &mut self.state
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    /// Switch in a combatant, seeding data for opponents seen for the first time
    pub fn set_active(&mut self, side: Side, name: &str) -> bool {
        let is_new = side == Side::Opponent && self.state.combatant(side, name).is_none();
        let switched = self.state.set_active(side, name);
        if is_new {
            self.seed_opponent(name);
        }
        switched
    }

    /// Apply an update event exactly once.
    ///
    /// With no switch this action, a used damaging move without an explicit
    /// HP change is filled in with the negated mean of its computed percent
    /// range.
    pub fn apply(&mut self, update: &BattleUpdate) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        let mut update = update.clone();

        if !update.has_switch() {
            if update.opp_hp_change_input.is_none()
                && let Some(name) = &update.my_move_used
            {
                outcome.opp_hp_estimate = self.estimate_hp_change(Side::Mine, name);
                update.opp_hp_change_input = outcome.opp_hp_estimate;
            }
            if update.my_hp_change_input.is_none()
                && let Some(name) = &update.opp_move_used
            {
                outcome.my_hp_estimate = self.estimate_hp_change(Side::Opponent, name);
                update.my_hp_change_input = outcome.my_hp_estimate;
            }
        }

        let new_opponent = update
            .opp_switch
            .clone()
            .filter(|name| self.state.combatant(Side::Opponent, name).is_none());

        self.state.apply_update(&update);

        if let Some(name) = new_opponent {
            self.seed_opponent(&name);
            outcome.revealed.push(name);
        }
        outcome
    }

    /// Fill in species data and usage predictions for a revealed opponent
    pub fn seed_opponent(&mut self, name: &str) {
        let species = self.species.species(name);
        let usage = self.usage.usage(name);
        let level = self.state.config.level;

        let Some(combatant) = self.state.combatant_mut(Side::Opponent, name) else {
            return;
        };

        let base_stats = species.as_ref().map(|s| s.base_stats);
        if let Some(species) = &species {
            combatant.types = Type::parse_all(&species.types);
            combatant.base_stats = Some(species.base_stats);
        } else {
            tracing::debug!(name, "no species data for opponent");
        }

        let Some(usage) = usage else {
            tracing::debug!(name, "no usage data for opponent");
            return;
        };

        let stats = match (usage.top_spread(), base_stats) {
            (Some(spread), Some(base)) => match parse_spread(spread) {
                Ok(spread) => Some(spread.stats(&base, level)),
                Err(err) => {
                    tracing::debug!(name, spread, %err, "unusable spread");
                    None
                }
            },
            _ => None,
        };

        combatant.apply_predictions(Predictions {
            moves: usage.moves,
            items: usage.items,
            abilities: usage.abilities,
            tera_types: Type::parse_all(&usage.tera_types),
            stats,
        });
    }

    fn actives(&self) -> Option<(&CombatantState, &CombatantState)> {
        Some((self.state.my_active()?, self.state.opp_active()?))
    }

    /// Damage of `move_name` used by `attacker_side`'s active on the other
    /// side's active
    pub fn damage(&self, attacker_side: Side, move_name: &str) -> Option<DamageResult> {
        let data = self.moves.move_or_default(move_name);
        if !data.is_damaging() {
            return None;
        }
        let attacker = self.state.active(attacker_side)?;
        let defender = self.state.active(attacker_side.opposite())?;
        Some(self.resolve_between(attacker, defender, &data))
    }

    fn resolve_between(
        &self,
        attacker: &CombatantState,
        defender: &CombatantState,
        data: &MoveData,
    ) -> DamageResult {
        let field = &self.state.field;
        resolve(
            &AttackerSnapshot::from_combatant(attacker),
            &DefenderSnapshot::from_combatant(defender, field.side(defender.side)),
            &MoveSnapshot::from_data(data),
            &FieldSnapshot::from(field),
        )
    }

    fn estimate_hp_change(&self, attacker_side: Side, move_name: &str) -> Option<f64> {
        let damage = self.damage(attacker_side, move_name)?;
        let estimate = -damage.mean_percent();
        tracing::debug!(move_name, estimate, "estimated hp change");
        Some(estimate)
    }

    /// My effective speed right now
    pub fn my_speed(&self) -> Option<u32> {
        let me = self.state.my_active()?;
        let field = FieldSnapshot::from(&self.state.field);
        Some(effective_speed(
            &SpeedSnapshot::from_combatant(me),
            &field.side_field(Side::Mine),
        ))
    }

    /// Turn order and damage outlook for the current actives
    pub fn simulate(&self) -> Option<SimulationReport> {
        let (me, opp) = self.actives()?;
        let field = FieldSnapshot::from(&self.state.field);

        // Plain priority-0 action on both sides
        let neutral = MoveSnapshot::from_data(&MoveData::unknown("-"));
        let order = resolve_order(
            &SpeedSnapshot::from_combatant(me),
            &SpeedSnapshot::from_combatant(opp),
            &field,
            &neutral,
            Some(&neutral),
        );

        let attacks = me
            .known_moves
            .iter()
            .filter_map(|name| {
                let data = self.moves.move_or_default(name);
                data.is_damaging().then(|| MoveReport {
                    name: name.clone(),
                    damage: self.resolve_between(me, opp, &data),
                })
            })
            .collect();

        let my_hp = me.effective_stats().hp.max(1) as f64;
        let threats = opp
            .likely_moves(THREAT_MOVES)
            .into_iter()
            .filter_map(|name| {
                let data = self.moves.move_or_default(name);
                if !data.is_damaging() {
                    return None;
                }
                let damage = self.resolve_between(opp, me, &data);
                let heavy = damage.min as f64 / my_hp > THREAT_THRESHOLD;
                (heavy || damage.knockout.is_guaranteed()).then(|| MoveReport {
                    name: name.to_string(),
                    damage,
                })
            })
            .collect();

        Some(SimulationReport {
            attacker: me.name.clone(),
            defender: opp.name.clone(),
            order,
            attacks,
            threats,
        })
    }

    /// Infer the opponent's speed investment from who moved first, using my
    /// current effective speed
    pub fn infer_opponent_speed(&mut self, opponent_moved_first: bool) -> SpeedInference {
        let Some(my_speed) = self.my_speed() else {
            return SpeedInference::NoInference;
        };
        let field = self.state.field.clone();
        match self.state.active_mut(Side::Opponent) {
            Some(opp) => opp.infer_speed_and_item(my_speed, opponent_moved_first, &field),
            None => SpeedInference::NoInference,
        }
    }
}
