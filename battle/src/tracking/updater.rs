//! Applying structured update events to the battle state

use std::collections::BTreeMap;

use tera_protocol::{BattleUpdate, RankChange};

use super::battle::BattleState;
use crate::types::{
    CombatantState, Revealed, Side, SideCondition, Status, Terrain, Type, Volatile, Weather,
};

/// A narrated string field, trimmed. Blank counts as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Whether a narrated value means "cleared"
fn is_clear(value: &str) -> bool {
    value.eq_ignore_ascii_case("none")
}

impl BattleState {
    /// Apply one update event. Absent fields change nothing; unrecognised
    /// values are ignored.
    ///
    /// Order: switches, HP, stages, status, field, side conditions, revealed
    /// information, moves, item consumption, turn end.
    pub fn apply_update(&mut self, update: &BattleUpdate) {
        // === Switches ===
        if let Some(name) = present(&update.my_switch) {
            self.set_active(Side::Mine, name);
        }
        if let Some(name) = present(&update.opp_switch) {
            self.set_active(Side::Opponent, name);
        }

        // === HP ===
        for (side, delta) in [
            (Side::Mine, update.my_hp_change_input),
            (Side::Opponent, update.opp_hp_change_input),
        ] {
            if let Some(delta) = delta {
                self.with_active(side, "hp change", |c| c.update_hp(delta));
            }
        }

        // === Stages ===
        for (side, change) in [
            (Side::Mine, update.my_rank_change),
            (Side::Opponent, update.opp_rank_change),
        ] {
            if let Some(change) = change {
                self.apply_rank_change(side, &change);
            }
        }

        // === Status ===
        for (side, status) in [
            (Side::Mine, &update.my_status_change),
            (Side::Opponent, &update.opp_status_change),
        ] {
            if let Some(status) = present(status) {
                self.apply_status(side, status);
            }
        }

        // === Volatiles ===
        for (side, changes) in [
            (Side::Mine, &update.my_volatile_change),
            (Side::Opponent, &update.opp_volatile_change),
        ] {
            if let Some(changes) = changes {
                self.apply_volatiles(side, changes);
            }
        }

        // === Field ===
        if let Some(weather) = present(&update.weather) {
            self.apply_weather(weather);
        }
        if let Some(terrain) = present(&update.terrain) {
            self.apply_terrain(terrain);
        }
        if let Some(trick_room) = update.trick_room {
            self.field.trick_room = trick_room;
        }

        // === Side conditions ===
        let side_updates = [
            (Side::Mine, SideCondition::Tailwind, update.my_tailwind),
            (Side::Opponent, SideCondition::Tailwind, update.opp_tailwind),
            (Side::Mine, SideCondition::Reflect, update.my_reflect),
            (Side::Opponent, SideCondition::Reflect, update.opp_reflect),
            (Side::Mine, SideCondition::LightScreen, update.my_light_screen),
            (Side::Opponent, SideCondition::LightScreen, update.opp_light_screen),
            (Side::Mine, SideCondition::StealthRock, update.my_stealth_rock),
            (Side::Opponent, SideCondition::StealthRock, update.opp_stealth_rock),
        ];
        for (side, condition, value) in side_updates {
            if let Some(active) = value {
                self.field.side_mut(side).set(condition, active);
            }
        }

        // === Revealed information ===
        self.apply_reveals(update);
        if let Some(terastallized) = update.my_terastallized {
            self.with_active(Side::Mine, "terastallization", |c| c.terastallized = terastallized);
        }

        // === Moves ===
        for (side, move_name) in [
            (Side::Mine, &update.my_move_used),
            (Side::Opponent, &update.opp_move_used),
        ] {
            if let Some(move_name) = present(move_name) {
                self.with_active(side, "move", |c| c.record_move(move_name));
            }
        }

        // === Item consumption ===
        for (side, consumed) in [
            (Side::Mine, update.my_item_consumed),
            (Side::Opponent, update.opp_item_consumed),
        ] {
            if let Some(consumed) = consumed {
                self.with_active(side, "item consumption", |c| c.item_consumed = consumed);
            }
        }

        if update.turn_end {
            self.advance_turn();
        }
    }

    /// Run `f` on the active combatant, or log that there is none
    fn with_active(&mut self, side: Side, what: &str, f: impl FnOnce(&mut CombatantState)) {
        match self.active_mut(side) {
            Some(combatant) => f(combatant),
            None => tracing::debug!(%side, what, "no active combatant, ignoring"),
        }
    }

    fn apply_rank_change(&mut self, side: Side, change: &RankChange) {
        self.with_active(side, "rank change", |c| {
            for (stat, delta) in change.deltas() {
                c.set_stage(stat, delta);
            }
        });
    }

    fn apply_status(&mut self, side: Side, value: &str) {
        let status = if is_clear(value) {
            None
        } else {
            match Status::from_protocol(value) {
                Some(status) => Some(status),
                None => {
                    tracing::debug!(value, "unrecognised status, ignoring");
                    return;
                }
            }
        };
        self.with_active(side, "status", |c| c.set_status(status));
    }

    fn apply_volatiles(&mut self, side: Side, changes: &BTreeMap<String, bool>) {
        let parsed: Vec<(Volatile, bool)> = changes
            .iter()
            .filter_map(|(name, active)| match Volatile::from_protocol(name) {
                Some(v) => Some((v, *active)),
                None => {
                    tracing::debug!(name = name.as_str(), "unrecognised volatile, ignoring");
                    None
                }
            })
            .collect();
        self.with_active(side, "volatiles", |c| {
            for (v, active) in parsed {
                c.set_volatile(v, active);
            }
        });
    }

    fn apply_weather(&mut self, value: &str) {
        if is_clear(value) {
            self.field.weather = None;
        } else if let Some(weather) = Weather::from_protocol(value) {
            self.field.weather = Some(weather);
        } else {
            tracing::debug!(value, "unrecognised weather, ignoring");
        }
    }

    fn apply_terrain(&mut self, value: &str) {
        if is_clear(value) {
            self.field.terrain = None;
        } else if let Some(terrain) = Terrain::from_protocol(value) {
            self.field.terrain = Some(terrain);
        } else {
            tracing::debug!(value, "unrecognised terrain, ignoring");
        }
    }

    fn apply_reveals(&mut self, update: &BattleUpdate) {
        if let Some(item) = present(&update.opp_item) {
            self.with_active(Side::Opponent, "item", |c| {
                c.reveal(Revealed::Item(item.to_string()))
            });
        }
        if let Some(ability) = present(&update.opp_ability) {
            self.with_active(Side::Opponent, "ability", |c| {
                c.reveal(Revealed::Ability(ability.to_string()))
            });
        }
        if let Some(tera) = present(&update.opp_tera_type) {
            match Type::from_protocol(tera) {
                Some(tera) => self.with_active(Side::Opponent, "tera type", |c| {
                    c.reveal(Revealed::TeraType(tera));
                    c.terastallized = true;
                }),
                None => tracing::debug!(value = %tera, "unrecognised tera type, ignoring"),
            }
        }
    }
}
