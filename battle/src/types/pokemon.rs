//! Per-combatant battle state

use std::collections::BTreeSet;

use tera_protocol::{Stat, StatBlock};

use super::info::Fact;
use super::pokemon_type::Type;
use super::side::Side;
use super::stats::StatStages;
use super::status::{Status, Volatile};

/// Stats assumed for an opponent nothing is known about
pub const FALLBACK_STATS: StatBlock = StatBlock::uniform(100);

/// A piece of information revealed during play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revealed {
    Item(String),
    Ability(String),
    TeraType(Type),
    Stats(StatBlock),
}

/// Ranked predictions for an opponent, already converted to domain types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predictions {
    pub moves: Vec<String>,
    pub items: Vec<String>,
    pub abilities: Vec<String>,
    pub tera_types: Vec<Type>,
    pub stats: Option<StatBlock>,
}

/// One combatant's state for the whole battle
///
/// Lifecycle: benched ⇄ active → fainted. Switching out resets stages and
/// volatiles; HP, status, known moves and learned facts persist.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub name: String,
    pub side: Side,

    // === HP ===
    /// Remaining HP in percent, always within [0, 100]
    pub hp_percent: f64,

    // === Status ===
    pub status: Option<Status>,

    /// Set when HP reaches 0, never cleared
    pub fainted: bool,

    /// Whether currently on the field
    pub active: bool,

    // === Combat state (cleared on switch) ===
    pub boosts: StatStages,
    pub volatiles: BTreeSet<Volatile>,

    /// Consumed its item this turn (Unburden)
    pub item_consumed: bool,

    // === Typing ===
    /// Original types from species data (empty when unknown)
    pub types: Vec<Type>,

    /// Whether the combatant has terastallized. Lasts for the rest of the battle.
    pub terastallized: bool,

    /// Base stats, needed for speed inference
    pub base_stats: Option<StatBlock>,

    // === Information ===
    /// Moves seen in play, in order of first sighting
    pub known_moves: Vec<String>,

    /// Popular moves not yet seen
    pub predicted_moves: Vec<String>,

    pub item: Fact<String>,
    pub ability: Fact<String>,
    pub tera_type: Fact<Type>,
    pub stats: Fact<StatBlock>,
}

impl CombatantState {
    /// A fresh combatant with nothing known about it
    pub fn new(name: impl Into<String>, side: Side) -> Self {
        Self {
            name: name.into(),
            side,
            hp_percent: 100.0,
            status: None,
            fainted: false,
            active: false,
            boosts: StatStages::new(),
            volatiles: BTreeSet::new(),
            item_consumed: false,
            types: Vec::new(),
            terastallized: false,
            base_stats: None,
            known_moves: Vec::new(),
            predicted_moves: Vec::new(),
            item: Fact::Unknown,
            ability: Fact::Unknown,
            tera_type: Fact::Unknown,
            stats: Fact::Unknown,
        }
    }

    /// Check if the combatant is alive (not fainted)
    pub fn is_alive(&self) -> bool {
        !self.fainted
    }

    /// Check if the combatant can be switched to
    pub fn can_switch_to(&self) -> bool {
        self.is_alive() && !self.active
    }

    /// Stats to calculate with: confirmed, else predicted, else a flat 100
    pub fn effective_stats(&self) -> StatBlock {
        self.stats.best_guess().copied().unwrap_or(FALLBACK_STATS)
    }

    // === Mutations ===

    /// Apply a signed HP change in percent. Reaching 0 faints the combatant.
    pub fn update_hp(&mut self, delta: f64) {
        if self.fainted || !delta.is_finite() {
            return;
        }

        self.hp_percent = (self.hp_percent + delta).clamp(0.0, 100.0);
        if self.hp_percent == 0.0 {
            self.fainted = true;
            tracing::info!(name = %self.name, side = %self.side, "fainted");
        }
    }

    /// Apply a stage change, returns the change actually applied
    pub fn set_stage(&mut self, stat: Stat, delta: i8) -> i8 {
        if self.fainted {
            return 0;
        }
        self.boosts.boost(stat, delta)
    }

    /// Set or clear the non-volatile status
    pub fn set_status(&mut self, status: Option<Status>) {
        if self.fainted {
            return;
        }
        self.status = status;
    }

    /// Check for a volatile condition
    pub fn has_volatile(&self, v: Volatile) -> bool {
        self.volatiles.contains(&v)
    }

    /// Set or clear a volatile condition
    pub fn set_volatile(&mut self, v: Volatile, active: bool) {
        if active {
            self.volatiles.insert(v);
        } else {
            self.volatiles.remove(&v);
        }
    }

    /// Confirm a fact. Irreversible; the latest value wins.
    pub fn reveal(&mut self, info: Revealed) {
        tracing::info!(name = %self.name, info = ?info, "information revealed");
        match info {
            Revealed::Item(item) => self.item.reveal(item),
            Revealed::Ability(ability) => self.ability.reveal(ability),
            Revealed::TeraType(tera) => self.tera_type.reveal(tera),
            Revealed::Stats(stats) => self.stats.reveal(stats),
        }
    }

    /// Record a move seen in play (idempotent)
    pub fn record_move(&mut self, move_name: &str) {
        if !self.known_moves.iter().any(|m| m == move_name) {
            self.known_moves.push(move_name.to_string());
        }
    }

    /// Store usage-based predictions. Confirmed facts are left alone.
    pub fn apply_predictions(&mut self, predictions: Predictions) {
        self.predicted_moves = predictions.moves;
        self.item.predict(predictions.items);
        self.ability.predict(predictions.abilities);
        self.tera_type.predict(predictions.tera_types);
        self.stats.predict(predictions.stats.into_iter().collect());
    }

    /// Known moves followed by predicted ones, deduplicated, at most `limit`
    pub fn likely_moves(&self, limit: usize) -> Vec<&str> {
        let mut moves: Vec<&str> = Vec::new();
        for m in self.known_moves.iter().chain(&self.predicted_moves) {
            if !moves.contains(&m.as_str()) {
                moves.push(m);
            }
        }
        moves.truncate(limit);
        moves
    }

    // === Transitions ===

    /// Called when this combatant switches out
    pub fn on_switch_out(&mut self) {
        self.active = false;
        self.reset_battle_status();
    }

    /// Called when this combatant switches in
    pub fn on_switch_in(&mut self) {
        self.reset_battle_status();
        self.active = true;
    }

    fn reset_battle_status(&mut self) {
        self.boosts.clear();
        self.volatiles.clear();
        self.item_consumed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_combatant() {
        let state = CombatantState::new("Garchomp", Side::Opponent);
        assert_eq!(state.name, "Garchomp");
        assert_eq!(state.hp_percent, 100.0);
        assert!(!state.fainted);
        assert!(!state.active);
        assert!(state.boosts.is_clear());
        assert_eq!(state.item, Fact::Unknown);
        assert_eq!(state.effective_stats(), FALLBACK_STATS);
    }

    #[test]
    fn test_update_hp_clamps() {
        let mut state = CombatantState::new("Test", Side::Mine);

        state.update_hp(-30.5);
        assert_eq!(state.hp_percent, 69.5);

        state.update_hp(500.0);
        assert_eq!(state.hp_percent, 100.0);
        assert!(!state.fainted);

        state.update_hp(f64::NAN);
        assert_eq!(state.hp_percent, 100.0);
    }

    #[test]
    fn test_update_hp_faints_at_zero() {
        let mut state = CombatantState::new("Test", Side::Mine);
        state.update_hp(-250.0);

        assert_eq!(state.hp_percent, 0.0);
        assert!(state.fainted);
        assert!(!state.is_alive());

        // No revival
        state.update_hp(50.0);
        assert_eq!(state.hp_percent, 0.0);
        assert!(state.fainted);
    }

    #[test]
    fn test_exact_zero_faints() {
        let mut state = CombatantState::new("Test", Side::Mine);
        state.update_hp(-100.0);
        assert!(state.fainted);
    }

    #[test]
    fn test_fainted_rejects_mutation() {
        let mut state = CombatantState::new("Test", Side::Mine);
        state.update_hp(-100.0);

        assert_eq!(state.set_stage(Stat::Atk, 2), 0);
        assert!(state.boosts.is_clear());

        state.set_status(Some(Status::Burn));
        assert!(state.status.is_none());
    }

    #[test]
    fn test_set_stage_clamps_cumulatively() {
        let mut state = CombatantState::new("Test", Side::Mine);
        assert_eq!(state.set_stage(Stat::Atk, 4), 4);
        assert_eq!(state.set_stage(Stat::Atk, 4), 2);
        assert_eq!(state.boosts.atk, 6);

        assert_eq!(state.set_stage(Stat::Spe, -8), -6);
        assert_eq!(state.boosts.spe, -6);
    }

    #[test]
    fn test_volatiles() {
        let mut state = CombatantState::new("Test", Side::Mine);

        state.set_volatile(Volatile::Confusion, true);
        state.set_volatile(Volatile::Taunt, true);
        assert!(state.has_volatile(Volatile::Confusion));

        state.set_volatile(Volatile::Confusion, false);
        assert!(!state.has_volatile(Volatile::Confusion));
        assert!(state.has_volatile(Volatile::Taunt));
    }

    #[test]
    fn test_switch_resets_battle_status_only() {
        let mut state = CombatantState::new("Test", Side::Opponent);
        state.on_switch_in();
        state.set_stage(Stat::Atk, 2);
        state.set_volatile(Volatile::Substitute, true);
        state.update_hp(-40.0);
        state.set_status(Some(Status::Paralysis));
        state.record_move("Earthquake");
        state.reveal(Revealed::Item("Choice Scarf".into()));

        state.on_switch_out();
        assert!(!state.active);
        assert!(state.boosts.is_clear());
        assert!(state.volatiles.is_empty());

        state.on_switch_in();
        assert!(state.active);
        assert_eq!(state.hp_percent, 60.0);
        assert_eq!(state.status, Some(Status::Paralysis));
        assert_eq!(state.known_moves, vec!["Earthquake"]);
        assert_eq!(state.item.known().map(String::as_str), Some("Choice Scarf"));
    }

    #[test]
    fn test_record_move() {
        let mut state = CombatantState::new("Test", Side::Opponent);

        state.record_move("Thunderbolt");
        state.record_move("Quick Attack");
        state.record_move("Thunderbolt");

        assert_eq!(state.known_moves, vec!["Thunderbolt", "Quick Attack"]);
    }

    #[test]
    fn test_reveal_beats_predictions() {
        let mut state = CombatantState::new("Test", Side::Opponent);
        state.apply_predictions(Predictions {
            items: vec!["Leftovers".into(), "Choice Band".into()],
            tera_types: vec![Type::Fairy],
            stats: Some(StatBlock::uniform(150)),
            ..Default::default()
        });
        assert_eq!(state.item.best_guess().map(String::as_str), Some("Leftovers"));
        assert_eq!(state.effective_stats(), StatBlock::uniform(150));

        state.reveal(Revealed::Item("Choice Band".into()));
        state.reveal(Revealed::Item("Life Orb".into()));
        assert_eq!(state.item, Fact::Known("Life Orb".to_string()));

        // Fresh predictions never demote a confirmed fact
        state.apply_predictions(Predictions {
            items: vec!["Leftovers".into()],
            ..Default::default()
        });
        assert!(state.item.is_known());
        assert_eq!(state.tera_type, Fact::Unknown);
    }

    #[test]
    fn test_likely_moves() {
        let mut state = CombatantState::new("Test", Side::Opponent);
        state.record_move("Shadow Ball");
        state.predicted_moves = vec![
            "Moonblast".into(),
            "Shadow Ball".into(),
            "Mystical Fire".into(),
            "Protect".into(),
            "Thunderbolt".into(),
            "Dazzling Gleam".into(),
        ];

        let moves = state.likely_moves(5);
        assert_eq!(
            moves,
            vec!["Shadow Ball", "Moonblast", "Mystical Fire", "Protect", "Thunderbolt"]
        );
    }
}
