//! BattleState - the whole battle as seen from the user's side

use std::fmt;

use super::config::BattleConfig;
use super::roster::RosterEntry;
use crate::types::{
    CombatantState, FieldState, Side, SideCondition, StatStages, Status, Terrain, Volatile,
    Weather,
};

/// One singles battle tracked from the user's perspective
///
/// The user's roster is created once and never recreated. Opponents are
/// created lazily on first switch-in and reused afterwards. Combatants are
/// never removed; fainting only marks them.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub config: BattleConfig,

    /// Current turn (starts at 1)
    pub turn: u32,

    /// Global and per-side field conditions
    pub field: FieldState,

    // === Combatants ===
    my_roster: Vec<CombatantState>,
    opp_revealed: Vec<CombatantState>,
    my_active: Option<usize>,
    opp_active: Option<usize>,

    // === Team preview ===
    /// Names declared by the opponent in team preview
    pub opp_roster: Vec<String>,

    /// The user's confirmed picks, if any
    selection: Vec<String>,
}

impl BattleState {
    /// Start a battle with the user's roster
    pub fn new(config: BattleConfig, roster: &[RosterEntry]) -> Self {
        let my_roster: Vec<CombatantState> = roster.iter().map(CombatantState::new_mine).collect();
        tracing::info!(members = my_roster.len(), "battle state created");

        Self {
            config,
            turn: 1,
            field: FieldState::new(),
            my_roster,
            opp_revealed: Vec::new(),
            my_active: None,
            opp_active: None,
            opp_roster: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Record the opponent's team preview. Blank and repeated names are
    /// dropped, and the list is capped at the configured team size.
    pub fn set_opponent_roster(&mut self, names: Vec<String>) {
        let mut roster: Vec<String> = Vec::with_capacity(self.config.opponent_team_size);
        for name in names {
            let name = name.trim();
            if name.is_empty() || roster.iter().any(|n| n == name) {
                continue;
            }
            if roster.len() == self.config.opponent_team_size {
                tracing::warn!(
                    limit = self.config.opponent_team_size,
                    name,
                    "team preview longer than expected, ignoring the rest"
                );
                break;
            }
            roster.push(name.to_string());
        }
        self.opp_roster = roster;
    }

    /// Confirm which roster members were brought. The first one leads.
    pub fn set_selection(&mut self, names: Vec<String>) {
        tracing::info!(selection = ?names, "selection confirmed");
        let lead = names.first().cloned();
        self.selection = names;
        if let Some(lead) = lead {
            self.set_active(Side::Mine, &lead);
        }
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    // === Lookup ===

    fn pool(&self, side: Side) -> &[CombatantState] {
        match side {
            Side::Mine => &self.my_roster,
            Side::Opponent => &self.opp_revealed,
        }
    }

    fn pool_mut(&mut self, side: Side) -> &mut Vec<CombatantState> {
        match side {
            Side::Mine => &mut self.my_roster,
            Side::Opponent => &mut self.opp_revealed,
        }
    }

    fn active_index(&self, side: Side) -> Option<usize> {
        match side {
            Side::Mine => self.my_active,
            Side::Opponent => self.opp_active,
        }
    }

    fn index_of(&self, side: Side, name: &str) -> Option<usize> {
        self.pool(side).iter().position(|c| c.name == name)
    }

    /// Every combatant known on a side: the full roster for mine, the revealed
    /// ones for the opponent
    pub fn combatants(&self, side: Side) -> &[CombatantState] {
        self.pool(side)
    }

    /// A combatant by name
    pub fn combatant(&self, side: Side, name: &str) -> Option<&CombatantState> {
        self.pool(side).iter().find(|c| c.name == name)
    }

    pub fn combatant_mut(&mut self, side: Side, name: &str) -> Option<&mut CombatantState> {
        self.pool_mut(side).iter_mut().find(|c| c.name == name)
    }

    /// The active combatant on a side
    pub fn active(&self, side: Side) -> Option<&CombatantState> {
        self.active_index(side).and_then(|i| self.pool(side).get(i))
    }

    pub fn active_mut(&mut self, side: Side) -> Option<&mut CombatantState> {
        let index = self.active_index(side)?;
        self.pool_mut(side).get_mut(index)
    }

    pub fn my_active(&self) -> Option<&CombatantState> {
        self.active(Side::Mine)
    }

    pub fn opp_active(&self) -> Option<&CombatantState> {
        self.active(Side::Opponent)
    }

    // === Transitions ===

    /// Switch `name` in on `side`. Opponents are created on first sight.
    ///
    /// Returns false when `name` is blank or not on the user's roster.
    pub fn set_active(&mut self, side: Side, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!(%side, "blank combatant name, ignoring");
            return false;
        }
        let index = match self.index_of(side, name) {
            Some(index) => index,
            None if side == Side::Opponent => {
                tracing::info!(name, "new opponent revealed");
                self.opp_revealed.push(CombatantState::new_opponent(name));
                self.opp_revealed.len() - 1
            }
            None => {
                tracing::warn!(name, "switch to a combatant not on the roster");
                return false;
            }
        };

        if let Some(previous) = self.active_mut(side) {
            previous.on_switch_out();
        }
        match side {
            Side::Mine => self.my_active = Some(index),
            Side::Opponent => self.opp_active = Some(index),
        }
        if let Some(current) = self.active_mut(side) {
            current.on_switch_in();
        }
        true
    }

    /// Move to the next turn
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        for side in [Side::Mine, Side::Opponent] {
            for combatant in self.pool_mut(side) {
                combatant.item_consumed = false;
            }
        }
        tracing::debug!(turn = self.turn, "turn advanced");
    }

    // === Queries ===

    /// Names of alive roster members that could switch in, restricted to the
    /// confirmed selection when there is one
    pub fn bench_report(&self) -> Vec<&str> {
        if self.selection.is_empty() {
            self.my_roster
                .iter()
                .filter(|c| c.can_switch_to())
                .map(|c| c.name.as_str())
                .collect()
        } else {
            self.selection
                .iter()
                .filter_map(|name| self.my_roster.iter().find(|c| &c.name == name))
                .filter(|c| c.can_switch_to())
                .map(|c| c.name.as_str())
                .collect()
        }
    }

    /// Revealed opponents that haven't fainted
    pub fn revealed_alive(&self) -> Vec<&str> {
        self.opp_revealed
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Opponents brought to battle but not seen yet
    pub fn unrevealed_opponents(&self) -> usize {
        self.config.selection_size.saturating_sub(self.opp_revealed.len())
    }

    /// Declared opponents not yet seen in battle
    pub fn unseen_roster(&self) -> Vec<&str> {
        self.opp_roster
            .iter()
            .filter(|name| self.index_of(Side::Opponent, name).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Structured summary of the current state, once both sides have an
    /// active combatant
    pub fn report(&self) -> Option<StateReport> {
        let me = self.my_active()?;
        let opp = self.opp_active()?;

        Some(StateReport {
            turn: self.turn,
            me: ActiveReport::of(me),
            opponent: ActiveReport::of(opp),
            bench: self.bench_report().into_iter().map(String::from).collect(),
            revealed_alive: self.revealed_alive().into_iter().map(String::from).collect(),
            unrevealed: self.unrevealed_opponents(),
            opp_item: describe_item(opp),
            opp_known_moves: opp.known_moves.clone(),
            opp_likely_moves: opp.likely_moves(REPORT_MOVES).into_iter().map(String::from).collect(),
            weather: self.field.weather,
            terrain: self.field.terrain,
            trick_room: self.field.trick_room,
            my_conditions: self.field.mine.active().collect(),
            opp_conditions: self.field.opponent.active().collect(),
        })
    }
}

/// Opponent moves listed in a report
const REPORT_MOVES: usize = 5;

fn describe_item(combatant: &CombatantState) -> String {
    if let Some(item) = combatant.item.known() {
        return format!("{item} (confirmed)");
    }
    match combatant.item.candidates() {
        [] => "unknown".to_string(),
        candidates => {
            let top: Vec<&str> = candidates.iter().take(2).map(String::as_str).collect();
            format!("{} (predicted)", top.join(" / "))
        }
    }
}

/// One active combatant in a [`StateReport`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveReport {
    pub name: String,
    pub hp_percent: f64,
    pub status: Option<Status>,
    pub boosts: StatStages,
    pub volatiles: Vec<Volatile>,
}

impl ActiveReport {
    fn of(combatant: &CombatantState) -> Self {
        Self {
            name: combatant.name.clone(),
            hp_percent: combatant.hp_percent,
            status: combatant.status,
            boosts: combatant.boosts,
            volatiles: combatant.volatiles.iter().copied().collect(),
        }
    }
}

impl fmt::Display for ActiveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: HP {:.1}% | {}",
            self.name,
            self.hp_percent,
            self.status.map_or("healthy", |s| s.as_str())
        )?;
        if !self.volatiles.is_empty() {
            let names: Vec<&str> = self.volatiles.iter().map(|v| v.as_str()).collect();
            write!(f, " [{}]", names.join(", "))?;
        }
        if !self.boosts.is_clear() {
            write!(
                f,
                " | atk {:+} def {:+} spa {:+} spd {:+} spe {:+}",
                self.boosts.atk, self.boosts.def, self.boosts.spa, self.boosts.spd, self.boosts.spe
            )?;
        }
        Ok(())
    }
}

/// Snapshot of the battle for display or hand-off
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateReport {
    pub turn: u32,
    pub me: ActiveReport,
    pub opponent: ActiveReport,
    pub bench: Vec<String>,
    pub revealed_alive: Vec<String>,
    pub unrevealed: usize,
    pub opp_item: String,
    pub opp_known_moves: Vec<String>,
    /// Known moves, then top predicted ones
    pub opp_likely_moves: Vec<String>,
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub trick_room: bool,
    pub my_conditions: Vec<SideCondition>,
    pub opp_conditions: Vec<SideCondition>,
}

fn join_conditions(conditions: &[SideCondition]) -> String {
    let names: Vec<&str> = conditions.iter().map(|c| c.as_str()).collect();
    names.join(", ")
}

impl fmt::Display for StateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Turn {}]", self.turn)?;
        writeln!(f, "Me {}", self.me)?;
        if self.bench.is_empty() {
            writeln!(f, "  bench: none (last one)")?;
        } else {
            writeln!(f, "  bench: {}", self.bench.join(", "))?;
        }
        writeln!(f, "Opponent {}", self.opponent)?;
        writeln!(
            f,
            "  party: alive [{}] / unrevealed {}",
            self.revealed_alive.join(", "),
            self.unrevealed
        )?;
        writeln!(
            f,
            "  item: {} / moves: {}",
            self.opp_item,
            self.opp_known_moves.join(", ")
        )?;
        if self.opp_likely_moves.len() > self.opp_known_moves.len() {
            writeln!(f, "  likely moves: {}", self.opp_likely_moves.join(", "))?;
        }
        writeln!(
            f,
            "Field: weather {} / terrain {} / trick room {}",
            self.weather.map_or("none", |w| w.as_str()),
            self.terrain.map_or("none", |t| t.as_str()),
            if self.trick_room { "on" } else { "off" }
        )?;
        write!(
            f,
            "Sides: me [{}] vs opponent [{}]",
            join_conditions(&self.my_conditions),
            join_conditions(&self.opp_conditions)
        )
    }
}
