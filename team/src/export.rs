//! Showdown-style team export parsing
//!
//! ```text
//! Roaring Moon @ Booster Energy
//! Ability: Protosynthesis
//! Tera Type: Flying
//! EVs: 4 HP / 252 Atk / 252 Spe
//! Jolly Nature
//! - Dragon Dance
//! - Acrobatics
//! ```
//!
//! Members are separated by blank lines.

use serde::{Deserialize, Serialize};
use tera_protocol::StatBlock;

use crate::nature::Nature;
use crate::spread::{calc_stats, MAX_IV};
use crate::TeamError;

/// One member of a parsed team export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Species name (nickname and gender markers stripped)
    pub name: String,
    pub item: Option<String>,
    pub ability: Option<String>,
    pub tera_type: Option<String>,
    pub nature: Nature,
    pub evs: StatBlock,
    pub ivs: StatBlock,
    pub moves: Vec<String>,
}

impl TeamMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: None,
            ability: None,
            tera_type: None,
            nature: Nature::default(),
            evs: StatBlock::default(),
            ivs: StatBlock::uniform(MAX_IV),
            moves: Vec::new(),
        }
    }

    /// Actual stats for this member given its species' base stats
    pub fn stats(&self, base: &StatBlock, level: u32) -> StatBlock {
        calc_stats(base, &self.ivs, &self.evs, self.nature, level)
    }
}

/// Parse a full team export
pub fn parse_team(text: &str) -> Result<Vec<TeamMember>, TeamError> {
    let mut members = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !block.is_empty() {
                members.push(parse_member(&block)?);
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    if !block.is_empty() {
        members.push(parse_member(&block)?);
    }

    if members.is_empty() {
        return Err(TeamError::EmptyTeam);
    }
    Ok(members)
}

fn parse_member(lines: &[&str]) -> Result<TeamMember, TeamError> {
    let (name, item) = parse_header(lines[0]);
    let mut member = TeamMember::new(name);
    member.item = item;

    for line in &lines[1..] {
        if let Some(ability) = line.strip_prefix("Ability:") {
            member.ability = Some(ability.trim().to_string());
        } else if let Some(tera) = line.strip_prefix("Tera Type:") {
            member.tera_type = Some(tera.trim().to_string());
        } else if let Some(evs) = line.strip_prefix("EVs:") {
            member.evs = parse_stat_line(evs, StatBlock::default())?;
        } else if let Some(ivs) = line.strip_prefix("IVs:") {
            member.ivs = parse_stat_line(ivs, StatBlock::uniform(MAX_IV))?;
        } else if let Some(nature) = line.strip_suffix(" Nature") {
            member.nature =
                Nature::from_name(nature).ok_or_else(|| TeamError::UnknownNature(nature.to_string()))?;
        } else if let Some(move_name) = line.strip_prefix("- ") {
            member.moves.push(move_name.trim().to_string());
        } else {
            tracing::debug!(line = %line, "ignoring team export line");
        }
    }

    Ok(member)
}

/// "Nickname (Species) (M) @ Item" -> ("Species", Some("Item"))
fn parse_header(line: &str) -> (String, Option<String>) {
    let (name_part, item) = match line.split_once('@') {
        Some((name, item)) => (name.trim(), Some(item.trim().to_string())),
        None => (line.trim(), None),
    };

    let name_part = name_part
        .strip_suffix("(M)")
        .or_else(|| name_part.strip_suffix("(F)"))
        .unwrap_or(name_part)
        .trim();

    // Nicknamed: the species is in the trailing parentheses
    let name = match (name_part.rfind(" ("), name_part.strip_suffix(')')) {
        (Some(open), Some(_)) => &name_part[open + 2..name_part.len() - 1],
        _ => name_part,
    };

    (name.to_string(), item.filter(|i| !i.is_empty()))
}

/// "252 HP / 4 Atk / 252 Spe", starting from `defaults`
fn parse_stat_line(line: &str, defaults: StatBlock) -> Result<StatBlock, TeamError> {
    let mut stats = defaults;

    for part in line.split('/').map(str::trim).filter(|p| !p.is_empty()) {
        let (value, label) = part
            .split_once(' ')
            .ok_or_else(|| TeamError::InvalidStatLine(part.to_string()))?;
        let value: u32 = value
            .parse()
            .map_err(|_| TeamError::InvalidStatLine(part.to_string()))?;

        match label.trim() {
            "HP" => stats.hp = value,
            "Atk" => stats.atk = value,
            "Def" => stats.def = value,
            "SpA" => stats.spa = value,
            "SpD" => stats.spd = value,
            "Spe" => stats.spe = value,
            _ => return Err(TeamError::InvalidStatLine(part.to_string())),
        }
    }

    Ok(stats)
}
