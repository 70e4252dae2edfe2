//! Records supplied by the external data collaborators

use serde::{Deserialize, Serialize};

use crate::stat::StatBlock;

/// Damage class of a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    /// Parse from a collaborator string ("physical", "Special", ...)
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "physical" => Some(MoveCategory::Physical),
            "special" => Some(MoveCategory::Special),
            "status" => Some(MoveCategory::Status),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveCategory::Physical => "Physical",
            MoveCategory::Special => "Special",
            MoveCategory::Status => "Status",
        }
    }
}

impl std::fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Move metadata as returned by a move lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: MoveCategory,
    pub power: u32,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub accuracy: Option<u32>,
}

impl MoveData {
    /// The record used when a move is not known: a zero-power Normal physical move
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            move_type: "Normal".to_string(),
            category: MoveCategory::Physical,
            power: 0,
            priority: 0,
            accuracy: None,
        }
    }

    /// Zero-power moves never go through the damage calculation
    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }
}

/// Popularity-ranked usage statistics for one species
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageData {
    pub moves: Vec<String>,
    pub items: Vec<String>,
    pub abilities: Vec<String>,
    pub tera_types: Vec<String>,
    /// Spreads in `"Nature:hp/atk/def/spa/spd/spe"` form, most used first
    pub spreads: Vec<String>,
}

impl UsageData {
    pub fn top_spread(&self) -> Option<&str> {
        self.spreads.first().map(String::as_str)
    }
}

/// Species-level data: base stats and typing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub base_stats: StatBlock,
    pub types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_move_is_non_damaging() {
        let data = MoveData::unknown("Mystery Move");
        assert_eq!(data.move_type, "Normal");
        assert_eq!(data.category, MoveCategory::Physical);
        assert!(!data.is_damaging());
    }

    #[test]
    fn test_move_data_from_json() {
        let json = r#"{"name": "Moonblast", "type": "Fairy", "category": "Special", "power": 95, "accuracy": 100}"#;
        let data: MoveData = serde_json::from_str(json).unwrap();
        assert_eq!(data.move_type, "Fairy");
        assert_eq!(data.category, MoveCategory::Special);
        assert_eq!(data.priority, 0);
        assert!(data.is_damaging());
    }

    #[test]
    fn test_category_from_protocol() {
        assert_eq!(MoveCategory::from_protocol("physical"), Some(MoveCategory::Physical));
        assert_eq!(MoveCategory::from_protocol("Status"), Some(MoveCategory::Status));
        assert_eq!(MoveCategory::from_protocol("other"), None);
    }

    #[test]
    fn test_usage_top_spread() {
        let usage = UsageData {
            spreads: vec!["Timid:4/0/0/252/0/252".into(), "Modest:252/0/0/252/4/0".into()],
            ..Default::default()
        };
        assert_eq!(usage.top_spread(), Some("Timid:4/0/0/252/0/252"));
        assert_eq!(UsageData::default().top_spread(), None);
    }
}
