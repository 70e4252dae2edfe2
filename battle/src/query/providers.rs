//! Lookup collaborators consulted before snapshots are built
//!
//! The engine never calls out on its own. A caller supplies these providers to
//! a [`Session`](super::Session), which consults them when a move needs
//! metadata or a new opponent appears.

use std::collections::HashMap;

use tera_protocol::{MoveData, ParseError, SpeciesData, UsageData};

/// Move metadata by name
pub trait MoveProvider {
    fn move_data(&self, name: &str) -> Option<MoveData>;

    /// Metadata, or a zero-power Normal move when unknown
    fn move_or_default(&self, name: &str) -> MoveData {
        self.move_data(name).unwrap_or_else(|| {
            tracing::debug!(name, "no move data, using default");
            MoveData::unknown(name)
        })
    }
}

/// Usage statistics by species name
pub trait UsageProvider {
    fn usage(&self, name: &str) -> Option<UsageData>;
}

/// Base stats and typing by species name
pub trait SpeciesProvider {
    fn species(&self, name: &str) -> Option<SpeciesData>;
}

/// Canonical lookup key: case and separators ignored
fn key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! table {
    ($(#[$meta:meta])* $name:ident, $record:ty, $provider:ident, $method:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            entries: HashMap<String, $record>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn insert(&mut self, name: &str, record: $record) {
                self.entries.insert(key(name), record);
            }

            pub fn len(&self) -> usize {
                self.entries.len()
            }

            pub fn is_empty(&self) -> bool {
                self.entries.is_empty()
            }

            /// Load from a JSON object keyed by name
            pub fn from_json(json: &str) -> Result<Self, ParseError> {
                let raw: HashMap<String, $record> = serde_json::from_str(json)?;
                let mut table = Self::new();
                for (name, record) in raw {
                    table.insert(&name, record);
                }
                Ok(table)
            }
        }

        impl $provider for $name {
            fn $method(&self, name: &str) -> Option<$record> {
                self.entries.get(&key(name)).cloned()
            }
        }
    };
}

table!(
    /// In-memory move metadata
    MoveTable, MoveData, MoveProvider, move_data
);
table!(
    /// In-memory usage statistics
    UsageTable, UsageData, UsageProvider, usage
);
table!(
    /// In-memory species data
    SpeciesTable, SpeciesData, SpeciesProvider, species
);

#[cfg(test)]
mod tests {
    use super::*;
    use tera_protocol::{MoveCategory, StatBlock};

    #[test]
    fn test_key_normalization() {
        assert_eq!(key("Flutter Mane"), "fluttermane");
        assert_eq!(key("flutter-mane"), "fluttermane");
        assert_eq!(key("U-turn"), "uturn");
    }

    #[test]
    fn test_move_table_lookup() {
        let mut moves = MoveTable::new();
        moves.insert(
            "Shadow Ball",
            MoveData {
                name: "Shadow Ball".into(),
                move_type: "Ghost".into(),
                category: MoveCategory::Special,
                power: 80,
                priority: 0,
                accuracy: Some(100),
            },
        );

        assert_eq!(moves.move_data("shadow-ball").map(|m| m.power), Some(80));
        assert!(moves.move_data("Moonblast").is_none());

        let fallback = moves.move_or_default("Moonblast");
        assert_eq!(fallback.power, 0);
        assert_eq!(fallback.move_type, "Normal");
    }

    #[test]
    fn test_species_from_json() {
        let json = r#"{
            "Flutter Mane": {
                "base_stats": {"hp": 55, "atk": 55, "def": 55, "spa": 135, "spd": 135, "spe": 135},
                "types": ["Ghost", "Fairy"]
            }
        }"#;
        let table = SpeciesTable::from_json(json).unwrap();
        assert_eq!(table.len(), 1);

        let species = table.species("flutter mane").unwrap();
        assert_eq!(species.base_stats, StatBlock::new(55, 55, 55, 135, 135, 135));
        assert_eq!(species.types, vec!["Ghost", "Fairy"]);
    }

    #[test]
    fn test_usage_from_invalid_json() {
        assert!(matches!(UsageTable::from_json("[1, 2]"), Err(ParseError::Json(_))));
    }
}
