//! The structured update event applied to a battle once per narrated action
//!
//! Every field is optional. An absent, `null`, blank or malformed field means
//! "nothing changed", never "reset". Only a document that is not a JSON object
//! is rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stat::Stat;
use crate::ParseError;

/// Signed stage deltas for the five stageable stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankChange {
    #[serde(deserialize_with = "lenient::stage")]
    pub atk: i8,
    #[serde(deserialize_with = "lenient::stage")]
    pub def: i8,
    #[serde(deserialize_with = "lenient::stage")]
    pub spa: i8,
    #[serde(deserialize_with = "lenient::stage")]
    pub spd: i8,
    #[serde(deserialize_with = "lenient::stage")]
    pub spe: i8,
}

impl RankChange {
    /// Non-zero deltas in canonical stat order
    pub fn deltas(&self) -> impl Iterator<Item = (Stat, i8)> + '_ {
        Stat::ALL
            .into_iter()
            .map(|stat| (stat, self.get(stat)))
            .filter(|(_, delta)| *delta != 0)
    }

    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.deltas().next().is_none()
    }
}

/// One structured battle update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleUpdate {
    // === Switches ===
    #[serde(deserialize_with = "lenient::text")]
    pub my_switch: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub opp_switch: Option<String>,

    // === Moves ===
    #[serde(deserialize_with = "lenient::text")]
    pub my_move_used: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub opp_move_used: Option<String>,

    // === HP (percent deltas, negative = damage) ===
    #[serde(deserialize_with = "lenient::number")]
    pub my_hp_change_input: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub opp_hp_change_input: Option<f64>,

    // === Status ("none" clears) ===
    #[serde(deserialize_with = "lenient::text")]
    pub my_status_change: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub opp_status_change: Option<String>,

    // === Stages ===
    #[serde(deserialize_with = "lenient::rank_change")]
    pub my_rank_change: Option<RankChange>,
    #[serde(deserialize_with = "lenient::rank_change")]
    pub opp_rank_change: Option<RankChange>,

    // === Volatile conditions (name -> started or ended) ===
    #[serde(deserialize_with = "lenient::volatiles")]
    pub my_volatile_change: Option<BTreeMap<String, bool>>,
    #[serde(deserialize_with = "lenient::volatiles")]
    pub opp_volatile_change: Option<BTreeMap<String, bool>>,

    // === Field ("none" clears weather / terrain) ===
    #[serde(deserialize_with = "lenient::text")]
    pub weather: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub terrain: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub trick_room: Option<bool>,

    // === Side conditions ===
    #[serde(deserialize_with = "lenient::flag")]
    pub my_tailwind: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub opp_tailwind: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub my_reflect: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub opp_reflect: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub my_light_screen: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub opp_light_screen: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub my_stealth_rock: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub opp_stealth_rock: Option<bool>,

    // === Revealed opponent information ===
    #[serde(deserialize_with = "lenient::text")]
    pub opp_item: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub opp_ability: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub opp_tera_type: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub my_terastallized: Option<bool>,

    // === Item consumption this turn ===
    #[serde(deserialize_with = "lenient::flag")]
    pub my_item_consumed: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub opp_item_consumed: Option<bool>,

    #[serde(deserialize_with = "lenient::flag_or_false")]
    pub turn_end: bool,
}

impl BattleUpdate {
    /// Decode an update event from JSON
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether either side switched in this update
    pub fn has_switch(&self) -> bool {
        self.my_switch.is_some() || self.opp_switch.is_some()
    }
}

/// Field decoders that turn malformed values into "nothing changed"
mod lenient {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::RankChange;

    /// A non-blank string, trimmed
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
    }

    /// A finite number, also accepted as a numeric string
    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(value.filter(|v| v.is_finite()))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            _ => None,
        })
    }

    pub fn flag_or_false<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(flag(d)?.unwrap_or(false))
    }

    /// A stage delta saturated into `i8`. Non-numeric values are 0.
    pub fn stage<'de, D: Deserializer<'de>>(d: D) -> Result<i8, D::Error> {
        let delta = match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|v| v as i64)).unwrap_or(0),
            _ => 0,
        };
        Ok(delta.clamp(i64::from(i8::MIN), i64::from(i8::MAX)) as i8)
    }

    pub fn rank_change<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RankChange>, D::Error> {
        Ok(match Value::deserialize(d)? {
            value @ Value::Object(_) => RankChange::deserialize(value).ok(),
            _ => None,
        })
    }

    /// Entries with a non-blank name and a boolean value
    pub fn volatiles<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<BTreeMap<String, bool>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(map) => Some(
                map.into_iter()
                    .filter_map(|(name, active)| match active {
                        Value::Bool(active) if !name.trim().is_empty() => Some((name, active)),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_partial_event() {
        let json = r#"{
            "opp_switch": "Flutter Mane",
            "opp_hp_change_input": -35.5,
            "opp_rank_change": {"spa": 1},
            "weather": null,
            "turn_end": true
        }"#;
        let update = BattleUpdate::from_json(json).unwrap();

        assert_eq!(update.opp_switch.as_deref(), Some("Flutter Mane"));
        assert_eq!(update.opp_hp_change_input, Some(-35.5));
        assert_eq!(update.opp_rank_change.unwrap().spa, 1);
        assert_eq!(update.opp_rank_change.unwrap().atk, 0);
        assert!(update.weather.is_none());
        assert!(update.my_switch.is_none());
        assert!(update.turn_end);
        assert!(update.has_switch());
    }

    #[test]
    fn test_decode_volatile_changes() {
        let json = r#"{"opp_volatile_change": {"confusion": true, "taunt": false}}"#;
        let update = BattleUpdate::from_json(json).unwrap();

        let changes = update.opp_volatile_change.unwrap();
        assert_eq!(changes.get("confusion"), Some(&true));
        assert_eq!(changes.get("taunt"), Some(&false));
        assert!(update.my_volatile_change.is_none());
    }

    #[test]
    fn test_decode_empty_event() {
        let update = BattleUpdate::from_json("{}").unwrap();
        assert_eq!(update, BattleUpdate::default());
        assert!(!update.turn_end);
    }

    #[test]
    fn test_decode_unknown_fields_ignored() {
        let update = BattleUpdate::from_json(r#"{"commentary": "wow", "trick_room": true}"#).unwrap();
        assert_eq!(update.trick_room, Some(true));
    }

    #[test]
    fn test_out_of_range_stage_saturates() {
        let json = r#"{"opp_hp_change_input": -40, "opp_rank_change": {"atk": 200, "def": -300, "spe": 1.0}, "turn_end": true}"#;
        let update = BattleUpdate::from_json(json).unwrap();

        let change = update.opp_rank_change.unwrap();
        assert_eq!(change.atk, i8::MAX);
        assert_eq!(change.def, i8::MIN);
        assert_eq!(change.spe, 1);
        assert_eq!(update.opp_hp_change_input, Some(-40.0));
        assert!(update.turn_end);
    }

    #[test]
    fn test_malformed_fields_become_absent() {
        let json = r#"{
            "opp_hp_change_input": "-40",
            "my_hp_change_input": "lots",
            "trick_room": "yes",
            "opp_switch": 7,
            "my_rank_change": [1, 2],
            "opp_volatile_change": {"taunt": true, "confusion": "maybe", " ": true},
            "opp_item": "   ",
            "opp_ability": "  Intimidate ",
            "turn_end": true
        }"#;
        let update = BattleUpdate::from_json(json).unwrap();

        assert_eq!(update.opp_hp_change_input, Some(-40.0));
        assert!(update.my_hp_change_input.is_none());
        assert!(update.trick_room.is_none());
        assert!(update.opp_switch.is_none());
        assert!(update.my_rank_change.is_none());
        assert!(update.opp_item.is_none());
        assert_eq!(update.opp_ability.as_deref(), Some("Intimidate"));
        assert!(update.turn_end);

        let volatiles = update.opp_volatile_change.unwrap();
        assert_eq!(volatiles.len(), 1);
        assert_eq!(volatiles.get("taunt"), Some(&true));
    }

    #[test]
    fn test_blank_strings_decode_as_absent() {
        let json = r#"{"opp_switch": "", "opp_item": "", "opp_move_used": "", "weather": " "}"#;
        let update = BattleUpdate::from_json(json).unwrap();
        assert_eq!(update, BattleUpdate::default());
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = BattleUpdate::from_json("{not json");
        assert!(matches!(result, Err(ParseError::Json(_))));
        assert!(matches!(BattleUpdate::from_json("[1, 2]"), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_rank_change_deltas() {
        let change = RankChange {
            atk: 2,
            spe: -1,
            ..Default::default()
        };
        let deltas: Vec<_> = change.deltas().collect();
        assert_eq!(deltas, vec![(Stat::Atk, 2), (Stat::Spe, -1)]);
        assert!(!change.is_empty());
        assert!(RankChange::default().is_empty());
    }
}
