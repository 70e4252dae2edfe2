//! Status conditions (volatile and non-volatile)

/// Non-volatile status conditions (persist through switching)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    BadPoison, // Toxic
    Sleep,
}

impl Status {
    /// Parse from a status code ("brn", "par", ...) or name ("Burn", "Paralysis", ...)
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "brn" | "burn" | "burned" => Some(Status::Burn),
            "frz" | "freeze" | "frozen" => Some(Status::Freeze),
            "par" | "paralysis" | "paralyzed" => Some(Status::Paralysis),
            "psn" | "poison" | "poisoned" => Some(Status::Poison),
            "tox" | "toxic" | "badpoison" | "badly poisoned" => Some(Status::BadPoison),
            "slp" | "sleep" | "asleep" => Some(Status::Sleep),
            _ => None,
        }
    }

    /// Convert to the short status code
    pub fn to_protocol(&self) -> &'static str {
        match self {
            Status::Burn => "brn",
            Status::Freeze => "frz",
            Status::Paralysis => "par",
            Status::Poison => "psn",
            Status::BadPoison => "tox",
            Status::Sleep => "slp",
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Burn => "Burn",
            Status::Freeze => "Freeze",
            Status::Paralysis => "Paralysis",
            Status::Poison => "Poison",
            Status::BadPoison => "Toxic",
            Status::Sleep => "Sleep",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Volatile conditions (cleared on switching out)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Volatile {
    Taunt,
    Trapped,
    Confusion,
    Substitute,
    Encore,
    LeechSeed,
}

impl Volatile {
    /// Parse from a narrated condition name
    pub fn from_protocol(s: &str) -> Option<Self> {
        let clean = s.strip_prefix("move: ").unwrap_or(s);
        let normalized = clean.to_lowercase().replace([' ', '-', '_'], "");

        match normalized.as_str() {
            "taunt" => Some(Volatile::Taunt),
            "trapped" | "meanlook" | "block" => Some(Volatile::Trapped),
            "confusion" | "confused" => Some(Volatile::Confusion),
            "substitute" => Some(Volatile::Substitute),
            "encore" => Some(Volatile::Encore),
            "leechseed" => Some(Volatile::LeechSeed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Volatile::Taunt => "taunt",
            Volatile::Trapped => "trapped",
            Volatile::Confusion => "confusion",
            Volatile::Substitute => "substitute",
            Volatile::Encore => "encore",
            Volatile::LeechSeed => "leech_seed",
        }
    }
}

impl std::fmt::Display for Volatile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_protocol() {
        assert_eq!(Status::from_protocol("brn"), Some(Status::Burn));
        assert_eq!(Status::from_protocol("Burn"), Some(Status::Burn));
        assert_eq!(Status::from_protocol("Paralysis"), Some(Status::Paralysis));
        assert_eq!(Status::from_protocol("tox"), Some(Status::BadPoison));
        assert_eq!(Status::from_protocol("Sleep"), Some(Status::Sleep));
        assert_eq!(Status::from_protocol("healthy"), None);
    }

    #[test]
    fn test_status_round_trip_codes() {
        for status in [
            Status::Burn,
            Status::Freeze,
            Status::Paralysis,
            Status::Poison,
            Status::BadPoison,
            Status::Sleep,
        ] {
            assert_eq!(Status::from_protocol(status.to_protocol()), Some(status));
        }
    }

    #[test]
    fn test_volatile_from_protocol() {
        assert_eq!(Volatile::from_protocol("Taunt"), Some(Volatile::Taunt));
        assert_eq!(Volatile::from_protocol("move: Leech Seed"), Some(Volatile::LeechSeed));
        assert_eq!(Volatile::from_protocol("leech_seed"), Some(Volatile::LeechSeed));
        assert_eq!(Volatile::from_protocol("Perish Song"), None);
    }
}
