//! Field and side conditions

/// Weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Snow,
}

impl Weather {
    /// Parse from a narrated weather name
    pub fn from_protocol(s: &str) -> Option<Self> {
        // Normalize: lowercase and remove spaces
        let normalized = s.to_lowercase().replace([' ', '-', '_'], "");

        match normalized.as_str() {
            "sunnyday" | "sun" | "harshsunlight" | "sunny" => Some(Weather::Sun),
            "raindance" | "rain" => Some(Weather::Rain),
            "sandstorm" | "sand" => Some(Weather::Sand),
            "snow" | "snowscape" | "hail" => Some(Weather::Snow),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Snow => "Snow",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terrain conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    /// Parse from a narrated terrain name
    pub fn from_protocol(s: &str) -> Option<Self> {
        // Strip common prefixes
        let clean = s.strip_prefix("move: ").unwrap_or(s);

        // Normalize
        let normalized = clean.to_lowercase().replace([' ', '-', '_'], "");

        match normalized.as_str() {
            "electricterrain" | "electric" => Some(Terrain::Electric),
            "grassyterrain" | "grassy" => Some(Terrain::Grassy),
            "mistyterrain" | "misty" => Some(Terrain::Misty),
            "psychicterrain" | "psychic" => Some(Terrain::Psychic),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Misty => "Misty Terrain",
            Terrain::Psychic => "Psychic Terrain",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side conditions tracked per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideCondition {
    Tailwind,
    Reflect,
    LightScreen,
    StealthRock,
}

impl SideCondition {
    pub const ALL: [SideCondition; 4] = [
        SideCondition::Tailwind,
        SideCondition::Reflect,
        SideCondition::LightScreen,
        SideCondition::StealthRock,
    ];

    /// Parse from a narrated condition name
    pub fn from_protocol(s: &str) -> Option<Self> {
        let clean = s.strip_prefix("move: ").unwrap_or(s);
        let normalized = clean.to_lowercase().replace([' ', '-', '_'], "");

        match normalized.as_str() {
            "tailwind" => Some(SideCondition::Tailwind),
            "reflect" => Some(SideCondition::Reflect),
            "lightscreen" => Some(SideCondition::LightScreen),
            "stealthrock" => Some(SideCondition::StealthRock),
            _ => None,
        }
    }

    /// Check if this is a screen
    pub fn is_screen(&self) -> bool {
        matches!(self, SideCondition::Reflect | SideCondition::LightScreen)
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            SideCondition::Tailwind => "Tailwind",
            SideCondition::Reflect => "Reflect",
            SideCondition::LightScreen => "Light Screen",
            SideCondition::StealthRock => "Stealth Rock",
        }
    }
}

impl std::fmt::Display for SideCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_from_protocol() {
        assert_eq!(Weather::from_protocol("SunnyDay"), Some(Weather::Sun));
        assert_eq!(Weather::from_protocol("Rain"), Some(Weather::Rain));
        assert_eq!(Weather::from_protocol("Sandstorm"), Some(Weather::Sand));
        assert_eq!(Weather::from_protocol("Snow"), Some(Weather::Snow));
        assert_eq!(Weather::from_protocol("hail"), Some(Weather::Snow));
        assert_eq!(Weather::from_protocol("none"), None);
        assert_eq!(Weather::from_protocol("fog"), None);
    }

    #[test]
    fn test_terrain_from_protocol() {
        assert_eq!(
            Terrain::from_protocol("Electric Terrain"),
            Some(Terrain::Electric)
        );
        assert_eq!(
            Terrain::from_protocol("move: Grassy Terrain"),
            Some(Terrain::Grassy)
        );
        assert_eq!(Terrain::from_protocol("Misty"), Some(Terrain::Misty));
        assert_eq!(
            Terrain::from_protocol("psychicterrain"),
            Some(Terrain::Psychic)
        );
        assert_eq!(Terrain::from_protocol("none"), None);
    }

    #[test]
    fn test_side_condition_from_protocol() {
        assert_eq!(
            SideCondition::from_protocol("Stealth Rock"),
            Some(SideCondition::StealthRock)
        );
        assert_eq!(
            SideCondition::from_protocol("move: Reflect"),
            Some(SideCondition::Reflect)
        );
        assert_eq!(
            SideCondition::from_protocol("light_screen"),
            Some(SideCondition::LightScreen)
        );
        assert_eq!(SideCondition::from_protocol("Spikes"), None);
    }

    #[test]
    fn test_side_condition_is_screen() {
        assert!(SideCondition::Reflect.is_screen());
        assert!(SideCondition::LightScreen.is_screen());
        assert!(!SideCondition::Tailwind.is_screen());
        assert!(!SideCondition::StealthRock.is_screen());
    }
}
