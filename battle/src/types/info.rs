//! Confirmed-versus-predicted knowledge about a combatant

/// One fact about a combatant: observed, statistically predicted, or unknown.
///
/// Confirmation is one-way. Once a fact is [`Fact::Known`], new predictions are
/// ignored; only a later reveal may replace the value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fact<T> {
    Known(T),
    /// Ranked candidates, most likely first
    Predicted(Vec<T>),
    Unknown,
}

impl<T> Default for Fact<T> {
    fn default() -> Self {
        Fact::Unknown
    }
}

impl<T> Fact<T> {
    /// Build from an optional confirmed value
    pub fn from_known(value: Option<T>) -> Self {
        value.map_or(Fact::Unknown, Fact::Known)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Fact::Known(_))
    }

    /// The confirmed value, if any
    pub fn known(&self) -> Option<&T> {
        match self {
            Fact::Known(value) => Some(value),
            _ => None,
        }
    }

    /// The confirmed value, or the top prediction
    pub fn best_guess(&self) -> Option<&T> {
        match self {
            Fact::Known(value) => Some(value),
            Fact::Predicted(candidates) => candidates.first(),
            Fact::Unknown => None,
        }
    }

    /// Ranked predictions (empty when known or unknown)
    pub fn candidates(&self) -> &[T] {
        match self {
            Fact::Predicted(candidates) => candidates,
            _ => &[],
        }
    }

    /// Confirm a value, overwriting any previous one
    pub fn reveal(&mut self, value: T) {
        *self = Fact::Known(value);
    }

    /// Record predictions. Ignored once the fact is known; returns whether applied.
    pub fn predict(&mut self, candidates: Vec<T>) -> bool {
        if self.is_known() {
            return false;
        }
        *self = if candidates.is_empty() {
            Fact::Unknown
        } else {
            Fact::Predicted(candidates)
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        let fact: Fact<String> = Fact::default();
        assert_eq!(fact, Fact::Unknown);
        assert!(fact.best_guess().is_none());
        assert!(fact.candidates().is_empty());
    }

    #[test]
    fn test_predictions() {
        let mut fact = Fact::Unknown;
        assert!(fact.predict(vec!["Choice Specs", "Booster Energy"]));
        assert!(!fact.is_known());
        assert_eq!(fact.best_guess(), Some(&"Choice Specs"));
        assert_eq!(fact.candidates().len(), 2);
        assert!(fact.known().is_none());

        assert!(fact.predict(vec![]));
        assert_eq!(fact, Fact::Unknown);
    }

    #[test]
    fn test_reveal_is_monotone() {
        let mut fact = Fact::Predicted(vec!["Leftovers"]);
        fact.reveal("Choice Scarf");
        assert_eq!(fact.known(), Some(&"Choice Scarf"));

        // Predictions can no longer demote it
        assert!(!fact.predict(vec!["Leftovers"]));
        assert_eq!(fact, Fact::Known("Choice Scarf"));

        // A second reveal keeps it known with the latest value
        fact.reveal("Life Orb");
        assert_eq!(fact, Fact::Known("Life Orb"));
        assert!(fact.candidates().is_empty());
    }

    #[test]
    fn test_from_known() {
        assert_eq!(Fact::from_known(Some(3)), Fact::Known(3));
        assert_eq!(Fact::<i32>::from_known(None), Fact::Unknown);
    }
}
