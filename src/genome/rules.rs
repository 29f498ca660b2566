//! BreedingRules — the tunable probabilities of the genetics engine
//!
//! Rarity boundaries are not in here: they are a versioned constant of the
//! roller. Everything else the engine rolls against lives in this struct so it
//! can be loaded from a JSON file and swapped for tests.

use crate::error::{check_probability, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingRules {
    /// Chance per category that a fresh identity receives a gen-locked value
    pub fresh_locked_chance: f64,
    /// Chance per category that a child receives a gen-locked value
    pub child_locked_chance: f64,
    /// Chance per category that a child keeps its parent's trait
    pub inherit_chance: f64,
    /// Chance that a mutation keeps the trait's tier
    pub keep_tier_chance: f64,
    /// Per-trait mutation probability used when a caller gives none
    pub default_mutation_rate: f64,
    /// Per-trait evolution probability used when a caller gives none
    pub default_evolution_strength: f64,
}

impl Default for BreedingRules {
    fn default() -> Self {
        Self {
            fresh_locked_chance: 0.05,
            child_locked_chance: 0.03,
            inherit_chance: 0.5,
            keep_tier_chance: 0.7,
            default_mutation_rate: 0.3,
            default_evolution_strength: 0.1,
        }
    }
}

impl BreedingRules {
    /// Children resemble parents closely and drift slowly
    pub fn stable() -> Self {
        Self {
            inherit_chance: 0.8,
            keep_tier_chance: 0.9,
            default_mutation_rate: 0.1,
            default_evolution_strength: 0.05,
            ..Self::default()
        }
    }

    /// Heavy churn: little inheritance, frequent tier shifts
    pub fn volatile() -> Self {
        Self {
            inherit_chance: 0.2,
            keep_tier_chance: 0.4,
            default_mutation_rate: 0.6,
            default_evolution_strength: 0.3,
            ..Self::default()
        }
    }

    /// Every field must be a probability
    pub fn validate(&self) -> Result<()> {
        check_probability("fresh_locked_chance", self.fresh_locked_chance)?;
        check_probability("child_locked_chance", self.child_locked_chance)?;
        check_probability("inherit_chance", self.inherit_chance)?;
        check_probability("keep_tier_chance", self.keep_tier_chance)?;
        check_probability("default_mutation_rate", self.default_mutation_rate)?;
        check_probability("default_evolution_strength", self.default_evolution_strength)?;
        Ok(())
    }

    /// Load rules from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let rules: Self = serde_json::from_str(&json)?;
        rules.validate()?;
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainError, GeneticsError};

    #[test]
    fn test_presets_valid() {
        assert!(BreedingRules::default().validate().is_ok());
        assert!(BreedingRules::stable().validate().is_ok());
        assert!(BreedingRules::volatile().validate().is_ok());
        assert!(BreedingRules::stable().inherit_chance > BreedingRules::volatile().inherit_chance);
    }

    #[test]
    fn test_invalid_rules() {
        let rules = BreedingRules {
            inherit_chance: 1.2,
            ..BreedingRules::default()
        };
        assert_eq!(
            rules.validate(),
            Err(GeneticsError::Domain(DomainError::ProbabilityOutOfRange {
                name: "inherit_chance",
                value: 1.2
            }))
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules: BreedingRules = serde_json::from_str(r#"{"inherit_chance": 0.9}"#).unwrap();
        assert_eq!(rules.inherit_chance, 0.9);
        assert_eq!(rules.child_locked_chance, 0.03);
    }
}
