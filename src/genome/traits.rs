//! A single genetic trait

use super::fingerprint::gene_sequence;
use super::{Rarity, TraitCategory};

/// One categorical attribute of an identity.
///
/// The gene sequence is derived from `(category, value)` at construction and
/// cannot drift from them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trait {
    category: TraitCategory,
    value: String,
    rarity: Rarity,
    gene_sequence: String,
}

impl Trait {
    pub fn new(category: TraitCategory, value: impl Into<String>, rarity: Rarity) -> Self {
        let value = value.into();
        let gene_sequence = gene_sequence(category, &value);
        Self {
            category,
            value,
            rarity,
            gene_sequence,
        }
    }

    pub fn category(&self) -> TraitCategory {
        self.category
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn gene_sequence(&self) -> &str {
        &self.gene_sequence
    }

    /// Same value and tier, ignoring how the trait was produced
    pub fn same_as(&self, other: &Trait) -> bool {
        self.category == other.category && self.value == other.value && self.rarity == other.rarity
    }
}
