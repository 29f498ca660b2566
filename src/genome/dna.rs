//! MonkeyDna — the complete genetic identity of one monkey
//!
//! An identity is immutable value data. It is assembled through `DnaBuilder`:
//! traits first, then `build()` validates completeness and attaches the
//! fingerprint. Breeding and evolution always produce a new identity.

use super::fingerprint::fingerprint;
use super::{Rarity, Trait, TraitCategory};
use crate::error::{check_generation, Result, SchemaError};
use chrono::Utc;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct MonkeyDna {
    generation: u32,
    parent_fingerprint: Option<String>,
    traits: BTreeMap<TraitCategory, Trait>,
    mutation_count: u32,
    birth_timestamp: i64,
    fingerprint: String,
}

/// A category whose value or tier differs between two identities
#[derive(Debug, Clone, PartialEq)]
pub struct TraitChange {
    pub category: TraitCategory,
    pub before: Trait,
    pub after: Trait,
}

impl TraitChange {
    pub fn rarity_shift(&self) -> i8 {
        self.after.rarity() as i8 - self.before.rarity() as i8
    }
}

impl MonkeyDna {
    pub fn builder(generation: u32) -> DnaBuilder {
        DnaBuilder::new(generation)
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn parent_fingerprint(&self) -> Option<&str> {
        self.parent_fingerprint.as_deref()
    }

    pub fn is_founder(&self) -> bool {
        self.parent_fingerprint.is_none()
    }

    pub fn mutation_count(&self) -> u32 {
        self.mutation_count
    }

    pub fn birth_timestamp(&self) -> i64 {
        self.birth_timestamp
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Traits in catalog order
    pub fn traits(&self) -> impl Iterator<Item = &Trait> {
        self.traits.values()
    }

    pub fn get(&self, category: TraitCategory) -> Option<&Trait> {
        self.traits.get(&category)
    }

    /// The trait for `category`, or a schema error if the identity lacks it
    pub fn require(&self, category: TraitCategory) -> Result<&Trait> {
        self.traits
            .get(&category)
            .ok_or_else(|| SchemaError::MissingCategory(category.to_string()).into())
    }

    /// Overall rarity in [0, 100]; 0 when there are no traits
    pub fn rarity_score(&self) -> f64 {
        let max_possible = self.traits.len() as u32 * Rarity::Legendary.weight();
        if max_possible == 0 {
            return 0.0;
        }
        let total: u32 = self.traits.values().map(|t| t.rarity().weight()).sum();
        total as f64 / max_possible as f64 * 100.0
    }

    /// Highest tier present
    pub fn top_rarity(&self) -> Option<Rarity> {
        self.traits.values().map(|t| t.rarity()).max()
    }

    /// Categories whose value or tier changed from `self` to `other`
    pub fn diff(&self, other: &MonkeyDna) -> Vec<TraitChange> {
        self.traits
            .iter()
            .filter_map(|(category, before)| {
                let after = other.traits.get(category)?;
                if before.same_as(after) {
                    None
                } else {
                    Some(TraitChange {
                        category: *category,
                        before: before.clone(),
                        after: after.clone(),
                    })
                }
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "MonkeyDna {} | gen={} | parent={} | mutations={} | rarity={:.1}/100",
            self.fingerprint,
            self.generation,
            self.parent_fingerprint.as_deref().unwrap_or("none"),
            self.mutation_count,
            self.rarity_score()
        )
    }
}

/// Two-step constructor for `MonkeyDna`
#[derive(Debug, Clone)]
pub struct DnaBuilder {
    generation: u32,
    parent_fingerprint: Option<String>,
    traits: Vec<Trait>,
    mutation_count: u32,
    birth_timestamp: Option<i64>,
}

impl DnaBuilder {
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            parent_fingerprint: None,
            traits: Vec::with_capacity(TraitCategory::ALL.len()),
            mutation_count: 0,
            birth_timestamp: None,
        }
    }

    pub fn parent(mut self, parent_fingerprint: Option<String>) -> Self {
        self.parent_fingerprint = parent_fingerprint;
        self
    }

    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.push(t);
        self
    }

    pub fn with_traits(mut self, traits: impl IntoIterator<Item = Trait>) -> Self {
        self.traits.extend(traits);
        self
    }

    pub fn mutation_count(mut self, count: u32) -> Self {
        self.mutation_count = count;
        self
    }

    /// Unix seconds; defaults to now
    pub fn born_at(mut self, timestamp: i64) -> Self {
        self.birth_timestamp = Some(timestamp);
        self
    }

    /// Validate the trait set and attach the fingerprint
    pub fn build(self) -> Result<MonkeyDna> {
        let generation = check_generation(self.generation)?;

        let mut traits = BTreeMap::new();
        for t in self.traits {
            let category = t.category();
            if traits.insert(category, t).is_some() {
                return Err(SchemaError::DuplicateCategory(category.to_string()).into());
            }
        }
        if let Some(missing) = TraitCategory::ALL.iter().find(|c| !traits.contains_key(*c)) {
            return Err(SchemaError::MissingCategory(missing.to_string()).into());
        }

        let fingerprint = fingerprint(traits.values());
        Ok(MonkeyDna {
            generation,
            parent_fingerprint: self.parent_fingerprint,
            traits,
            mutation_count: self.mutation_count,
            birth_timestamp: self.birth_timestamp.unwrap_or_else(|| Utc::now().timestamp()),
            fingerprint,
        })
    }
}
