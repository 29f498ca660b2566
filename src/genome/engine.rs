//! GeneticsEngine — generation, breeding, mutation and evolution
//!
//! The engine holds configuration only. Every operation takes the random
//! source as an argument, so a seeded generator replays the same identities
//! for the same call sequence. Parameters are validated before any draw.

use super::extinction::available_locked;
use super::{catalog, rarity, BreedingRules, MonkeyDna, Rarity, Trait, TraitCategory};
use crate::error::{
    check_generation, check_mutation_headroom, check_probability, next_generation, Result, SchemaError,
};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// How a category's trait was chosen during breeding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Locked,
    Inherited,
    Rolled,
}

#[derive(Debug, Clone, Default)]
pub struct GeneticsEngine {
    rules: BreedingRules,
}

impl GeneticsEngine {
    pub fn new(rules: BreedingRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &BreedingRules {
        &self.rules
    }

    /// Create a brand-new identity
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        generation: u32,
        parent_fingerprint: Option<String>,
    ) -> Result<MonkeyDna> {
        check_generation(generation)?;

        let mut builder = MonkeyDna::builder(generation).parent(parent_fingerprint);
        for category in TraitCategory::ALL {
            let t = match self.try_locked(rng, category, generation, self.rules.fresh_locked_chance) {
                Some(t) => t,
                None => self.rolled_trait(rng, category)?,
            };
            builder = builder.with_trait(t);
        }

        let dna = builder.build()?;
        debug!("Generated {}", dna.summary());
        Ok(dna)
    }

    /// Derive a child identity from one parent
    pub fn breed<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        parent: &MonkeyDna,
        mutation_rate: f64,
    ) -> Result<MonkeyDna> {
        check_probability("mutation_rate", mutation_rate)?;
        let child_generation = next_generation(parent.generation())?;
        for category in TraitCategory::ALL {
            parent.require(category)?;
        }

        let mut builder = MonkeyDna::builder(child_generation)
            .parent(Some(parent.fingerprint().to_string()));
        let mut mutations = 0;

        for category in TraitCategory::ALL {
            let (mut t, origin) =
                match self.try_locked(rng, category, child_generation, self.rules.child_locked_chance) {
                    Some(t) => (t, Origin::Locked),
                    None if rng.gen_bool(self.rules.inherit_chance) => {
                        (parent.require(category)?.clone(), Origin::Inherited)
                    }
                    None => (self.rolled_trait(rng, category)?, Origin::Rolled),
                };

            if rng.gen_bool(mutation_rate) {
                t = self.mutate(rng, &t)?;
                mutations += 1;
                debug!("{}: {:?} then mutated to {}", category, origin, t.value());
            } else {
                debug!("{}: {:?} {}", category, origin, t.value());
            }
            builder = builder.with_trait(t);
        }

        let child = builder.mutation_count(mutations).build()?;
        debug!("Bred {} from {}", child.summary(), parent.fingerprint());
        Ok(child)
    }

    /// Re-draw a trait's value, possibly one tier up or down
    pub fn mutate<R: Rng + ?Sized>(&self, rng: &mut R, t: &Trait) -> Result<Trait> {
        let tier = if rng.gen_bool(self.rules.keep_tier_chance) {
            t.rarity()
        } else {
            let step = if rng.gen_bool(0.5) { 1 } else { -1 };
            t.rarity().shifted(step)
        };
        let value = pick(rng, t.category(), tier)?;
        Ok(Trait::new(t.category(), value, tier))
    }

    /// Age an identity in place-equivalent fashion; lineage is untouched
    pub fn evolve<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        dna: &MonkeyDna,
        strength: f64,
    ) -> Result<MonkeyDna> {
        check_probability("strength", strength)?;
        // every trait may mutate, so the counter needs room for all of them
        check_mutation_headroom(dna.mutation_count(), TraitCategory::ALL.len() as u32)?;

        let mut mutated = 0;
        let mut traits = Vec::with_capacity(TraitCategory::ALL.len());
        for t in dna.traits() {
            if rng.gen_bool(strength) {
                traits.push(self.mutate(rng, t)?);
                mutated += 1;
            } else {
                traits.push(t.clone());
            }
        }

        let evolved = MonkeyDna::builder(dna.generation())
            .parent(dna.parent_fingerprint().map(str::to_string))
            .with_traits(traits)
            .mutation_count(dna.mutation_count() + mutated)
            .born_at(dna.birth_timestamp())
            .build()?;
        debug!(
            "Evolved {} -> {} ({} traits mutated)",
            dna.fingerprint(),
            evolved.fingerprint(),
            mutated
        );
        Ok(evolved)
    }

    pub fn rarity_score(dna: &MonkeyDna) -> f64 {
        dna.rarity_score()
    }

    /// A fresh trait through the rarity roll, ignoring gen-locks
    pub fn rolled_trait<R: Rng + ?Sized>(&self, rng: &mut R, category: TraitCategory) -> Result<Trait> {
        let tier = rarity::roll(rng);
        let value = pick(rng, category, tier)?;
        Ok(Trait::new(category, value, tier))
    }

    /// Grant a still-available locked value with probability `chance`.
    /// No draw happens when nothing is available.
    fn try_locked<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: TraitCategory,
        generation: u32,
        chance: f64,
    ) -> Option<Trait> {
        let available = available_locked(category, generation);
        if available.is_empty() || !rng.gen_bool(chance) {
            return None;
        }
        available
            .choose(rng)
            .map(|value| Trait::new(category, *value, Rarity::Legendary))
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, category: TraitCategory, tier: Rarity) -> Result<&'static str> {
    catalog::values(category, tier)
        .choose(rng)
        .copied()
        .ok_or_else(|| SchemaError::Malformed(format!("no catalog values for {}/{}", category, tier)).into())
}
