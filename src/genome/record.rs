//! Plain-data record of an identity, for storage and presentation layers
//!
//! `to_record` flattens an identity into string-tagged fields; `from_record`
//! rebuilds it and refuses anything that does not match the catalog. Stored
//! gene sequences and fingerprints are checked against recomputed ones rather
//! than trusted.

use super::fingerprint::gene_sequence;
use super::{MonkeyDna, Rarity, Trait, TraitCategory};
use crate::error::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitRecord {
    pub value: String,
    pub rarity: String,
    /// Empty means "recompute"
    #[serde(default)]
    pub gene_sequence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnaRecord {
    pub generation: u32,
    pub parent_fingerprint: Option<String>,
    /// Empty means "recompute"
    #[serde(default)]
    pub fingerprint: String,
    #[serde(default)]
    pub mutation_count: u32,
    #[serde(default)]
    pub birth_timestamp: i64,
    pub traits: BTreeMap<String, TraitRecord>,
    /// Derived; ignored on read
    #[serde(default)]
    pub rarity_score: f64,
}

pub fn to_record(dna: &MonkeyDna) -> DnaRecord {
    let traits = dna
        .traits()
        .map(|t| {
            (
                t.category().to_string(),
                TraitRecord {
                    value: t.value().to_string(),
                    rarity: t.rarity().to_string(),
                    gene_sequence: t.gene_sequence().to_string(),
                },
            )
        })
        .collect();

    DnaRecord {
        generation: dna.generation(),
        parent_fingerprint: dna.parent_fingerprint().map(str::to_string),
        fingerprint: dna.fingerprint().to_string(),
        mutation_count: dna.mutation_count(),
        birth_timestamp: dna.birth_timestamp(),
        traits,
        rarity_score: dna.rarity_score(),
    }
}

pub fn from_record(record: &DnaRecord) -> Result<MonkeyDna> {
    let mut builder = MonkeyDna::builder(record.generation)
        .parent(record.parent_fingerprint.clone())
        .mutation_count(record.mutation_count)
        .born_at(record.birth_timestamp);

    for (tag, stored) in &record.traits {
        let category: TraitCategory = tag.parse()?;
        let rarity: Rarity = stored.rarity.parse()?;

        let expected = gene_sequence(category, &stored.value);
        if !stored.gene_sequence.is_empty() && stored.gene_sequence != expected {
            return Err(SchemaError::GeneSequenceMismatch {
                category: tag.clone(),
                expected,
                found: stored.gene_sequence.clone(),
            }
            .into());
        }
        builder = builder.with_trait(Trait::new(category, stored.value.as_str(), rarity));
    }

    let dna = builder.build()?;
    if !record.fingerprint.is_empty() && record.fingerprint != dna.fingerprint() {
        return Err(SchemaError::FingerprintMismatch {
            expected: dna.fingerprint().to_string(),
            found: record.fingerprint.clone(),
        }
        .into());
    }
    Ok(dna)
}

impl DnaRecord {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SchemaError::Malformed(e.to_string()).into())
    }

    /// Parse a JSON document; type errors surface as `SchemaError::Malformed`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SchemaError::Malformed(e.to_string()).into())
    }
}
