//! Genome — the trait genetics of a ForkMonkey
//!
//! An identity is one trait per catalog category plus lineage metadata
//! (generation, parent fingerprint, mutation count). The engine creates,
//! breeds and evolves identities; records carry them to storage.

pub mod catalog;
pub mod extinction;
pub mod fingerprint;
pub mod rarity;
mod dna;
mod engine;
mod record;
mod rules;
mod traits;

pub use catalog::{Rarity, TraitCategory};
pub use dna::{DnaBuilder, MonkeyDna, TraitChange};
pub use engine::GeneticsEngine;
pub use extinction::{available_locked, LockedTrait};
pub use record::{from_record, to_record, DnaRecord, TraitRecord};
pub use rules::BreedingRules;
pub use traits::Trait;
