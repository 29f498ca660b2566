//! ForkMonkey — procedural genetics for a collectible digital pet
//!
//! Identities are generated from a rarity-weighted trait catalog, inherited
//! from a parent with mutation, evolved over time, and fingerprinted
//! deterministically. Some trait values go extinct after an early generation.

pub mod error;
pub mod genome;
pub mod storage;

pub use error::{DomainError, GeneticsError, SchemaError};
pub use genome::{BreedingRules, DnaRecord, GeneticsEngine, MonkeyDna, Rarity, Trait, TraitCategory};
pub use storage::MonkeyStore;
