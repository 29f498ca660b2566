//! Error types for the genetics engine
//!
//! Two families of failure exist: schema errors (a record or identity does not
//! match the catalog) and domain errors (an operation was called with an
//! out-of-range parameter). Neither is ever repaired silently.

/// A record or identity does not match the trait catalog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing trait for category: {0}")]
    MissingCategory(String),

    #[error("Duplicate trait for category: {0}")]
    DuplicateCategory(String),

    #[error("Unknown trait category: {0}")]
    UnknownCategory(String),

    #[error("Unknown rarity tier: {0}")]
    UnknownRarity(String),

    #[error("Gene sequence mismatch for {category}: expected {expected}, got {found}")]
    GeneSequenceMismatch {
        category: String,
        expected: String,
        found: String,
    },

    #[error("Fingerprint mismatch: expected {expected}, got {found}")]
    FingerprintMismatch { expected: String, found: String },

    #[error("Malformed record: {0}")]
    Malformed(String),
}

/// An operation was invoked with parameters outside its domain
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("Generation must be at least 1, got {0}")]
    InvalidGeneration(u32),

    #[error("Generation {0} has no successor")]
    GenerationOverflow(u32),

    #[error("Mutation count {0} cannot grow further")]
    MutationCountOverflow(u32),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneticsError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

pub type Result<T> = std::result::Result<T, GeneticsError>;

/// Reject anything outside [0, 1], NaN included.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::ProbabilityOutOfRange { name, value }.into())
    }
}

pub(crate) fn check_generation(generation: u32) -> Result<u32> {
    if generation >= 1 {
        Ok(generation)
    } else {
        Err(DomainError::InvalidGeneration(generation).into())
    }
}

/// Generation of a child bred from `generation`
pub(crate) fn next_generation(generation: u32) -> Result<u32> {
    generation
        .checked_add(1)
        .ok_or_else(|| DomainError::GenerationOverflow(generation).into())
}

/// Make sure `count` can absorb `extra` more mutations
pub(crate) fn check_mutation_headroom(count: u32, extra: u32) -> Result<u32> {
    count
        .checked_add(extra)
        .ok_or_else(|| DomainError::MutationCountOverflow(count).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_bounds() {
        assert!(check_probability("rate", 0.0).is_ok());
        assert!(check_probability("rate", 1.0).is_ok());
        assert!(check_probability("rate", -0.01).is_err());
        assert!(check_probability("rate", 1.5).is_err());
        assert!(check_probability("rate", f64::NAN).is_err());
    }

    #[test]
    fn test_generation_bounds() {
        assert_eq!(check_generation(1), Ok(1));
        assert_eq!(
            check_generation(0),
            Err(GeneticsError::Domain(DomainError::InvalidGeneration(0)))
        );
    }

    #[test]
    fn test_counter_overflow() {
        assert_eq!(next_generation(1), Ok(2));
        assert_eq!(
            next_generation(u32::MAX),
            Err(GeneticsError::Domain(DomainError::GenerationOverflow(u32::MAX)))
        );
        assert_eq!(check_mutation_headroom(3, 6), Ok(9));
        assert_eq!(
            check_mutation_headroom(u32::MAX - 2, 6),
            Err(GeneticsError::Domain(DomainError::MutationCountOverflow(u32::MAX - 2)))
        );
    }

    #[test]
    fn test_error_messages() {
        let err: GeneticsError = SchemaError::UnknownRarity("mythic".into()).into();
        assert_eq!(err.to_string(), "Schema error: Unknown rarity tier: mythic");
    }
}
