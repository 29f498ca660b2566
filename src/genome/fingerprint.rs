//! Identity hashing
//!
//! Two digests are produced here: the 8-hex `gene_sequence` of a single
//! `category:value` pair, and the 16-hex fingerprint of a full trait set.
//! Both are truncated SHA-256; they are identifiers, not security tokens.

use super::{Trait, TraitCategory};
use sha2::{Digest, Sha256};

pub const GENE_SEQUENCE_LEN: usize = 8;
pub const FINGERPRINT_LEN: usize = 16;

fn truncated_digest(input: &[u8], len: usize) -> String {
    let mut encoded = hex::encode(Sha256::digest(input));
    encoded.truncate(len);
    encoded
}

/// Compact marker for a `(category, value)` pair; rarity plays no part
pub fn gene_sequence(category: TraitCategory, value: &str) -> String {
    truncated_digest(format!("{}:{}", category, value).as_bytes(), GENE_SEQUENCE_LEN)
}

/// Order-independent fingerprint over a trait set
pub fn fingerprint<'a, I>(traits: I) -> String
where
    I: IntoIterator<Item = &'a Trait>,
{
    // Canonical order is the category tag, alphabetically
    let mut genes: Vec<(&str, &str)> = traits
        .into_iter()
        .map(|t| (t.category().as_str(), t.gene_sequence()))
        .collect();
    genes.sort_unstable();

    let mut hasher = Sha256::new();
    for (category, gene) in genes {
        hasher.update(category.as_bytes());
        hasher.update(b":");
        hasher.update(gene.as_bytes());
    }
    let mut encoded = hex::encode(hasher.finalize());
    encoded.truncate(FINGERPRINT_LEN);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Rarity;

    #[test]
    fn test_gene_sequence_shape() {
        let gene = gene_sequence(TraitCategory::FaceExpression, "happy");
        assert_eq!(gene.len(), GENE_SEQUENCE_LEN);
        assert!(gene.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_gene_sequence_ignores_rarity() {
        let a = Trait::new(TraitCategory::BodyColor, "golden", Rarity::Uncommon);
        let b = Trait::new(TraitCategory::BodyColor, "golden", Rarity::Legendary);
        assert_eq!(a.gene_sequence(), b.gene_sequence());
    }

    #[test]
    fn test_gene_sequence_depends_on_category() {
        assert_ne!(
            gene_sequence(TraitCategory::Background, "aurora"),
            gene_sequence(TraitCategory::Pattern, "aurora")
        );
    }

    #[test]
    fn test_fingerprint_order_independent() {
        let traits = vec![
            Trait::new(TraitCategory::Special, "glow", Rarity::Uncommon),
            Trait::new(TraitCategory::BodyColor, "brown", Rarity::Common),
            Trait::new(TraitCategory::Pattern, "void", Rarity::Legendary),
        ];
        let forward = fingerprint(&traits);
        let reversed = fingerprint(traits.iter().rev());
        assert_eq!(forward, reversed);
        assert_eq!(forward.len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_fingerprint_matches_concatenation() {
        let traits = vec![
            Trait::new(TraitCategory::Pattern, "spots", Rarity::Common),
            Trait::new(TraitCategory::BodyColor, "tan", Rarity::Common),
        ];
        let joined = format!(
            "body_color:{}pattern:{}",
            gene_sequence(TraitCategory::BodyColor, "tan"),
            gene_sequence(TraitCategory::Pattern, "spots")
        );
        let expected = &hex::encode(Sha256::digest(joined.as_bytes()))[..FINGERPRINT_LEN];
        assert_eq!(fingerprint(&traits), expected);
    }
}
