//! Trait catalog — the static pool every fresh trait is drawn from
//!
//! Each category maps all four rarity tiers to a non-empty list of values.
//! The table is configuration data, never computed.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered scarcity class of a trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }

    /// Weight used by the rarity score
    pub fn weight(&self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 5,
            Rarity::Legendary => 10,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// Move one tier up (`step > 0`) or down (`step < 0`), clamped at both ends
    pub fn shifted(&self, step: i8) -> Rarity {
        let idx = (self.index() as i16 + step as i16).clamp(0, Self::ALL.len() as i16 - 1);
        Self::ALL[idx as usize]
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownRarity(s.to_string()))
    }
}

/// Closed set of trait categories; every identity carries exactly one of each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    BodyColor,
    FaceExpression,
    Accessory,
    Pattern,
    Background,
    Special,
}

impl TraitCategory {
    /// Catalog order; breeding and generation walk categories in this order
    pub const ALL: [TraitCategory; 6] = [
        TraitCategory::BodyColor,
        TraitCategory::FaceExpression,
        TraitCategory::Accessory,
        TraitCategory::Pattern,
        TraitCategory::Background,
        TraitCategory::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraitCategory::BodyColor => "body_color",
            TraitCategory::FaceExpression => "face_expression",
            TraitCategory::Accessory => "accessory",
            TraitCategory::Pattern => "pattern",
            TraitCategory::Background => "background",
            TraitCategory::Special => "special",
        }
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraitCategory {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownCategory(s.to_string()))
    }
}

/// Candidate values for a `(category, tier)` pair
pub fn values(category: TraitCategory, rarity: Rarity) -> &'static [&'static str] {
    use Rarity::*;
    use TraitCategory::*;

    match (category, rarity) {
        (BodyColor, Common) => &["brown", "tan", "beige", "gray"],
        (BodyColor, Uncommon) => &["golden", "silver", "copper", "bronze"],
        (BodyColor, Rare) => &["blue", "purple", "green", "pink"],
        (BodyColor, Legendary) => &["rainbow", "galaxy", "holographic", "crystal"],

        (FaceExpression, Common) => &["happy", "neutral", "curious", "sleepy"],
        (FaceExpression, Uncommon) => &["excited", "mischievous", "wise", "cool"],
        (FaceExpression, Rare) => &["surprised", "laughing", "winking", "zen"],
        (FaceExpression, Legendary) => &["enlightened", "cosmic", "legendary", "divine"],

        (Accessory, Common) => &["none", "simple_hat", "bandana", "bow"],
        (Accessory, Uncommon) => &["sunglasses", "crown", "headphones", "monocle"],
        (Accessory, Rare) => &["laser_eyes", "halo", "horns", "wizard_hat"],
        (Accessory, Legendary) => &["golden_crown", "diamond_chain", "jetpack", "wings"],

        (Pattern, Common) => &["solid", "spots", "stripes", "gradient"],
        (Pattern, Uncommon) => &["swirls", "stars", "hearts", "diamonds"],
        (Pattern, Rare) => &["fractals", "nebula", "lightning", "flames"],
        (Pattern, Legendary) => &["aurora", "quantum", "cosmic_dust", "void"],

        (Background, Common) => &["white", "blue_sky", "green_grass", "sunset"],
        (Background, Uncommon) => &["forest", "beach", "mountains", "city"],
        (Background, Rare) => &["space", "underwater", "volcano", "aurora"],
        (Background, Legendary) => &["multiverse", "black_hole", "dimension_rift", "heaven"],

        (Special, Common) => &["none"],
        (Special, Uncommon) => &["sparkles", "glow", "shadow"],
        (Special, Rare) => &["aura", "particles", "energy"],
        (Special, Legendary) => &["transcendent", "godlike", "mythical"],
    }
}

/// Whether `value` appears anywhere in the catalog for `category`
pub fn contains(category: TraitCategory, value: &str) -> bool {
    Rarity::ALL
        .iter()
        .any(|r| values(category, *r).contains(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tier_populated() {
        for category in TraitCategory::ALL {
            for rarity in Rarity::ALL {
                assert!(
                    !values(category, rarity).is_empty(),
                    "{} / {} has no values",
                    category,
                    rarity
                );
            }
        }
    }

    #[test]
    fn test_tag_round_trip() {
        for category in TraitCategory::ALL {
            assert_eq!(category.as_str().parse::<TraitCategory>(), Ok(category));
        }
        for rarity in Rarity::ALL {
            assert_eq!(rarity.as_str().parse::<Rarity>(), Ok(rarity));
        }
        assert_eq!(
            "tail".parse::<TraitCategory>(),
            Err(SchemaError::UnknownCategory("tail".into()))
        );
        assert_eq!(
            "Legendary".parse::<Rarity>(),
            Err(SchemaError::UnknownRarity("Legendary".into()))
        );
    }

    #[test]
    fn test_tier_ordering_and_shift() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Rare < Rarity::Legendary);
        assert_eq!(Rarity::Common.shifted(-1), Rarity::Common);
        assert_eq!(Rarity::Common.shifted(1), Rarity::Uncommon);
        assert_eq!(Rarity::Legendary.shifted(1), Rarity::Legendary);
        assert_eq!(Rarity::Rare.shifted(-1), Rarity::Uncommon);
    }

    #[test]
    fn test_contains() {
        assert!(contains(TraitCategory::BodyColor, "golden"));
        assert!(!contains(TraitCategory::BodyColor, "origin_white"));
        // "aurora" is a rare background and a legendary pattern
        assert!(contains(TraitCategory::Background, "aurora"));
        assert!(contains(TraitCategory::Pattern, "aurora"));
    }
}
