//! Rarity roller
//!
//! Maps a uniform draw in [0, 100) onto a tier through fixed cumulative
//! boundaries. Changing the boundaries changes the whole population's rarity
//! distribution, so the table carries a version.

use super::Rarity;
use rand::Rng;

/// Bump whenever `BOUNDARIES` changes
pub const RARITY_TABLE_VERSION: u32 = 1;

/// Exclusive upper bound of each tier on the [0, 100) scale
const BOUNDARIES: [(f64, Rarity); 4] = [
    (60.0, Rarity::Common),
    (85.0, Rarity::Uncommon),
    (95.0, Rarity::Rare),
    (100.0, Rarity::Legendary),
];

/// Pure mapping from a draw in [0, 100) to its tier
pub fn tier_for_roll(roll: f64) -> Rarity {
    BOUNDARIES
        .iter()
        .find(|(upper, _)| roll < *upper)
        .map(|(_, rarity)| *rarity)
        .unwrap_or(Rarity::Legendary)
}

/// Probability of landing on `rarity`, in percent
pub fn tier_chance(rarity: Rarity) -> f64 {
    let mut lower = 0.0;
    for (upper, tier) in BOUNDARIES {
        if tier == rarity {
            return upper - lower;
        }
        lower = upper;
    }
    0.0
}

/// Draw a tier from the injected random source
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Rarity {
    tier_for_roll(rng.gen_range(0.0..100.0))
}
