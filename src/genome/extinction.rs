//! Generation-lock policy — trait values that go extinct
//!
//! A locked value can be granted fresh only while the receiving identity's
//! generation is at or below the value's `max_gen`. Past that it is extinct for
//! fresh generation, though inheritance may still carry it forward.

use super::TraitCategory;

/// One reserved value and the last generation that can receive it fresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedTrait {
    pub category: TraitCategory,
    pub value: &'static str,
    pub max_gen: u32,
}

const fn locked(category: TraitCategory, max_gen: u32, value: &'static str) -> LockedTrait {
    LockedTrait { category, value, max_gen }
}

const LOCKED_TRAITS: [LockedTrait; 9] = [
    locked(TraitCategory::BodyColor, 5, "prismatic"),
    locked(TraitCategory::BodyColor, 3, "genesis_gold"),
    locked(TraitCategory::BodyColor, 1, "origin_white"),
    locked(TraitCategory::Accessory, 5, "founders_badge"),
    locked(TraitCategory::Accessory, 3, "alpha_crown"),
    locked(TraitCategory::Accessory, 1, "genesis_aura"),
    locked(TraitCategory::Special, 10, "pioneer_glow"),
    locked(TraitCategory::Special, 5, "early_spark"),
    locked(TraitCategory::Special, 1, "genesis_blessing"),
];

/// Every registered lock, in table order
pub fn all() -> &'static [LockedTrait] {
    &LOCKED_TRAITS
}

/// Locked values still obtainable fresh for `category` at `generation`
pub fn available_locked(category: TraitCategory, generation: u32) -> Vec<&'static str> {
    LOCKED_TRAITS
        .iter()
        .filter(|l| l.category == category && generation <= l.max_gen)
        .map(|l| l.value)
        .collect()
}

/// Last generation that can receive `value` fresh, if it is locked at all
pub fn max_generation(category: TraitCategory, value: &str) -> Option<u32> {
    LOCKED_TRAITS
        .iter()
        .find(|l| l.category == category && l.value == value)
        .map(|l| l.max_gen)
}

pub fn is_locked(category: TraitCategory, value: &str) -> bool {
    max_generation(category, value).is_some()
}

/// A locked value whose window has closed for `generation`
pub fn is_extinct(category: TraitCategory, value: &str, generation: u32) -> bool {
    max_generation(category, value).is_some_and(|max_gen| generation > max_gen)
}

/// First generation at which no locked value remains obtainable anywhere
pub fn final_extinction() -> u32 {
    LOCKED_TRAITS.iter().map(|l| l.max_gen).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen1_has_everything() {
        let body = available_locked(TraitCategory::BodyColor, 1);
        assert!(body.contains(&"origin_white"));
        assert!(body.contains(&"genesis_gold"));
        assert!(body.contains(&"prismatic"));

        let accessory = available_locked(TraitCategory::Accessory, 1);
        assert_eq!(accessory.len(), 3);

        let special = available_locked(TraitCategory::Special, 1);
        assert!(special.contains(&"genesis_blessing"));
        assert!(special.contains(&"early_spark"));
        assert!(special.contains(&"pioneer_glow"));
    }

    #[test]
    fn test_gen5_is_limited() {
        let body = available_locked(TraitCategory::BodyColor, 5);
        assert_eq!(body, vec!["prismatic"]);

        let accessory = available_locked(TraitCategory::Accessory, 5);
        assert_eq!(accessory, vec!["founders_badge"]);

        let special = available_locked(TraitCategory::Special, 5);
        assert!(!special.contains(&"genesis_blessing"));
        assert!(special.contains(&"early_spark"));
        assert!(special.contains(&"pioneer_glow"));
    }

    #[test]
    fn test_gen20_all_extinct() {
        for category in TraitCategory::ALL {
            assert!(available_locked(category, 20).is_empty());
        }
        assert_eq!(final_extinction(), 11);
    }

    #[test]
    fn test_unlocked_category_is_empty() {
        assert!(available_locked(TraitCategory::FaceExpression, 1).is_empty());
        assert!(available_locked(TraitCategory::Pattern, 1).is_empty());
    }

    #[test]
    fn test_cutoff_is_exact_and_monotonic() {
        for lock in all() {
            assert!(available_locked(lock.category, lock.max_gen).contains(&lock.value));
            assert!(!available_locked(lock.category, lock.max_gen + 1).contains(&lock.value));
        }
        for category in TraitCategory::ALL {
            let mut previous = usize::MAX;
            for generation in 1..=15 {
                let count = available_locked(category, generation).len();
                assert!(count <= previous);
                previous = count;
            }
        }
    }

    #[test]
    fn test_extinct_lookup() {
        assert!(is_locked(TraitCategory::BodyColor, "origin_white"));
        assert!(!is_locked(TraitCategory::Accessory, "origin_white"));
        assert!(!is_extinct(TraitCategory::BodyColor, "origin_white", 1));
        assert!(is_extinct(TraitCategory::BodyColor, "origin_white", 2));
        assert!(!is_extinct(TraitCategory::BodyColor, "golden", 99));
    }
}
