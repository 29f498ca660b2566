//! Evolution history and daily streak
//!
//! History is an append-only log of snapshots with a short story line.
//! The streak counts consecutive days on which the monkey was evolved.

use crate::genome::{MonkeyDna, Rarity, TraitCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single point in a monkey's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub fingerprint: String,
    pub generation: u32,
    pub mutation_count: u32,
    pub rarity_score: f64,
    /// Trait value per category at this point
    pub traits: BTreeMap<TraitCategory, String>,
    pub story: String,
}

impl HistoryEntry {
    pub fn snapshot(dna: &MonkeyDna, story: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            fingerprint: dna.fingerprint().to_string(),
            generation: dna.generation(),
            mutation_count: dna.mutation_count(),
            rarity_score: dna.rarity_score(),
            traits: dna
                .traits()
                .map(|t| (t.category(), t.value().to_string()))
                .collect(),
            story: story.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    pub entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// The most recent `limit` entries, newest last
    pub fn latest(&self, limit: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }
}

/// Consecutive-day evolution streak
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
    pub last_date: Option<NaiveDate>,
}

impl Streak {
    /// Record activity on `today`
    pub fn advance(&self, today: NaiveDate) -> Streak {
        let Some(last) = self.last_date else {
            return Streak {
                current: 1,
                best: self.best.max(1),
                last_date: Some(today),
            };
        };

        match (today - last).num_days() {
            0 => *self,
            1 => {
                let current = self.current + 1;
                Streak {
                    current,
                    best: self.best.max(current),
                    last_date: Some(today),
                }
            }
            _ => Streak {
                current: 1,
                best: self.best.max(1),
                last_date: Some(today),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatTrait {
    pub value: String,
    pub rarity: Rarity,
}

/// Latest stats snapshot, rewritten on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub fingerprint: String,
    pub generation: u32,
    pub age_days: u32,
    pub mutation_count: u32,
    pub rarity_score: f64,
    pub parent_fingerprint: Option<String>,
    pub traits: BTreeMap<TraitCategory, StatTrait>,
    pub streak: Streak,
    pub last_updated: DateTime<Utc>,
}

impl Stats {
    pub fn new(dna: &MonkeyDna, age_days: u32, streak: Streak) -> Self {
        Self {
            fingerprint: dna.fingerprint().to_string(),
            generation: dna.generation(),
            age_days,
            mutation_count: dna.mutation_count(),
            rarity_score: dna.rarity_score(),
            parent_fingerprint: dna.parent_fingerprint().map(str::to_string),
            traits: dna
                .traits()
                .map(|t| {
                    (
                        t.category(),
                        StatTrait {
                            value: t.value().to_string(),
                            rarity: t.rarity(),
                        },
                    )
                })
                .collect(),
            streak,
            last_updated: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_first_streak() {
        let streak = Streak::default().advance(day(1));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.best, 1);
        assert_eq!(streak.last_date, Some(day(1)));
    }

    #[test]
    fn test_same_day_no_increment() {
        let streak = Streak::default().advance(day(1)).advance(day(1));
        assert_eq!(streak.current, 1);
    }

    #[test]
    fn test_consecutive_days() {
        let mut streak = Streak::default();
        for d in 1..=7 {
            streak = streak.advance(day(d));
        }
        assert_eq!(streak.current, 7);
        assert_eq!(streak.best, 7);
    }

    #[test]
    fn test_broken_streak_keeps_best() {
        let streak = Streak::default()
            .advance(day(1))
            .advance(day(2))
            .advance(day(3))
            .advance(day(10));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.best, 3);
        assert_eq!(streak.last_date, Some(day(10)));
    }

    #[test]
    fn test_latest_entries() {
        let mut log = HistoryLog::default();
        assert!(log.latest(5).is_empty());
        for i in 0..4 {
            log.push(HistoryEntry {
                timestamp: Utc::now(),
                fingerprint: format!("{:016x}", i),
                generation: 1,
                mutation_count: i,
                rarity_score: 10.0,
                traits: BTreeMap::new(),
                story: String::new(),
            });
        }
        let latest = log.latest(2);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[1].mutation_count, 3);
        assert_eq!(log.latest(10).len(), 4);
    }
}
