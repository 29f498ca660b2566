//! Local storage for a monkey
//!
//! A data directory holds three JSON documents:
//! - `dna.json`: the current identity record
//! - `history.json`: every snapshot with its story
//! - `stats.json`: the latest stats and the evolution streak

pub mod history;

pub use history::{HistoryEntry, HistoryLog, Stats, Streak};

use crate::error::GeneticsError;
use crate::genome::{from_record, to_record, DnaRecord, MonkeyDna};
use chrono::NaiveDate;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

const DNA_FILE: &str = "dna.json";
const HISTORY_FILE: &str = "history.json";
const STATS_FILE: &str = "stats.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored DNA rejected: {0}")]
    Genetics(#[from] GeneticsError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct MonkeyStore {
    dir: PathBuf,
}

impl MonkeyStore {
    /// Open (and create if needed) a data directory
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_dna(&self, dna: &MonkeyDna) -> StoreResult<()> {
        let path = self.dir.join(DNA_FILE);
        write_json(&path, &to_record(dna))?;
        info!("DNA {} saved to {}", dna.fingerprint(), path.display());
        Ok(())
    }

    /// `None` when no monkey has been created yet
    pub fn load_dna(&self) -> StoreResult<Option<MonkeyDna>> {
        let path = self.dir.join(DNA_FILE);
        let Some(record) = read_json::<DnaRecord>(&path)? else {
            return Ok(None);
        };
        let dna = from_record(&record)?;
        info!("DNA {} loaded from {}", dna.fingerprint(), path.display());
        Ok(Some(dna))
    }

    pub fn append_history(&self, dna: &MonkeyDna, story: &str) -> StoreResult<HistoryEntry> {
        let path = self.dir.join(HISTORY_FILE);
        let mut log = read_json::<HistoryLog>(&path)?.unwrap_or_default();
        let entry = HistoryEntry::snapshot(dna, story);
        log.push(entry.clone());
        write_json(&path, &log)?;
        info!("History entry {} saved ({} total)", entry.fingerprint, log.entries.len());
        Ok(entry)
    }

    pub fn history(&self) -> StoreResult<HistoryLog> {
        Ok(read_json(&self.dir.join(HISTORY_FILE))?.unwrap_or_default())
    }

    /// Rewrite the stats snapshot, advancing the streak to `today`
    pub fn save_stats(&self, dna: &MonkeyDna, age_days: u32, today: NaiveDate) -> StoreResult<Stats> {
        let path = self.dir.join(STATS_FILE);
        let previous = read_json::<Stats>(&path)?.map(|s| s.streak).unwrap_or_default();
        let stats = Stats::new(dna, age_days, previous.advance(today));
        write_json(&path, &stats)?;
        info!("Stats saved (streak {} / best {})", stats.streak.current, stats.streak.best);
        Ok(stats)
    }

    pub fn stats(&self) -> StoreResult<Option<Stats>> {
        read_json(&self.dir.join(STATS_FILE))
    }

    pub fn streak(&self) -> StoreResult<Streak> {
        Ok(self.stats()?.map(|s| s.streak).unwrap_or_default())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GeneticsEngine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn temp_store(name: &str) -> MonkeyStore {
        let dir = std::env::temp_dir().join(format!(
            "forkmonkey-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        MonkeyStore::open(dir).unwrap()
    }

    fn monkey(seed: u64) -> MonkeyDna {
        let mut rng = StdRng::seed_from_u64(seed);
        GeneticsEngine::default().generate(&mut rng, 1, None).unwrap()
    }

    #[test]
    fn test_save_and_load_dna() {
        let store = temp_store("dna");
        let dna = monkey(1);
        store.save_dna(&dna).unwrap();
        let loaded = store.load_dna().unwrap().unwrap();
        assert_eq!(loaded, dna);
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_load_nonexistent_dna() {
        let store = temp_store("empty");
        assert!(store.load_dna().unwrap().is_none());
        assert!(store.history().unwrap().entries.is_empty());
        assert_eq!(store.streak().unwrap(), Streak::default());
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_corrupt_dna_rejected() {
        let store = temp_store("corrupt");
        std::fs::write(store.dir().join(DNA_FILE), "{ not json").unwrap();
        assert!(matches!(store.load_dna(), Err(StoreError::Json { .. })));

        let mut record = to_record(&monkey(2));
        record.traits.remove("special");
        write_json(&store.dir().join(DNA_FILE), &record).unwrap();
        assert!(matches!(store.load_dna(), Err(StoreError::Genetics(_))));
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_history_entries_accumulate() {
        let store = temp_store("history");
        let dna = monkey(3);
        store.append_history(&dna, "born").unwrap();
        store.append_history(&dna, "evolved").unwrap();
        let log = store.history().unwrap();
        assert_eq!(log.entries.len(), 2);
        assert_eq!(log.entries[0].story, "born");
        assert_eq!(log.entries[1].fingerprint, dna.fingerprint());
        assert_eq!(log.entries[1].traits.len(), 6);
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_stats_streak_persists() {
        let store = temp_store("stats");
        let dna = monkey(4);
        let d1 = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();

        let first = store.save_stats(&dna, 0, d1).unwrap();
        assert_eq!(first.streak.current, 1);
        store.save_stats(&dna, 0, d1).unwrap();
        let second = store.save_stats(&dna, 1, d2).unwrap();
        assert_eq!(second.streak.current, 2);
        assert_eq!(store.streak().unwrap().best, 2);

        let stats = store.stats().unwrap().unwrap();
        assert_eq!(stats.age_days, 1);
        assert_eq!(stats.fingerprint, dna.fingerprint());
        let _ = std::fs::remove_dir_all(store.dir());
    }
}
