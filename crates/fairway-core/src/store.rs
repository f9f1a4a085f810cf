//! Round storage backends.
//!
//! [`RoundStore`] is the storage seam: [`MemoryStore`] keeps rounds for
//! the lifetime of the process, [`JsonStore`] persists them to a JSON
//! file so a history survives restarts.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::round::{NewRound, Round, RoundId};

/// Persistent record of submitted rounds.
///
/// Implementations assign identifiers on save and keep them unique and
/// increasing for the lifetime of the store.
#[async_trait]
pub trait RoundStore: Send + Sync {
    /// Validate and persist a submission, returning it with its
    /// assigned id.
    ///
    /// A zero slope rating is rejected with a validation error before
    /// anything is persisted.
    async fn save(&self, round: NewRound) -> Result<Round>;

    /// All stored rounds, in insertion order.
    async fn find_all(&self) -> Result<Vec<Round>>;

    /// The most recently played round, if any.
    ///
    /// Ordered by `played_at`; rounds played at the same instant
    /// tie-break on the higher id.
    async fn find_most_recent(&self) -> Result<Option<Round>>;

    /// Number of stored rounds.
    async fn count(&self) -> Result<usize>;
}

fn next_id(rounds: &[Round]) -> i64 {
    rounds.iter().map(|r| r.id.0).max().unwrap_or(0) + 1
}

fn most_recent(rounds: &[Round]) -> Option<Round> {
    rounds.iter().max_by_key(|r| (r.played_at, r.id)).cloned()
}

/// In-memory store, dropped when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rounds: RwLock<Vec<Round>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoundStore for MemoryStore {
    async fn save(&self, round: NewRound) -> Result<Round> {
        round.validate()?;
        let mut rounds = self.rounds.write();
        let round = round.into_round(RoundId(next_id(&rounds)));
        rounds.push(round.clone());
        Ok(round)
    }

    async fn find_all(&self) -> Result<Vec<Round>> {
        Ok(self.rounds.read().clone())
    }

    async fn find_most_recent(&self) -> Result<Option<Round>> {
        Ok(most_recent(&self.rounds.read()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rounds.read().len())
    }
}

/// File-backed store that keeps the full history in one JSON document.
///
/// Every save rewrites the document through a temporary file and a
/// rename, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    rounds: RwLock<Vec<Round>>,
}

impl JsonStore {
    /// Open a store at `path`, loading any existing history.
    ///
    /// A missing file is treated as an empty history and created on
    /// first save. A file that does not parse, or that carries a round
    /// with a zero slope rating, is an error; loading it would corrupt
    /// the handicap calculation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let rounds: Vec<Round> = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Vec::new()
        };
        if let Some(bad) = rounds.iter().find(|r| r.slope_rating == 0) {
            return Err(Error::validation(format!(
                "round {} has a zero slope rating",
                bad.id
            )));
        }
        tracing::info!(path = %path.display(), rounds = rounds.len(), "Opened round store");
        Ok(Self {
            path,
            rounds: RwLock::new(rounds),
        })
    }

    fn persist(&self, rounds: &[Round]) -> Result<()> {
        let json = serde_json::to_string_pretty(rounds)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .map_err(|e| Error::storage(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::storage(format!("replace {}: {e}", self.path.display())))?;
        Ok(())
    }
}

#[async_trait]
impl RoundStore for JsonStore {
    async fn save(&self, round: NewRound) -> Result<Round> {
        round.validate()?;
        let mut rounds = self.rounds.write();
        let round = round.into_round(RoundId(next_id(&rounds)));
        rounds.push(round.clone());
        if let Err(err) = self.persist(&rounds) {
            rounds.pop();
            return Err(err);
        }
        Ok(round)
    }

    async fn find_all(&self) -> Result<Vec<Round>> {
        Ok(self.rounds.read().clone())
    }

    async fn find_most_recent(&self) -> Result<Option<Round>> {
        Ok(most_recent(&self.rounds.read()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rounds.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn submission(score: i32, played_at: DateTime<Utc>) -> NewRound {
        NewRound::new(score, 72.0, 113, played_at)
    }

    #[tokio::test]
    async fn test_memory_store_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.save(submission(90, at(9))).await.unwrap();
        let second = store.save(submission(85, at(10))).await.unwrap();

        assert_eq!(first.id, RoundId(1));
        assert_eq!(second.id, RoundId(2));
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.save(submission(90, at(10))).await.unwrap();
        store.save(submission(85, at(9))).await.unwrap();

        let rounds = store.find_all().await.unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].score, 90);
        assert_eq!(rounds[1].score, 85);
    }

    #[tokio::test]
    async fn test_most_recent_is_by_played_at_not_insertion() {
        let store = MemoryStore::new();
        store.save(submission(90, at(15))).await.unwrap();
        store.save(submission(85, at(9))).await.unwrap();

        let recent = store.find_most_recent().await.unwrap().unwrap();
        assert_eq!(recent.score, 90);
    }

    #[tokio::test]
    async fn test_most_recent_tie_breaks_on_higher_id() {
        let store = MemoryStore::new();
        store.save(submission(90, at(9))).await.unwrap();
        store.save(submission(85, at(9))).await.unwrap();

        let recent = store.find_most_recent().await.unwrap().unwrap();
        assert_eq!(recent.id, RoundId(2));
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.find_all().await.unwrap().is_empty());
        assert!(store.find_most_recent().await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_rejects_zero_slope() {
        let store = MemoryStore::new();
        let err = store
            .save(NewRound::new(90, 72.0, 0, at(9)))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_json_store_save_rejects_zero_slope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.json");

        let store = JsonStore::open(&path).unwrap();
        let err = store
            .save(NewRound::new(90, 72.0, 0, at(9)))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_json_store_rejects_zero_slope_round_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.json");
        fs::write(
            &path,
            r#"[{"id":1,"score":90,"courseRating":72.0,"slopeRating":0,"playedAt":"2024-05-01T09:00:00Z"}]"#,
        )
        .unwrap();

        let err = JsonStore::open(&path).unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.json");

        {
            let store = JsonStore::open(&path).unwrap();
            store.save(submission(90, at(9))).await.unwrap();
            store.save(submission(85, at(10))).await.unwrap();
        }

        let store = JsonStore::open(&path).unwrap();
        let rounds = store.find_all().await.unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].id, RoundId(1));
        assert_eq!(rounds[1].score, 85);
    }

    #[tokio::test]
    async fn test_json_store_resumes_id_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.json");

        {
            let store = JsonStore::open(&path).unwrap();
            store.save(submission(90, at(9))).await.unwrap();
            store.save(submission(85, at(10))).await.unwrap();
        }

        let store = JsonStore::open(&path).unwrap();
        let third = store.save(submission(88, at(11))).await.unwrap();
        assert_eq!(third.id, RoundId(3));
    }

    #[tokio::test]
    async fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("rounds.json")).unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.json");
        fs::write(&path, "not json").unwrap();

        assert!(JsonStore::open(&path).is_err());
    }

    #[tokio::test]
    async fn test_json_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/rounds.json");

        let store = JsonStore::open(&path).unwrap();
        store.save(submission(90, at(9))).await.unwrap();
        assert!(path.exists());
    }
}
