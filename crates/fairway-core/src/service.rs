//! Round submission and handicap lookup behind one facade.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::Result;
use crate::handicap;
use crate::round::{NewRound, Round};
use crate::store::RoundStore;

/// Coordinates the round store and the handicap calculation.
///
/// The computed handicap index is memoized until the next successful
/// submission, so repeated reads do not touch the store.
pub struct HandicapService {
    store: Arc<dyn RoundStore>,
    cached_index: RwLock<Option<f64>>,
}

impl HandicapService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RoundStore>) -> Self {
        Self {
            store,
            cached_index: RwLock::new(None),
        }
    }

    /// Persist a submission, returning the stored round.
    ///
    /// The store rejects invalid submissions before persisting. A
    /// successful save invalidates the memoized handicap index; a
    /// rejected or failed submission leaves it untouched.
    pub async fn submit_round(&self, submission: NewRound) -> Result<Round> {
        let round = self.store.save(submission).await?;
        *self.cached_index.write().await = None;
        tracing::debug!(id = %round.id, "Round stored, handicap cache invalidated");
        Ok(round)
    }

    /// The current handicap index.
    ///
    /// Computed from the full round history on the first read after a
    /// submission, then served from memory. Store errors are returned
    /// as-is and never cached.
    pub async fn handicap(&self) -> Result<f64> {
        if let Some(value) = *self.cached_index.read().await {
            return Ok(value);
        }

        // The write lock is held across the store read so a submission
        // landing mid-computation cannot be shadowed by a stale value.
        let mut cached = self.cached_index.write().await;
        if let Some(value) = *cached {
            return Ok(value);
        }

        let rounds = self.store.find_all().await?;
        let value = handicap::handicap_index(&rounds);
        *cached = Some(value);
        tracing::debug!(rounds = rounds.len(), handicap = value, "Handicap recomputed");
        Ok(value)
    }

    /// The most recently played round, if any.
    pub async fn most_recent_round(&self) -> Result<Option<Round>> {
        self.store.find_most_recent().await
    }

    /// Number of stored rounds.
    pub async fn round_count(&self) -> Result<usize> {
        self.store.count().await
    }
}
