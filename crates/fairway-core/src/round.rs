//! Domain types for recorded golf rounds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Unique identifier for a stored round.
///
/// Identifiers are assigned by the store on save, starting at 1 and
/// increasing monotonically for the lifetime of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub i64);

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RoundId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RoundId> for i64 {
    fn from(id: RoundId) -> Self {
        id.0
    }
}

/// A golf round as stored and returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Store-assigned identifier, unique within one store.
    pub id: RoundId,
    /// Strokes taken over the full round.
    pub score: i32,
    /// Difficulty rating of the course for a scratch golfer.
    pub course_rating: f64,
    /// Relative difficulty of the course for a bogey golfer.
    /// Never zero for a stored round.
    pub slope_rating: i32,
    /// When the round was played.
    pub played_at: DateTime<Utc>,
}

/// A round submission, before the store has assigned it an identifier.
///
/// Unknown fields in the wire representation are ignored, so a client
/// that sends an `id` does not get to pick one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRound {
    /// Strokes taken over the full round.
    pub score: i32,
    /// Difficulty rating of the course for a scratch golfer.
    pub course_rating: f64,
    /// Relative difficulty of the course for a bogey golfer.
    pub slope_rating: i32,
    /// When the round was played.
    pub played_at: DateTime<Utc>,
}

impl NewRound {
    /// Create a new round submission.
    #[must_use]
    pub fn new(
        score: i32,
        course_rating: f64,
        slope_rating: i32,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            score,
            course_rating,
            slope_rating,
            played_at,
        }
    }

    /// Check the submission for values the calculator cannot work with.
    ///
    /// A slope rating of zero is rejected because the handicap
    /// differential divides by it.
    pub fn validate(&self) -> Result<()> {
        if self.slope_rating == 0 {
            return Err(Error::validation("slope rating must not be zero"));
        }
        Ok(())
    }

    /// Attach a store-assigned identifier, producing a persistable round.
    #[must_use]
    pub fn into_round(self, id: RoundId) -> Round {
        Round {
            id,
            score: self.score,
            course_rating: self.course_rating,
            slope_rating: self.slope_rating,
            played_at: self.played_at,
        }
    }
}
