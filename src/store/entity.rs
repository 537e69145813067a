//! Entity records and the rank-order key.
//!
//! ## Key Components
//!
//! - [`RankKey`]: `(score, name)` with the leaderboard total order: higher
//!   score first, equal scores by ascending name.
//! - [`EntityRecord`]: the single owned record per name (score, history,
//!   last observed rank). Lives in the leaderboard's arena.
//! - [`Standing`]: the `(name, score)` pair returned by queries.
//!
//! Names are `Arc<str>` so the arena record, the by-name map and the index
//! key share one allocation.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Index key: score descending, then name ascending.
///
/// # Example
///
/// ```
/// use rankkit::store::entity::RankKey;
///
/// let high = RankKey::new(130, "D");
/// let low = RankKey::new(120, "A");
/// assert!(high < low);
///
/// // Ties fall back to the name.
/// assert!(RankKey::new(50, "Amy") < RankKey::new(50, "Bob"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankKey {
    score: i64,
    name: Arc<str>,
}

impl RankKey {
    pub fn new(score: i64, name: impl Into<Arc<str>>) -> Self {
        Self {
            score,
            name: name.into(),
        }
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> &Arc<str> {
        &self.name
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.score)
    }
}

/// A `(name, score)` pair in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Standing {
    pub name: Arc<str>,
    pub score: i64,
}

impl Standing {
    pub fn new(name: impl Into<Arc<str>>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

impl From<&RankKey> for Standing {
    fn from(key: &RankKey) -> Self {
        Self {
            name: Arc::clone(&key.name),
            score: key.score,
        }
    }
}

impl<S: Into<Arc<str>>> From<(S, i64)> for Standing {
    fn from((name, score): (S, i64)) -> Self {
        Self::new(name, score)
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.score)
    }
}

/// The owned record for one tracked name.
///
/// `history` is chronological and its last element always equals `score`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    name: Arc<str>,
    score: i64,
    history: Vec<i64>,
    last_rank: Option<usize>,
}

impl EntityRecord {
    pub(crate) fn new(name: Arc<str>, score: i64) -> Self {
        Self {
            name,
            score,
            history: vec![score],
            last_rank: None,
        }
    }

    /// Rebuilds a record from persisted parts, repairing the history so it
    /// ends with `score`. Returns the record and whether a repair happened.
    pub(crate) fn restore(name: Arc<str>, score: i64, mut history: Vec<i64>) -> (Self, bool) {
        let repaired = history.last() != Some(&score);
        if repaired {
            history.push(score);
        }
        (
            Self {
                name,
                score,
                history,
                last_rank: None,
            },
            repaired,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn history(&self) -> &[i64] {
        &self.history
    }

    /// Rank recorded by the last movement pass or observation.
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn key(&self) -> RankKey {
        RankKey {
            score: self.score,
            name: Arc::clone(&self.name),
        }
    }

    pub fn standing(&self) -> Standing {
        Standing {
            name: Arc::clone(&self.name),
            score: self.score,
        }
    }

    pub(crate) fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    pub(crate) fn set_score(&mut self, score: i64) {
        self.score = score;
        self.history.push(score);
    }

    pub(crate) fn set_last_rank(&mut self, rank: Option<usize>) {
        self.last_rank = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_key_orders_score_desc_then_name_asc() {
        let mut keys = vec![
            RankKey::new(60, "E"),
            RankKey::new(120, "A"),
            RankKey::new(130, "D"),
            RankKey::new(120, "0"),
        ];
        keys.sort();
        let names: Vec<&str> = keys.iter().map(RankKey::name).collect();
        assert_eq!(names, vec!["D", "0", "A", "E"]);
    }

    #[test]
    fn rank_key_negative_scores() {
        assert!(RankKey::new(0, "z") < RankKey::new(-1, "a"));
        assert!(RankKey::new(-5, "a") < RankKey::new(-5, "b"));
    }

    #[test]
    fn entity_record_history_tracks_score() {
        let mut record = EntityRecord::new(Arc::from("amy"), 10);
        assert_eq!(record.history(), &[10]);
        record.set_score(15);
        record.set_score(15);
        assert_eq!(record.score(), 15);
        assert_eq!(record.history(), &[10, 15, 15]);
        assert_eq!(record.key(), RankKey::new(15, "amy"));
        assert_eq!(record.standing(), Standing::new("amy", 15));
    }

    #[test]
    fn entity_record_restore_repairs_history() {
        let (record, repaired) = EntityRecord::restore(Arc::from("a"), 7, vec![]);
        assert!(repaired);
        assert_eq!(record.history(), &[7]);

        let (record, repaired) = EntityRecord::restore(Arc::from("a"), 7, vec![3, 5]);
        assert!(repaired);
        assert_eq!(record.history(), &[3, 5, 7]);

        let (record, repaired) = EntityRecord::restore(Arc::from("a"), 7, vec![3, 7]);
        assert!(!repaired);
        assert_eq!(record.history(), &[3, 7]);
    }

    #[test]
    fn standing_display() {
        assert_eq!(Standing::new("Kiran", 120).to_string(), "Kiran (120)");
        assert_eq!(Standing::from(("x", 1)), Standing::new("x", 1));
    }
}
