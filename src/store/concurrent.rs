//! Thread-safe leaderboard handle.
//!
//! ## Architecture
//!
//! ```text
//!   ConcurrentLeaderboard (Clone)
//!          │
//!          ▼
//!   Arc<RwLock<Leaderboard>>
//!          │
//!          ├── write lock: add_or_update, remove, apply_batch, observe, load
//!          └── read lock:  rank_of, top_k, neighbors, ordered_sequence, ...
//! ```
//!
//! Every call takes the lock once, so each mutation (and each whole batch) is
//! atomic to readers. Queries return owned values; use [`read`](ConcurrentLeaderboard::read)
//! when several answers must come from the same state.
//!
//! ## Example Usage
//! ```rust
//! use std::thread;
//!
//! use rankkit::store::concurrent::ConcurrentLeaderboard;
//!
//! let board = ConcurrentLeaderboard::new();
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let board = board.clone();
//!         thread::spawn(move || {
//!             board.add_or_update(&format!("player-{}", t), t * 10).unwrap();
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(board.len(), 4);
//! assert_eq!(board.rank_of("player-3"), Some(1));
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::builder::{LeaderboardBuilder, LeaderboardConfig};
use crate::error::{InvariantError, LeaderboardError};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LeaderboardMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::movement::{MovementReport, RankSnapshot};
use crate::store::entity::{EntityRecord, Standing};
use crate::store::leaderboard::{
    Batch, Leaderboard, LeaderboardStats, Neighbors, Observation, Upsert,
};
use crate::store::persist::LeaderboardExport;

/// Shared, lock-protected [`Leaderboard`]. Clones share the same board.
#[derive(Debug, Clone, Default)]
pub struct ConcurrentLeaderboard {
    inner: Arc<RwLock<Leaderboard>>,
}

impl ConcurrentLeaderboard {
    pub fn new() -> Self {
        Self::from_leaderboard(Leaderboard::new())
    }

    pub fn with_config(config: LeaderboardConfig) -> Self {
        Self::from_leaderboard(Leaderboard::with_config(config))
    }

    pub fn from_leaderboard(board: Leaderboard) -> Self {
        Self {
            inner: Arc::new(RwLock::new(board)),
        }
    }

    /// Returns a builder; finish with
    /// [`try_build_concurrent`](LeaderboardBuilder::try_build_concurrent).
    pub fn builder() -> LeaderboardBuilder {
        LeaderboardBuilder::new()
    }

    /// Unwraps the board if this is the last handle.
    pub fn try_into_inner(self) -> Result<Leaderboard, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock.into_inner()),
            Err(inner) => Err(Self { inner }),
        }
    }

    /// Runs `f` under one read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Leaderboard) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` under one write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Leaderboard) -> R) -> R {
        f(&mut self.inner.write())
    }

    // -- mutations -----------------------------------------------------------

    pub fn add_or_update(&self, name: &str, score: i64) -> Result<Upsert, LeaderboardError> {
        self.inner.write().add_or_update(name, score)
    }

    pub fn adjust_score(&self, name: &str, delta: i64) -> Result<Upsert, LeaderboardError> {
        self.inner.write().adjust_score(name, delta)
    }

    pub fn remove(&self, name: &str) -> Result<EntityRecord, LeaderboardError> {
        self.inner.write().remove(name)
    }

    /// Holds the write lock for the whole batch, diff included.
    pub fn apply_batch<F>(&self, f: F) -> Result<MovementReport, LeaderboardError>
    where
        F: FnOnce(&mut Batch<'_>) -> Result<(), LeaderboardError>,
    {
        self.inner.write().apply_batch(f)
    }

    pub fn observe(&self, name: &str) -> Option<Observation> {
        self.inner.write().observe(name)
    }

    pub fn commit_ranks(&self) {
        self.inner.write().commit_ranks();
    }

    pub fn load(&self, export: LeaderboardExport) -> Result<usize, LeaderboardError> {
        self.inner.write().load(export)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    // -- queries -------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains(name)
    }

    /// Cloned record for `name`.
    pub fn get(&self, name: &str) -> Option<EntityRecord> {
        self.inner.read().get(name).cloned()
    }

    pub fn score_of(&self, name: &str) -> Option<i64> {
        self.inner.read().score_of(name)
    }

    pub fn history_of(&self, name: &str) -> Option<Vec<i64>> {
        self.inner.read().history_of(name).map(<[i64]>::to_vec)
    }

    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.inner.read().rank_of(name)
    }

    pub fn neighbors(&self, name: &str) -> Option<Neighbors> {
        self.inner.read().neighbors(name)
    }

    pub fn entity_at_rank(&self, rank: usize) -> Option<Standing> {
        self.inner.read().entity_at_rank(rank)
    }

    pub fn window_around(&self, name: &str, radius: usize) -> Option<Vec<(usize, Standing)>> {
        self.inner.read().window_around(name, radius)
    }

    pub fn ordered_sequence(&self) -> Vec<Standing> {
        self.inner.read().ordered_sequence()
    }

    pub fn top_k(&self, k: usize) -> Vec<Standing> {
        self.inner.read().top_k(k)
    }

    pub fn try_top_k(&self, k: usize) -> Result<Vec<Standing>, LeaderboardError> {
        self.inner.read().try_top_k(k)
    }

    pub fn top_k_indexed(&self, k: usize) -> Vec<Standing> {
        self.inner.read().top_k_indexed(k)
    }

    pub fn top_k_default(&self) -> Vec<Standing> {
        self.inner.read().top_k_default()
    }

    pub fn search(&self, query: &str) -> Vec<(usize, Standing)> {
        self.inner.read().search(query)
    }

    pub fn stats(&self) -> LeaderboardStats {
        self.inner.read().stats()
    }

    pub fn snapshot_all_ranks(&self) -> RankSnapshot {
        self.inner.read().snapshot_all_ranks()
    }

    pub fn movement_since(&self, before: &RankSnapshot) -> MovementReport {
        self.inner.read().movement_since(before)
    }

    pub fn export(&self) -> LeaderboardExport {
        self.inner.read().export()
    }

    pub fn config(&self) -> LeaderboardConfig {
        *self.inner.read().config()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

#[cfg(feature = "metrics")]
impl ConcurrentLeaderboard {
    pub fn metrics_snapshot(&self) -> LeaderboardMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<LeaderboardMetricsSnapshot> for ConcurrentLeaderboard {
    fn snapshot(&self) -> LeaderboardMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl From<Leaderboard> for ConcurrentLeaderboard {
    fn from(board: Leaderboard) -> Self {
        Self::from_leaderboard(board)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn concurrent_clones_share_state() {
        let board = ConcurrentLeaderboard::new();
        let other = board.clone();
        board.add_or_update("a", 1).unwrap();
        assert_eq!(other.score_of("a"), Some(1));
        assert!(board.try_into_inner().is_err());
    }

    #[test]
    fn concurrent_try_into_inner_last_handle() {
        let board = ConcurrentLeaderboard::new();
        board.add_or_update("a", 1).unwrap();
        let inner = board.try_into_inner().unwrap();
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn concurrent_top_k_unbounded_returns_everyone() {
        let board = ConcurrentLeaderboard::new();
        board.add_or_update("a", 1).unwrap();
        board.add_or_update("b", 2).unwrap();
        let top = board.top_k(usize::MAX);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], Standing::new("b", 2));
    }

    #[test]
    fn concurrent_read_gives_consistent_view() {
        let board = ConcurrentLeaderboard::new();
        for (name, score) in [("a", 3), ("b", 2), ("c", 1)] {
            board.add_or_update(name, score).unwrap();
        }
        let (rank, top) = board.read(|lb| (lb.rank_of("b"), lb.top_k(1)));
        assert_eq!(rank, Some(2));
        assert_eq!(top, vec![Standing::new("a", 3)]);
    }

    #[test]
    fn concurrent_writers_keep_index_consistent() {
        let board = ConcurrentLeaderboard::new();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let board = board.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let name = format!("t{}-{}", t, i % 10);
                        board.add_or_update(&name, i).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(board.len(), 40);
        board.check_invariants().unwrap();
    }

    #[test]
    fn concurrent_failed_batch_rolls_back() {
        let board = ConcurrentLeaderboard::new();
        board.add_or_update("a", 1).unwrap();
        let result = board.apply_batch(|batch| {
            batch.add_or_update("a", 50)?;
            batch.remove("missing")?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(board.score_of("a"), Some(1));
        assert_eq!(board.history_of("a"), Some(vec![1]));
    }
}
