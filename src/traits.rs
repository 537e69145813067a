//! # Query Trait
//!
//! [`RankQuery`] is the read-only surface shared by [`Leaderboard`] and
//! [`ConcurrentLeaderboard`], so presentation code can be written once
//! against either.
//!
//! ```text
//!   ┌──────────────────────────────────────────────┐
//!   │                 RankQuery                    │
//!   │                                              │
//!   │  len / is_empty / contains / score_of        │
//!   │  rank_of(&str) → Option<usize>               │
//!   │  neighbors(&str) → Option<Neighbors>         │
//!   │  ordered_sequence() → Vec<Standing>          │
//!   │  top_k(usize) → Vec<Standing>                │
//!   │  snapshot_all_ranks() → RankSnapshot         │
//!   │  movement_since(&RankSnapshot)               │
//!   └───────────────┬───────────────────┬──────────┘
//!                   │                   │
//!                   ▼                   ▼
//!          Leaderboard (&self)   ConcurrentLeaderboard (read lock)
//! ```
//!
//! All methods return owned values. Mutations stay on the concrete types
//! because their receivers differ (`&mut self` vs `&self` behind a lock).
//!
//! ## Example Usage
//!
//! ```
//! use rankkit::store::leaderboard::Leaderboard;
//! use rankkit::traits::RankQuery;
//!
//! fn podium<Q: RankQuery>(board: &Q) -> Vec<String> {
//!     board.top_k(3).into_iter().map(|s| s.name.to_string()).collect()
//! }
//!
//! let mut board = Leaderboard::new();
//! board.add_or_update("a", 1).unwrap();
//! board.add_or_update("b", 2).unwrap();
//! assert_eq!(podium(&board), vec!["b", "a"]);
//! ```
//!
//! [`Leaderboard`]: crate::store::leaderboard::Leaderboard
//! [`ConcurrentLeaderboard`]: crate::store::concurrent::ConcurrentLeaderboard

#[cfg(feature = "concurrency")]
use crate::store::concurrent::ConcurrentLeaderboard;
use crate::movement::{MovementReport, RankSnapshot};
use crate::store::entity::Standing;
use crate::store::leaderboard::{Leaderboard, Neighbors};

/// Read-only ranking queries.
pub trait RankQuery {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, name: &str) -> bool;

    fn score_of(&self, name: &str) -> Option<i64>;

    /// 1-based rank, `None` if absent.
    fn rank_of(&self, name: &str) -> Option<usize>;

    fn neighbors(&self, name: &str) -> Option<Neighbors>;

    /// All entities, best first.
    fn ordered_sequence(&self) -> Vec<Standing>;

    /// The `min(k, len)` best entities; `k == 0` is treated as 1.
    fn top_k(&self, k: usize) -> Vec<Standing>;

    fn snapshot_all_ranks(&self) -> RankSnapshot;

    fn movement_since(&self, before: &RankSnapshot) -> MovementReport;
}

impl RankQuery for Leaderboard {
    fn len(&self) -> usize {
        Leaderboard::len(self)
    }

    fn contains(&self, name: &str) -> bool {
        Leaderboard::contains(self, name)
    }

    fn score_of(&self, name: &str) -> Option<i64> {
        Leaderboard::score_of(self, name)
    }

    fn rank_of(&self, name: &str) -> Option<usize> {
        Leaderboard::rank_of(self, name)
    }

    fn neighbors(&self, name: &str) -> Option<Neighbors> {
        Leaderboard::neighbors(self, name)
    }

    fn ordered_sequence(&self) -> Vec<Standing> {
        Leaderboard::ordered_sequence(self)
    }

    fn top_k(&self, k: usize) -> Vec<Standing> {
        Leaderboard::top_k(self, k)
    }

    fn snapshot_all_ranks(&self) -> RankSnapshot {
        Leaderboard::snapshot_all_ranks(self)
    }

    fn movement_since(&self, before: &RankSnapshot) -> MovementReport {
        Leaderboard::movement_since(self, before)
    }
}

#[cfg(feature = "concurrency")]
impl RankQuery for ConcurrentLeaderboard {
    fn len(&self) -> usize {
        ConcurrentLeaderboard::len(self)
    }

    fn contains(&self, name: &str) -> bool {
        ConcurrentLeaderboard::contains(self, name)
    }

    fn score_of(&self, name: &str) -> Option<i64> {
        ConcurrentLeaderboard::score_of(self, name)
    }

    fn rank_of(&self, name: &str) -> Option<usize> {
        ConcurrentLeaderboard::rank_of(self, name)
    }

    fn neighbors(&self, name: &str) -> Option<Neighbors> {
        ConcurrentLeaderboard::neighbors(self, name)
    }

    fn ordered_sequence(&self) -> Vec<Standing> {
        ConcurrentLeaderboard::ordered_sequence(self)
    }

    fn top_k(&self, k: usize) -> Vec<Standing> {
        ConcurrentLeaderboard::top_k(self, k)
    }

    fn snapshot_all_ranks(&self) -> RankSnapshot {
        ConcurrentLeaderboard::snapshot_all_ranks(self)
    }

    fn movement_since(&self, before: &RankSnapshot) -> MovementReport {
        ConcurrentLeaderboard::movement_since(self, before)
    }
}
