//! rankkit: ranked-index primitives for leaderboards.
//!
//! A [`Leaderboard`](store::leaderboard::Leaderboard) keeps named, scored
//! entities in a size-augmented AVL tree ordered by score (descending) and
//! name (ascending), so rank lookups, neighbors and top-k reads are
//! logarithmic. Batches of mutations produce a
//! [`MovementReport`](movement::MovementReport) with per-entity rank deltas
//! and badges.
//!
//! ## Modules
//! - [`ds`]: the generic building blocks (`RankTree`, `SlotArena`, `TopKSelector`).
//! - [`store`]: entity records, the leaderboard aggregate, persistence types and
//!   the thread-safe wrapper.
//! - [`movement`]: snapshots, diffs and badges.
//! - [`builder`], [`error`], [`traits`], and [`metrics`] (feature `metrics`).
//!
//! ```rust
//! use rankkit::prelude::*;
//!
//! let mut board = LeaderboardBuilder::new().default_top_k(2).build();
//! board.add_or_update("Kiran", 120).unwrap();
//! board.add_or_update("Raghavan", 130).unwrap();
//! board.add_or_update("Ada", 60).unwrap();
//!
//! let top: Vec<Standing> = board.top_k_default();
//! assert_eq!(top[0], Standing::new("Raghavan", 130));
//! assert_eq!(board.rank_of("Ada"), Some(3));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod movement;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
