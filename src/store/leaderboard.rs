//! The leaderboard aggregate: entity records plus the ranked index.
//!
//! ## Architecture
//!
//! ```text
//!   by_name: FxHashMap<Arc<str>, SlotId>        records: SlotArena<EntityRecord>
//!   ┌──────────────┬────────┐                   ┌──────┬──────────────────────────┐
//!   │ "Raghavan"   │ #2     │ ────────────────► │ #2   │ Raghavan 130 [130]       │
//!   │ "Kiran"      │ #0     │ ────────────────► │ #0   │ Kiran 120 [100, 120]     │
//!   │ "Ada"        │ #1     │ ────────────────► │ #1   │ Ada 60 [60]              │
//!   └──────────────┴────────┘                   └──────┴──────────────────────────┘
//!                                                   ▲
//!   index: RankTree<RankKey, SlotId>                │ payload
//!                     (130, Raghavan) ──────────────┘
//!                    /               \
//!          (120, Kiran)              (60, Ada)
//! ```
//!
//! The three structures hold one entry per live name and are updated together
//! inside a single `&mut self` call, so no query observes a record whose score
//! differs from its index key. A score change removes the old key and inserts
//! the new one; the index never holds two keys for one name.
//!
//! ## Core Operations
//! - `add_or_update` / `adjust_score` / `remove`: mutations, `Result` on bad input.
//! - `rank_of`, `neighbors`, `entity_at_rank`, `window_around`: O(log n) via
//!   subtree sizes.
//! - `top_k`: bounded selector over the records; `top_k_indexed` reads the index
//!   prefix instead. Both return the same list.
//! - `apply_batch`: snapshot, mutate, diff, record `last_rank`. All or nothing.
//! - `export` / `load`: persisted `[name, {score, history}]` form.
//!
//! ## Example Usage
//! ```rust
//! use rankkit::store::leaderboard::Leaderboard;
//!
//! let mut board = Leaderboard::new();
//! board.add_or_update("A", 100).unwrap();
//! board.add_or_update("D", 130).unwrap();
//! board.add_or_update("E", 60).unwrap();
//! board.add_or_update("A", 120).unwrap();
//!
//! let names: Vec<String> = board
//!     .ordered_sequence()
//!     .into_iter()
//!     .map(|s| s.name.to_string())
//!     .collect();
//! assert_eq!(names, vec!["D", "A", "E"]);
//! assert_eq!(board.rank_of("A"), Some(2));
//! assert_eq!(board.history_of("A").unwrap(), &[100, 120]);
//! ```
//!
//! ## Thread Safety
//! `Leaderboard` is single-threaded; wrap it in
//! [`ConcurrentLeaderboard`](crate::store::concurrent::ConcurrentLeaderboard)
//! to share it.

use std::sync::Arc;

use log::{debug, trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::builder::LeaderboardConfig;
use crate::ds::rank_tree::RankTree;
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::ds::top_k::TopKSelector;
use crate::error::{InvariantError, LeaderboardError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LeaderboardMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LeaderboardMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{LeaderboardMetricsRecorder, MetricsReset, MetricsSnapshotProvider};
use crate::movement::{MovementReport, RankChange, RankSnapshot, diff_ranked};
use crate::store::entity::{EntityRecord, RankKey, Standing};
use crate::store::persist::{LeaderboardExport, PersistedEntity};

/// Outcome of a successful `add_or_update` / `adjust_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upsert {
    /// `true` if the name was not on the board before.
    pub created: bool,
    pub previous_score: Option<i64>,
    pub score: i64,
    /// Rank after the mutation.
    pub rank: usize,
}

/// The entities directly above and below a name in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Neighbors {
    /// Rank `r - 1`; `None` at rank 1.
    pub above: Option<Standing>,
    /// Rank `r + 1`; `None` at the last rank.
    pub below: Option<Standing>,
}

/// Single-entity view returned by [`Leaderboard::observe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub rank: usize,
    pub standing: Standing,
    pub neighbors: Neighbors,
    /// Movement since the previously recorded rank.
    pub change: RankChange,
    pub history: Vec<i64>,
}

/// Aggregate figures over all scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeaderboardStats {
    pub count: usize,
    pub total: i128,
    /// Mean rounded to the nearest integer, halves toward +∞.
    pub average: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Ranked set of named, scored entities.
#[derive(Debug)]
pub struct Leaderboard {
    records: SlotArena<EntityRecord>,
    by_name: FxHashMap<Arc<str>, SlotId>,
    index: RankTree<RankKey, SlotId>,
    config: LeaderboardConfig,
    #[cfg(feature = "metrics")]
    metrics: LeaderboardMetrics,
}

impl Leaderboard {
    /// Creates an empty board with default settings.
    pub fn new() -> Self {
        Self::with_config(LeaderboardConfig::default())
    }

    /// Creates an empty board from `config`.
    ///
    /// `config.capacity` is only a pre-allocation hint: if the reservation
    /// cannot be satisfied the board starts unallocated and grows on demand.
    pub fn with_config(config: LeaderboardConfig) -> Self {
        let mut by_name = FxHashMap::default();
        if by_name.try_reserve(config.capacity).is_err() {
            warn!(
                "capacity hint {} cannot be reserved; starting unallocated",
                config.capacity
            );
        }
        Self {
            records: SlotArena::with_capacity(config.capacity),
            by_name,
            index: RankTree::new(),
            config,
            #[cfg(feature = "metrics")]
            metrics: LeaderboardMetrics::default(),
        }
    }

    /// Builds a board from persisted contents.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::InvalidInput`] if any name is empty.
    pub fn from_export(export: LeaderboardExport) -> Result<Self, LeaderboardError> {
        let mut board = Self::new();
        board.load(export)?;
        Ok(board)
    }

    pub fn config(&self) -> &LeaderboardConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Inserts `name` with `score`, or replaces its score if present.
    ///
    /// Every call appends `score` to the entity's history, even when the score
    /// is unchanged; the index is only touched when the score differs.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::InvalidInput`] for an empty name.
    pub fn add_or_update(&mut self, name: &str, score: i64) -> Result<Upsert, LeaderboardError> {
        if name.is_empty() {
            #[cfg(feature = "metrics")]
            self.metrics.record_rejected();
            return Err(LeaderboardError::empty_name());
        }

        if let Some(&id) = self.by_name.get(name)
            && let Some(record) = self.records.get_mut(id)
        {
            let previous = record.score();
            let old_key = record.key();
            record.set_score(score);
            let key = record.key();
            if previous != score {
                self.index.remove(&old_key);
                self.index.insert(key.clone(), id);
                trace!("repositioned {} from {} to {}", name, previous, score);
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_update();
            return Ok(Upsert {
                created: false,
                previous_score: Some(previous),
                score,
                rank: self.index.count_before(&key) + 1,
            });
        }

        // A name mapped to a vacant slot is stale; drop it and recreate.
        self.by_name.remove(name);
        let key = self.attach(EntityRecord::new(Arc::from(name), score));
        debug!("created entity {} with score {}", name, score);
        #[cfg(feature = "metrics")]
        self.metrics.record_insert();
        Ok(Upsert {
            created: true,
            previous_score: None,
            score,
            rank: self.index.count_before(&key) + 1,
        })
    }

    /// Adds `delta` to the current score of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NotFound`] if `name` is absent and
    /// [`LeaderboardError::InvalidParameter`] if the new score overflows.
    pub fn adjust_score(&mut self, name: &str, delta: i64) -> Result<Upsert, LeaderboardError> {
        let Some(current) = self.score_of(name) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_not_found();
            return Err(LeaderboardError::not_found(name));
        };
        let Some(score) = current.checked_add(delta) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_rejected();
            return Err(LeaderboardError::InvalidParameter(format!(
                "score overflow: {} + {} for {}",
                current, delta, name
            )));
        };
        self.add_or_update(name, score)
    }

    /// Removes `name` and returns its record.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NotFound`] if `name` is absent. The board is
    /// left unchanged.
    pub fn remove(&mut self, name: &str) -> Result<EntityRecord, LeaderboardError> {
        match self.detach(name) {
            Some(record) => {
                debug!("removed entity {} with score {}", name, record.score());
                #[cfg(feature = "metrics")]
                self.metrics.record_remove();
                Ok(record)
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_not_found();
                Err(LeaderboardError::not_found(name))
            },
        }
    }

    /// Drops every entity.
    pub fn clear(&mut self) {
        self.records.clear();
        self.by_name.clear();
        self.index.clear();
    }

    /// Drops every entity and zeroes the operation counters.
    pub fn reset(&mut self) {
        let dropped = self.len();
        self.clear();
        #[cfg(feature = "metrics")]
        self.metrics.reset_metrics();
        debug!("reset leaderboard, dropped {} entities", dropped);
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        let id = *self.by_name.get(name)?;
        self.records.get(id)
    }

    pub fn score_of(&self, name: &str) -> Option<i64> {
        self.get(name).map(EntityRecord::score)
    }

    pub fn history_of(&self, name: &str) -> Option<&[i64]> {
        self.get(name).map(EntityRecord::history)
    }

    /// Height of the ranked index.
    pub fn index_height(&self) -> u32 {
        self.index.height()
    }

    // -----------------------------------------------------------------------
    // Ordered queries
    // -----------------------------------------------------------------------

    /// All entities, best first.
    pub fn ordered_sequence(&self) -> Vec<Standing> {
        self.standings().collect()
    }

    /// Lazily walks all entities, best first.
    pub fn standings(&self) -> impl ExactSizeIterator<Item = Standing> + '_ {
        self.index.iter().map(|(key, _)| Standing::from(key))
    }

    /// 1-based rank of `name`, or `None` if absent.
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_rank_query();
        let record = self.get(name)?;
        self.index.rank(&record.key())
    }

    pub fn entity_at_rank(&self, rank: usize) -> Option<Standing> {
        self.index.select(rank).map(|(key, _)| Standing::from(key))
    }

    pub fn neighbors(&self, name: &str) -> Option<Neighbors> {
        let rank = self.rank_of(name)?;
        Some(self.neighbors_at(rank))
    }

    fn neighbors_at(&self, rank: usize) -> Neighbors {
        Neighbors {
            above: rank.checked_sub(1).and_then(|r| self.entity_at_rank(r)),
            below: self.entity_at_rank(rank + 1),
        }
    }

    /// Standings from `rank - radius` to `rank + radius` around `name`,
    /// clipped to the board, each paired with its rank.
    pub fn window_around(&self, name: &str, radius: usize) -> Option<Vec<(usize, Standing)>> {
        let rank = self.rank_of(name)?;
        let start = rank.saturating_sub(radius).max(1);
        let end = rank.saturating_add(radius);
        let window = self
            .index
            .range_by_rank(start, end - start + 1)
            .enumerate()
            .map(|(offset, (key, _))| (start + offset, Standing::from(key)))
            .collect();
        Some(window)
    }

    /// The `k` best entities, best first. `k == 0` is treated as 1.
    ///
    /// Runs a bounded selector over the records: O(n log k).
    pub fn top_k(&self, k: usize) -> Vec<Standing> {
        #[cfg(feature = "metrics")]
        self.metrics.record_top_k_query();
        let k = k.min(self.len());
        TopKSelector::select(k, self.records.iter().map(|(_, record)| record.key()))
            .into_sorted_vec()
            .iter()
            .map(Standing::from)
            .collect()
    }

    /// Like [`top_k`](Self::top_k), but rejects `k == 0`.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::InvalidParameter`] if `k == 0`.
    pub fn try_top_k(&self, k: usize) -> Result<Vec<Standing>, LeaderboardError> {
        if k == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_rejected();
            return Err(LeaderboardError::InvalidParameter(
                "k must be >= 1".to_string(),
            ));
        }
        Ok(self.top_k(k))
    }

    /// The `k` best entities read from the index prefix: O(log n + k).
    pub fn top_k_indexed(&self, k: usize) -> Vec<Standing> {
        #[cfg(feature = "metrics")]
        self.metrics.record_top_k_query();
        self.index
            .iter()
            .take(k.max(1))
            .map(|(key, _)| Standing::from(key))
            .collect()
    }

    /// `top_k` with the configured default size.
    pub fn top_k_default(&self) -> Vec<Standing> {
        self.top_k(self.config.default_top_k)
    }

    /// Case-insensitive substring match on names, in rank order.
    pub fn search(&self, query: &str) -> Vec<(usize, Standing)> {
        let needle = query.to_lowercase();
        self.index
            .iter()
            .enumerate()
            .filter(|(_, (key, _))| key.name().to_lowercase().contains(&needle))
            .map(|(idx, (key, _))| (idx + 1, Standing::from(key)))
            .collect()
    }

    pub fn stats(&self) -> LeaderboardStats {
        let count = self.len();
        let total: i128 = self.index.iter().map(|(key, _)| i128::from(key.score())).sum();
        let average = if count == 0 {
            None
        } else {
            let n = count as i128;
            i64::try_from((2 * total + n).div_euclid(2 * n)).ok()
        };
        LeaderboardStats {
            count,
            total,
            average,
            min: self.index.last().map(|(key, _)| key.score()),
            max: self.index.first().map(|(key, _)| key.score()),
        }
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    /// Captures every entity's current rank in one in-order pass.
    pub fn snapshot_all_ranks(&self) -> RankSnapshot {
        #[cfg(feature = "metrics")]
        self.metrics.record_snapshot();
        RankSnapshot::from_ordered(self.index.iter().map(|(key, _)| Arc::clone(key.shared_name())))
    }

    /// Diffs `before` against the current order.
    pub fn movement_since(&self, before: &RankSnapshot) -> MovementReport {
        diff_ranked(
            before,
            self.index
                .iter()
                .enumerate()
                .map(|(idx, (key, _))| (key.shared_name(), idx + 1)),
            &self.config.badge_policy,
        )
    }

    /// Stores the current rank as every entity's `last_rank`.
    pub fn commit_ranks(&mut self) {
        for (idx, (_, id)) in self.index.iter().enumerate() {
            if let Some(record) = self.records.get_mut(*id) {
                record.set_last_rank(Some(idx + 1));
            }
        }
    }

    /// Runs a batch of mutations and reports how every rank moved.
    ///
    /// The closure sees a [`Batch`] handle. If it returns an error, every
    /// mutation it already applied is undone and the error is returned; the
    /// board, including histories and recorded ranks, is as before the call.
    ///
    /// # Example
    ///
    /// ```
    /// use rankkit::movement::Badge;
    /// use rankkit::store::leaderboard::Leaderboard;
    ///
    /// let mut board = Leaderboard::new();
    /// for (name, score) in [("a", 50), ("b", 40), ("c", 30), ("d", 20)] {
    ///     board.add_or_update(name, score).unwrap();
    /// }
    /// let report = board
    ///     .apply_batch(|batch| {
    ///         batch.add_or_update("d", 100)?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    /// let d = report.get("d").unwrap();
    /// assert_eq!((d.old_rank, d.new_rank, d.delta), (Some(4), 1, Some(3)));
    /// assert_eq!(d.badges, vec![Badge::Top1, Badge::FastClimber]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the first error produced inside the closure.
    pub fn apply_batch<F>(&mut self, f: F) -> Result<MovementReport, LeaderboardError>
    where
        F: FnOnce(&mut Batch<'_>) -> Result<(), LeaderboardError>,
    {
        let before = self.snapshot_all_ranks();
        let mut batch = Batch::new(self);
        if let Err(err) = f(&mut batch) {
            let undone = batch.rollback();
            debug!("batch failed ({}), rolled back {} entities", err, undone);
            #[cfg(feature = "metrics")]
            self.metrics.record_batch_rollback();
            return Err(err);
        }
        let mutations = batch.finish();

        let report = self.movement_since(&before);
        self.commit_ranks();
        trace!(
            "batch applied {} mutations, {} ranked, {} departed",
            mutations,
            report.len(),
            report.departed().len()
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_batch(mutations);
        Ok(report)
    }

    /// Reports `name`'s current view and records its rank as `last_rank`.
    ///
    /// `change` compares against the rank recorded by the previous call (or
    /// batch); the first observation reports [`RankChange::New`].
    pub fn observe(&mut self, name: &str) -> Option<Observation> {
        let id = *self.by_name.get(name)?;
        let key = self.records.get(id)?.key();
        let rank = self.index.rank(&key)?;
        let neighbors = self.neighbors_at(rank);

        let record = self.records.get_mut(id)?;
        let delta = record.last_rank().map(|old| old as i64 - rank as i64);
        record.set_last_rank(Some(rank));
        Some(Observation {
            rank,
            standing: record.standing(),
            neighbors,
            change: RankChange::from_delta(delta),
            history: record.history().to_vec(),
        })
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Board contents in rank order.
    pub fn export(&self) -> LeaderboardExport {
        self.index
            .iter()
            .filter_map(|(_, id)| self.records.get(*id))
            .map(|record| {
                (
                    record.name(),
                    PersistedEntity::new(record.score(), record.history().to_vec()),
                )
            })
            .collect()
    }

    /// Replaces the board contents with `export` and returns the new length.
    ///
    /// Histories that do not end with the score get it appended. For
    /// duplicate names the last entry wins.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::InvalidInput`] if any name is empty;
    /// nothing is loaded in that case.
    pub fn load(&mut self, export: LeaderboardExport) -> Result<usize, LeaderboardError> {
        if export.iter().any(|(name, _)| name.is_empty()) {
            #[cfg(feature = "metrics")]
            self.metrics.record_rejected();
            return Err(LeaderboardError::empty_name());
        }

        self.clear();
        for (name, entity) in export.entries {
            if self.detach(&name).is_some() {
                debug!("duplicate entity {} in load input, keeping the later one", name);
            }
            let (record, repaired) = EntityRecord::restore(Arc::from(name), entity.score, entity.history);
            if repaired {
                warn!(
                    "history of {} did not end with score {}, repaired",
                    record.name(),
                    record.score()
                );
            }
            self.attach(record);
        }

        let loaded = self.len();
        debug!("loaded {} entities", loaded);
        #[cfg(feature = "metrics")]
        self.metrics.record_load(loaded as u64);
        Ok(loaded)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Links a record into all three structures. The name must be absent.
    fn attach(&mut self, record: EntityRecord) -> RankKey {
        let key = record.key();
        let name = Arc::clone(record.shared_name());
        let id = self.records.insert(record);
        self.by_name.insert(name, id);
        self.index.insert(key.clone(), id);
        key
    }

    /// Unlinks `name` from all three structures, index first.
    fn detach(&mut self, name: &str) -> Option<EntityRecord> {
        let id = *self.by_name.get(name)?;
        if let Some(record) = self.records.get(id) {
            self.index.remove(&record.key());
        }
        self.by_name.remove(name);
        self.records.remove(id)
    }

    /// Verifies the index structure and its agreement with the records.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.index.check_invariants()?;
        if self.index.len() != self.by_name.len() || self.records.len() != self.by_name.len() {
            return Err(InvariantError::new(format!(
                "size mismatch: index {} names {} records {}",
                self.index.len(),
                self.by_name.len(),
                self.records.len()
            )));
        }
        for (name, &id) in &self.by_name {
            let Some(record) = self.records.get(id) else {
                return Err(InvariantError::new(format!("{} maps to a vacant slot", name)));
            };
            if record.name() != &**name {
                return Err(InvariantError::new(format!(
                    "{} maps to the record of {}",
                    name,
                    record.name()
                )));
            }
            if record.history().last() != Some(&record.score()) {
                return Err(InvariantError::new(format!(
                    "history of {} does not end with its score",
                    name
                )));
            }
            if self.index.get(&record.key()) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index has no entry for {} at score {}",
                    name,
                    record.score()
                )));
            }
        }
        Ok(())
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "metrics")]
impl Leaderboard {
    pub fn metrics_snapshot(&self) -> LeaderboardMetricsSnapshot {
        self.metrics.snapshot_with(self.len(), self.index.height())
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<LeaderboardMetricsSnapshot> for Leaderboard {
    fn snapshot(&self) -> LeaderboardMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Mutation handle passed to [`Leaderboard::apply_batch`].
///
/// Records the pre-batch state of every name it touches so a failed batch
/// can be undone.
pub struct Batch<'a> {
    board: &'a mut Leaderboard,
    touched: FxHashSet<Arc<str>>,
    undo: Vec<(Arc<str>, Option<EntityRecord>)>,
    mutations: u64,
}

impl<'a> Batch<'a> {
    fn new(board: &'a mut Leaderboard) -> Self {
        Self {
            board,
            touched: FxHashSet::default(),
            undo: Vec::new(),
            mutations: 0,
        }
    }

    /// Read access to the board mid-batch.
    pub fn board(&self) -> &Leaderboard {
        &*self.board
    }

    pub fn add_or_update(&mut self, name: &str, score: i64) -> Result<Upsert, LeaderboardError> {
        self.remember(name);
        let upsert = self.board.add_or_update(name, score)?;
        self.mutations += 1;
        Ok(upsert)
    }

    pub fn adjust_score(&mut self, name: &str, delta: i64) -> Result<Upsert, LeaderboardError> {
        self.remember(name);
        let upsert = self.board.adjust_score(name, delta)?;
        self.mutations += 1;
        Ok(upsert)
    }

    pub fn remove(&mut self, name: &str) -> Result<EntityRecord, LeaderboardError> {
        self.remember(name);
        let record = self.board.remove(name)?;
        self.mutations += 1;
        Ok(record)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.board.contains(name)
    }

    pub fn score_of(&self, name: &str) -> Option<i64> {
        self.board.score_of(name)
    }

    pub fn len(&self) -> usize {
        self.board.len()
    }

    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }

    fn remember(&mut self, name: &str) {
        if name.is_empty() || self.touched.contains(name) {
            return;
        }
        let name: Arc<str> = Arc::from(name);
        let prior = self.board.get(&name).cloned();
        self.touched.insert(Arc::clone(&name));
        self.undo.push((name, prior));
    }

    fn finish(self) -> u64 {
        self.mutations
    }

    /// Restores every touched name to its pre-batch record.
    fn rollback(self) -> usize {
        let undone = self.undo.len();
        for (name, prior) in self.undo.into_iter().rev() {
            self.board.detach(&name);
            if let Some(record) = prior {
                self.board.attach(record);
            }
        }
        undone
    }
}
