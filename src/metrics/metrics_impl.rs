use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::LeaderboardMetricsSnapshot;
use crate::metrics::traits::{LeaderboardMetricsRecorder, MetricsReset};

/// Atomic counters for one leaderboard.
#[derive(Debug, Default)]
pub struct LeaderboardMetrics {
    inserts: AtomicU64,
    updates: AtomicU64,
    removes: AtomicU64,
    not_found: AtomicU64,
    rejected: AtomicU64,
    rank_queries: AtomicU64,
    top_k_queries: AtomicU64,
    snapshots: AtomicU64,
    batches: AtomicU64,
    batch_mutations: AtomicU64,
    batch_rollbacks: AtomicU64,
    loads: AtomicU64,
    loaded_entities: AtomicU64,
}

#[inline]
fn bump(counter: &AtomicU64, by: u64) {
    counter.fetch_add(by, Ordering::Relaxed);
}

impl LeaderboardMetrics {
    /// Copies the counters and attaches the given gauges.
    pub fn snapshot_with(&self, len: usize, tree_height: u32) -> LeaderboardMetricsSnapshot {
        LeaderboardMetricsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            rank_queries: self.rank_queries.load(Ordering::Relaxed),
            top_k_queries: self.top_k_queries.load(Ordering::Relaxed),
            snapshots: self.snapshots.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
            batch_mutations: self.batch_mutations.load(Ordering::Relaxed),
            batch_rollbacks: self.batch_rollbacks.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            loaded_entities: self.loaded_entities.load(Ordering::Relaxed),
            len,
            tree_height,
        }
    }
}

impl LeaderboardMetricsRecorder for LeaderboardMetrics {
    fn record_insert(&self) {
        bump(&self.inserts, 1);
    }

    fn record_update(&self) {
        bump(&self.updates, 1);
    }

    fn record_remove(&self) {
        bump(&self.removes, 1);
    }

    fn record_not_found(&self) {
        bump(&self.not_found, 1);
    }

    fn record_rejected(&self) {
        bump(&self.rejected, 1);
    }

    fn record_rank_query(&self) {
        bump(&self.rank_queries, 1);
    }

    fn record_top_k_query(&self) {
        bump(&self.top_k_queries, 1);
    }

    fn record_snapshot(&self) {
        bump(&self.snapshots, 1);
    }

    fn record_batch(&self, mutations: u64) {
        bump(&self.batches, 1);
        bump(&self.batch_mutations, mutations);
    }

    fn record_batch_rollback(&self) {
        bump(&self.batch_rollbacks, 1);
    }

    fn record_load(&self, entities: u64) {
        bump(&self.loads, 1);
        bump(&self.loaded_entities, entities);
    }
}

impl MetricsReset for LeaderboardMetrics {
    fn reset_metrics(&self) {
        for counter in [
            &self.inserts,
            &self.updates,
            &self.removes,
            &self.not_found,
            &self.rejected,
            &self.rank_queries,
            &self.top_k_queries,
            &self.snapshots,
            &self.batches,
            &self.batch_mutations,
            &self.batch_rollbacks,
            &self.loads,
            &self.loaded_entities,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
