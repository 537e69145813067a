//! # Metrics Traits
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │ LeaderboardMetricsRecorder   │   written by Leaderboard operations
//!   │ record_insert/update/remove  │
//!   │ record_rank_query/top_k/...  │
//!   └──────────────┬───────────────┘
//!                  │
//!   ┌──────────────▼───────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │───►│ MetricsExporter<S>           │
//!   │ (tests, benches)             │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders take `&self` so read-only queries can count themselves.

/// Counters written by leaderboard operations.
pub trait LeaderboardMetricsRecorder {
    fn record_insert(&self);
    fn record_update(&self);
    fn record_remove(&self);
    fn record_not_found(&self);
    fn record_rejected(&self);
    fn record_rank_query(&self);
    fn record_top_k_query(&self);
    fn record_snapshot(&self);
    fn record_batch(&self, mutations: u64);
    fn record_batch_rollback(&self);
    fn record_load(&self, entities: u64);
}

/// Produce a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset counters between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Publish a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
