//! Leaderboard operation counters (feature `metrics`).
//!
//! Recording, snapshotting and export are split the same way as everywhere
//! else in the crate: [`LeaderboardMetrics`](metrics_impl::LeaderboardMetrics)
//! only writes counters, [`LeaderboardMetricsSnapshot`](snapshot::LeaderboardMetricsSnapshot)
//! is a plain copy of them, and [`PrometheusTextExporter`](exporter::PrometheusTextExporter)
//! publishes a snapshot.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
