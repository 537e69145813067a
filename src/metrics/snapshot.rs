use std::fmt;

/// Point-in-time copy of leaderboard counters plus gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardMetricsSnapshot {
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
    pub not_found: u64,
    pub rejected: u64,

    pub rank_queries: u64,
    pub top_k_queries: u64,
    pub snapshots: u64,

    pub batches: u64,
    pub batch_mutations: u64,
    pub batch_rollbacks: u64,

    pub loads: u64,
    pub loaded_entities: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub tree_height: u32,
}

impl fmt::Display for LeaderboardMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LeaderboardMetrics {{ len: {}, height: {}, inserts: {}, updates: {}, removes: {}, \
             not_found: {}, rejected: {}, rank_queries: {}, top_k_queries: {}, batches: {} }}",
            self.len,
            self.tree_height,
            self.inserts,
            self.updates,
            self.removes,
            self.not_found,
            self.rejected,
            self.rank_queries,
            self.top_k_queries,
            self.batches,
        )
    }
}
