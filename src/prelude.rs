pub use crate::builder::{LeaderboardBuilder, LeaderboardConfig};
pub use crate::ds::{RankTree, SlotArena, SlotId, TopKSelector};
pub use crate::error::{ConfigError, InvariantError, LeaderboardError};
#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LeaderboardMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
pub use crate::movement::{
    Badge, BadgePolicy, MovementReport, RankChange, RankMovement, RankSnapshot,
};
#[cfg(feature = "concurrency")]
pub use crate::store::concurrent::ConcurrentLeaderboard;
pub use crate::store::entity::{EntityRecord, RankKey, Standing};
pub use crate::store::leaderboard::{
    Batch, Leaderboard, LeaderboardStats, Neighbors, Observation, Upsert,
};
pub use crate::store::persist::{LeaderboardExport, PersistedEntity};
pub use crate::traits::RankQuery;
