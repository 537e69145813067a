pub mod entity;
pub mod leaderboard;
pub mod persist;

#[cfg(feature = "concurrency")]
pub mod concurrent;

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentLeaderboard;
pub use entity::{EntityRecord, RankKey, Standing};
pub use leaderboard::{Batch, Leaderboard, LeaderboardStats, Neighbors, Observation, Upsert};
pub use persist::{LeaderboardExport, PersistedEntity};
