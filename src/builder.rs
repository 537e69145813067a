//! Leaderboard configuration and builder.
//!
//! ## Example
//!
//! ```rust
//! use rankkit::builder::LeaderboardBuilder;
//!
//! let mut board = LeaderboardBuilder::new()
//!     .capacity(1_000)
//!     .fast_climber_threshold(5)
//!     .default_top_k(3)
//!     .build();
//! board.add_or_update("amy", 10).unwrap();
//! assert_eq!(board.config().default_top_k, 3);
//! ```

use crate::error::ConfigError;
use crate::movement::{BadgePolicy, DEFAULT_FAST_CLIMBER_THRESHOLD, DEFAULT_TOP_TEN_CUTOFF};
#[cfg(feature = "concurrency")]
use crate::store::concurrent::ConcurrentLeaderboard;
use crate::store::leaderboard::Leaderboard;

/// Number of entries returned by [`Leaderboard::top_k_default`].
pub const DEFAULT_TOP_K: usize = 5;

/// Resolved leaderboard settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardConfig {
    /// Pre-allocation hint for the record arena and name map.
    pub capacity: usize,
    pub badge_policy: BadgePolicy,
    pub default_top_k: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            badge_policy: BadgePolicy::default(),
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

/// Builder for [`Leaderboard`] and [`ConcurrentLeaderboard`].
#[derive(Debug, Clone)]
pub struct LeaderboardBuilder {
    capacity: usize,
    top_ten_cutoff: usize,
    fast_climber_threshold: usize,
    default_top_k: usize,
}

impl LeaderboardBuilder {
    pub fn new() -> Self {
        Self {
            capacity: 0,
            top_ten_cutoff: DEFAULT_TOP_TEN_CUTOFF,
            fast_climber_threshold: DEFAULT_FAST_CLIMBER_THRESHOLD,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    /// Pre-allocates room for `capacity` entities. Not a hard limit, and a
    /// request that cannot be reserved is dropped rather than rejected.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn top_ten_cutoff(mut self, cutoff: usize) -> Self {
        self.top_ten_cutoff = cutoff;
        self
    }

    pub fn fast_climber_threshold(mut self, threshold: usize) -> Self {
        self.fast_climber_threshold = threshold;
        self
    }

    pub fn badge_policy(mut self, policy: BadgePolicy) -> Self {
        self.top_ten_cutoff = policy.top_ten_cutoff();
        self.fast_climber_threshold = policy.fast_climber_threshold();
        self
    }

    pub fn default_top_k(mut self, k: usize) -> Self {
        self.default_top_k = k;
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a badge threshold or `default_top_k` is 0.
    pub fn try_config(&self) -> Result<LeaderboardConfig, ConfigError> {
        let badge_policy = BadgePolicy::try_new(self.top_ten_cutoff, self.fast_climber_threshold)?;
        if self.default_top_k == 0 {
            return Err(ConfigError::new("default_top_k must be >= 1"));
        }
        Ok(LeaderboardConfig {
            capacity: self.capacity,
            badge_policy,
            default_top_k: self.default_top_k,
        })
    }

    /// Builds the leaderboard.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. For a non-panicking
    /// alternative, use [`try_build`](Self::try_build).
    pub fn build(self) -> Leaderboard {
        match self.try_build() {
            Ok(board) => board,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the leaderboard, returning an error on invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a badge threshold or `default_top_k` is 0.
    pub fn try_build(self) -> Result<Leaderboard, ConfigError> {
        Ok(Leaderboard::with_config(self.try_config()?))
    }

    /// Builds a thread-safe leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a badge threshold or `default_top_k` is 0.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent(self) -> Result<ConcurrentLeaderboard, ConfigError> {
        Ok(ConcurrentLeaderboard::from_leaderboard(self.try_build()?))
    }
}

impl Default for LeaderboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_constants() {
        let config = LeaderboardBuilder::new().try_config().unwrap();
        assert_eq!(config, LeaderboardConfig::default());
        assert_eq!(config.badge_policy.top_ten_cutoff(), 10);
        assert_eq!(config.badge_policy.fast_climber_threshold(), 3);
        assert_eq!(config.default_top_k, 5);
    }

    #[test]
    fn builder_rejects_zero_thresholds() {
        assert!(LeaderboardBuilder::new().top_ten_cutoff(0).try_build().is_err());
        assert!(
            LeaderboardBuilder::new()
                .fast_climber_threshold(0)
                .try_build()
                .is_err()
        );
        let err = LeaderboardBuilder::new().default_top_k(0).try_build().unwrap_err();
        assert!(err.message().contains("default_top_k"));
    }

    #[test]
    fn builder_capacity_is_only_a_hint() {
        let mut board = LeaderboardBuilder::new()
            .capacity(usize::MAX)
            .try_build()
            .unwrap();
        assert_eq!(board.config().capacity, usize::MAX);
        board.add_or_update("a", 4).unwrap();
        board.add_or_update("b", 9).unwrap();
        assert_eq!(board.rank_of("b"), Some(1));
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    #[should_panic(expected = "top_ten_cutoff")]
    fn builder_build_panics_on_invalid() {
        let _ = LeaderboardBuilder::new().top_ten_cutoff(0).build();
    }

    #[test]
    fn builder_badge_policy_roundtrip() {
        let policy = BadgePolicy::try_new(20, 2).unwrap();
        let board = LeaderboardBuilder::new().badge_policy(policy).build();
        assert_eq!(board.config().badge_policy, policy);
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn builder_concurrent() {
        let board = LeaderboardBuilder::new()
            .default_top_k(2)
            .try_build_concurrent()
            .unwrap();
        board.add_or_update("a", 1).unwrap();
        assert_eq!(board.len(), 1);
    }
}
