//! Error types for the rankkit library.
//!
//! ## Key Components
//!
//! - [`LeaderboardError`]: Returned by leaderboard mutations and validated
//!   queries (empty names, unknown names, non-positive `k`).
//! - [`ConfigError`]: Returned when builder parameters are invalid
//!   (e.g. a zero badge threshold).
//! - [`InvariantError`]: Returned by `check_invariants` methods when an
//!   internal data-structure invariant is violated.
//!
//! ## Example Usage
//!
//! ```
//! use rankkit::error::LeaderboardError;
//! use rankkit::store::leaderboard::Leaderboard;
//!
//! let mut board = Leaderboard::new();
//! let err = board.add_or_update("", 10).unwrap_err();
//! assert!(matches!(err, LeaderboardError::InvalidInput(_)));
//!
//! let missing = board.remove("ghost").unwrap_err();
//! assert!(missing.is_not_found());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// LeaderboardError
// ---------------------------------------------------------------------------

/// Error returned by leaderboard operations.
///
/// A failed mutation never leaves partial state behind: the board is exactly
/// as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// The entity name was empty (or otherwise unusable as a key).
    InvalidInput(String),
    /// The named entity is not on the board.
    NotFound(String),
    /// A numeric parameter was out of range (`k == 0`, score overflow).
    InvalidParameter(String),
}

impl LeaderboardError {
    pub(crate) fn empty_name() -> Self {
        Self::InvalidInput("entity name must not be empty".to_string())
    }

    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound(name.to_string())
    }

    /// Returns `true` for [`LeaderboardError::NotFound`].
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::NotFound(name) => write!(f, "entity not found: {}", name),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for LeaderboardError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal index invariants are violated.
///
/// Produced by [`RankTree::check_invariants`](crate::ds::rank_tree::RankTree::check_invariants)
/// and [`Leaderboard::check_invariants`](crate::store::leaderboard::Leaderboard::check_invariants).
/// Carries a human-readable description of which invariant failed. No public
/// operation should be able to produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when leaderboard configuration parameters are invalid.
///
/// Produced by [`LeaderboardBuilder::try_build`](crate::builder::LeaderboardBuilder::try_build)
/// and [`BadgePolicy::try_new`](crate::movement::BadgePolicy::try_new).
///
/// # Example
///
/// ```
/// use rankkit::builder::LeaderboardBuilder;
///
/// let err = LeaderboardBuilder::new()
///     .fast_climber_threshold(0)
///     .try_build()
///     .unwrap_err();
/// assert!(err.to_string().contains("fast_climber_threshold"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
