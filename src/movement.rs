//! Rank snapshots and movement diffs.
//!
//! A [`RankSnapshot`] is an immutable `name -> rank` mapping captured at one
//! point in time. Diffing it against the current order yields a
//! [`MovementReport`]: per-entity old/new rank, signed movement and badges.
//!
//! ## Protocol
//!
//! ```text
//!   before = board.snapshot_all_ranks()        one in-order pass, O(n)
//!   ... mutations ...
//!   report = board.movement_since(&before)     one in-order pass, O(n)
//!
//!   movement = old_rank - new_rank             +3 → climbed three places
//!   new entity (absent from `before`)          movement = None
//! ```
//!
//! Badges come from the *new* rank and the movement, see [`BadgePolicy`].
//!
//! ## Example Usage
//!
//! ```
//! use rankkit::movement::{Badge, BadgePolicy, RankChange, RankSnapshot};
//!
//! let before = RankSnapshot::from_ranks([("amy", 5), ("bob", 1)]);
//! let after = RankSnapshot::from_ranks([("amy", 2), ("bob", 3), ("cat", 1)]);
//! let report = before.diff(&after, &BadgePolicy::default());
//!
//! let amy = report.get("amy").unwrap();
//! assert_eq!(amy.delta, Some(3));
//! assert_eq!(amy.badges, vec![Badge::Top2, Badge::FastClimber]);
//! assert_eq!(report.get("cat").unwrap().change(), RankChange::New);
//! ```

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ranks `4..=cutoff` (after the podium) earn [`Badge::Top10`].
pub const DEFAULT_TOP_TEN_CUTOFF: usize = 10;

/// Climbing at least this many places earns [`Badge::FastClimber`].
pub const DEFAULT_FAST_CLIMBER_THRESHOLD: usize = 3;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Immutable mapping from entity name to 1-based rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankSnapshot {
    ranks: FxHashMap<Arc<str>, usize>,
}

impl RankSnapshot {
    /// Builds a snapshot from names listed in rank order.
    pub fn from_ordered<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let ranks = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name.into(), idx + 1))
            .collect();
        Self { ranks }
    }

    /// Builds a snapshot from explicit `(name, rank)` pairs.
    pub fn from_ranks<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<Arc<str>>,
    {
        let ranks = pairs
            .into_iter()
            .map(|(name, rank)| (name.into(), rank))
            .collect();
        Self { ranks }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.ranks.iter().map(|(name, rank)| (&**name, *rank))
    }

    /// Diffs `self` (before) against `after`.
    pub fn diff(&self, after: &RankSnapshot, policy: &BadgePolicy) -> MovementReport {
        let mut ordered: Vec<(&Arc<str>, usize)> =
            after.ranks.iter().map(|(name, rank)| (name, *rank)).collect();
        ordered.sort_unstable_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        diff_ranked(self, ordered, policy)
    }
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

/// Achievement attached to a movement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    Top1,
    Top2,
    Top3,
    Top10,
    FastClimber,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Self::Top1 => "Top 1",
            Self::Top2 => "Top 2",
            Self::Top3 => "Top 3",
            Self::Top10 => "Top 10",
            Self::FastClimber => "Fast Climber",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Thresholds used to award badges.
///
/// Defaults: podium badges for ranks 1-3, [`Badge::Top10`] for ranks
/// 4..=[`DEFAULT_TOP_TEN_CUTOFF`], [`Badge::FastClimber`] for a movement of at
/// least [`DEFAULT_FAST_CLIMBER_THRESHOLD`].
///
/// Deserialization goes through [`BadgePolicy::try_new`], so zero thresholds
/// are rejected there as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBadgePolicy")]
pub struct BadgePolicy {
    top_ten_cutoff: usize,
    fast_climber_threshold: usize,
}

#[derive(Deserialize)]
struct RawBadgePolicy {
    top_ten_cutoff: usize,
    fast_climber_threshold: usize,
}

impl TryFrom<RawBadgePolicy> for BadgePolicy {
    type Error = ConfigError;

    fn try_from(raw: RawBadgePolicy) -> Result<Self, Self::Error> {
        Self::try_new(raw.top_ten_cutoff, raw.fast_climber_threshold)
    }
}

impl BadgePolicy {
    /// Creates a policy, rejecting zero thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either threshold is 0.
    pub fn try_new(top_ten_cutoff: usize, fast_climber_threshold: usize) -> Result<Self, ConfigError> {
        if top_ten_cutoff == 0 {
            return Err(ConfigError::new("top_ten_cutoff must be >= 1"));
        }
        if fast_climber_threshold == 0 {
            return Err(ConfigError::new("fast_climber_threshold must be >= 1"));
        }
        Ok(Self {
            top_ten_cutoff,
            fast_climber_threshold,
        })
    }

    pub fn top_ten_cutoff(&self) -> usize {
        self.top_ten_cutoff
    }

    pub fn fast_climber_threshold(&self) -> usize {
        self.fast_climber_threshold
    }

    /// Badges for an entity now at `new_rank` that moved by `delta`.
    ///
    /// # Example
    ///
    /// ```
    /// use rankkit::movement::{Badge, BadgePolicy};
    ///
    /// let policy = BadgePolicy::default();
    /// assert_eq!(policy.classify(1, None), vec![Badge::Top1]);
    /// assert_eq!(policy.classify(7, Some(-2)), vec![Badge::Top10]);
    /// assert_eq!(policy.classify(40, Some(12)), vec![Badge::FastClimber]);
    /// assert!(policy.classify(40, Some(2)).is_empty());
    /// ```
    pub fn classify(&self, new_rank: usize, delta: Option<i64>) -> Vec<Badge> {
        let mut badges = Vec::with_capacity(2);
        match new_rank {
            1 => badges.push(Badge::Top1),
            2 => badges.push(Badge::Top2),
            3 => badges.push(Badge::Top3),
            rank @ 4.. if rank <= self.top_ten_cutoff => badges.push(Badge::Top10),
            _ => {},
        }
        if let Some(delta) = delta
            && delta > 0
            && delta.unsigned_abs() >= self.fast_climber_threshold as u64
        {
            badges.push(Badge::FastClimber);
        }
        badges
    }
}

impl Default for BadgePolicy {
    fn default() -> Self {
        Self {
            top_ten_cutoff: DEFAULT_TOP_TEN_CUTOFF,
            fast_climber_threshold: DEFAULT_FAST_CLIMBER_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Direction of a rank change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankChange {
    /// Climbed this many places.
    Up(usize),
    /// Fell this many places.
    Down(usize),
    Unchanged,
    /// No previous rank to compare against.
    New,
}

impl RankChange {
    pub fn from_delta(delta: Option<i64>) -> Self {
        match delta {
            None => Self::New,
            Some(0) => Self::Unchanged,
            Some(d) if d > 0 => Self::Up(d.unsigned_abs() as usize),
            Some(d) => Self::Down(d.unsigned_abs() as usize),
        }
    }
}

impl fmt::Display for RankChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up(n) => write!(f, "▲ {}", n),
            Self::Down(n) => write!(f, "▼ {}", n),
            Self::Unchanged | Self::New => f.write_str("—"),
        }
    }
}

/// Movement of one entity across a mutation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankMovement {
    pub name: Arc<str>,
    pub old_rank: Option<usize>,
    pub new_rank: usize,
    /// `old_rank - new_rank`; positive means the entity climbed.
    pub delta: Option<i64>,
    pub badges: Vec<Badge>,
}

impl RankMovement {
    pub fn change(&self) -> RankChange {
        RankChange::from_delta(self.delta)
    }
}

/// Movements for every entity present after the batch, in new-rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementReport {
    movements: Vec<RankMovement>,
    index: FxHashMap<Arc<str>, usize>,
    departed: Vec<(Arc<str>, usize)>,
}

impl MovementReport {
    pub fn get(&self, name: &str) -> Option<&RankMovement> {
        self.index.get(name).map(|&idx| &self.movements[idx])
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Movements in new-rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, RankMovement> {
        self.movements.iter()
    }

    /// Names ranked before the batch but gone after it, with their old rank.
    pub fn departed(&self) -> &[(Arc<str>, usize)] {
        &self.departed
    }

    /// The post-batch ranks as a snapshot (baseline for the next diff).
    pub fn to_snapshot(&self) -> RankSnapshot {
        RankSnapshot::from_ranks(
            self.movements
                .iter()
                .map(|m| (Arc::clone(&m.name), m.new_rank)),
        )
    }

    pub fn into_vec(self) -> Vec<RankMovement> {
        self.movements
    }
}

impl<'a> IntoIterator for &'a MovementReport {
    type Item = &'a RankMovement;
    type IntoIter = std::slice::Iter<'a, RankMovement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Diffs `before` against names given in their new rank order.
///
/// `after` yields `(name, new_rank)` pairs sorted by rank.
pub(crate) fn diff_ranked<'a, I>(before: &RankSnapshot, after: I, policy: &BadgePolicy) -> MovementReport
where
    I: IntoIterator<Item = (&'a Arc<str>, usize)>,
{
    let after = after.into_iter();
    let mut movements = Vec::with_capacity(after.size_hint().0);
    let mut index = FxHashMap::default();
    let mut seen = 0usize;
    for (name, new_rank) in after {
        let old_rank = before.get(name);
        if old_rank.is_some() {
            seen += 1;
        }
        let delta = old_rank.map(|old| old as i64 - new_rank as i64);
        index.insert(Arc::clone(name), movements.len());
        movements.push(RankMovement {
            name: Arc::clone(name),
            old_rank,
            new_rank,
            delta,
            badges: policy.classify(new_rank, delta),
        });
    }

    let mut departed = Vec::with_capacity(before.len().saturating_sub(seen));
    if seen < before.len() {
        departed.extend(
            before
                .ranks
                .iter()
                .filter(|(name, _)| !index.contains_key(&**name))
                .map(|(name, rank)| (Arc::clone(name), *rank)),
        );
        departed.sort_unstable_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    }

    MovementReport {
        movements,
        index,
        departed,
    }
}
