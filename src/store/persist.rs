//! Persisted / exchanged representation of a leaderboard.
//!
//! The wire shape is an ordered array of `[name, {score, history}]` pairs:
//!
//! ```json
//! [["Raghavan", {"score": 130, "history": [130]}],
//!  ["Kiran",    {"score": 120, "history": [100, 120]}]]
//! ```
//!
//! Unknown fields (e.g. a stored `lastRank`) are ignored on read, and a
//! missing `history` defaults to empty; loading repairs it to end with
//! `score`. Encoding to bytes is left to the caller (any serde format works).

use serde::{Deserialize, Serialize};

/// Score and history of one persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedEntity {
    pub score: i64,
    #[serde(default)]
    pub history: Vec<i64>,
}

impl PersistedEntity {
    pub fn new(score: i64, history: Vec<i64>) -> Self {
        Self { score, history }
    }
}

/// Full board contents in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderboardExport {
    pub entries: Vec<(String, PersistedEntity)>,
}

impl LeaderboardExport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersistedEntity)> {
        self.entries.iter().map(|(name, entity)| (name.as_str(), entity))
    }
}

impl<S: Into<String>> FromIterator<(S, PersistedEntity)> for LeaderboardExport {
    fn from_iter<I: IntoIterator<Item = (S, PersistedEntity)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, entity)| (name.into(), entity))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_json_shape_is_array_of_pairs() {
        let export: LeaderboardExport = [("amy", PersistedEntity::new(10, vec![5, 10]))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&export).unwrap();
        assert_eq!(json, r#"[["amy",{"score":10,"history":[5,10]}]]"#);
    }

    #[test]
    fn export_reads_legacy_objects() {
        let raw = r#"[["bob",{"score":7,"lastRank":2}],["cat",{"score":3,"history":[1,3]}]]"#;
        let export: LeaderboardExport = serde_json::from_str(raw).unwrap();
        assert_eq!(export.len(), 2);
        assert_eq!(export.entries[0].1, PersistedEntity::new(7, vec![]));
        assert_eq!(export.entries[1].1.history, vec![1, 3]);
    }
}
