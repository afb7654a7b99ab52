use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One participant as returned by `/running/runner-distances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct RunnerRecord {
    pub name: String,
    /// Cumulative distance in kilometers.
    #[serde(rename = "totalDistance")]
    pub total_distance: f64,
}

impl RunnerRecord {
    pub fn new(name: impl Into<String>, total_distance: f64) -> Self {
        Self {
            name: name.into(),
            total_distance,
        }
    }

    /// Check the invariants serde cannot express: a usable name and a
    /// non-negative, finite distance.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("runner name is empty".to_string());
        }
        if !self.total_distance.is_finite() {
            return Err(format!("distance for {} is not a finite number", self.name));
        }
        if self.total_distance < 0.0 {
            return Err(format!(
                "distance for {} is negative ({})",
                self.name, self.total_distance
            ));
        }
        Ok(())
    }
}

/// Runners ordered by descending distance. Index 0 is the leader and the
/// index of a record is its rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedDataset {
    runners: Vec<RunnerRecord>,
}

impl RankedDataset {
    /// Rank the given records. The sort is stable, so runners with equal
    /// distances keep the order the endpoint returned them in.
    pub fn from_records(mut runners: Vec<RunnerRecord>) -> Self {
        runners.sort_by(compare_distance_desc);
        Self { runners }
    }

    pub fn leader(&self) -> Option<&RunnerRecord> {
        self.runners.first()
    }

    pub fn get(&self, rank: usize) -> Option<&RunnerRecord> {
        self.runners.get(rank)
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RunnerRecord> {
        self.runners.iter()
    }

    /// Iterate `(rank, runner)` pairs, leader first.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &RunnerRecord)> {
        self.runners.iter().enumerate()
    }

    /// Zero-based rank of the runner with the given name.
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.runners.iter().position(|r| r.name == name)
    }

    /// Distance of the leader, or 0 for an empty board.
    pub fn max_distance(&self) -> f64 {
        self.leader().map(|r| r.total_distance).unwrap_or(0.0)
    }

    /// Combined distance of every runner on the board.
    pub fn total_distance(&self) -> f64 {
        self.runners.iter().map(|r| r.total_distance).sum()
    }

    pub fn as_slice(&self) -> &[RunnerRecord] {
        &self.runners
    }
}

impl<'a> IntoIterator for &'a RankedDataset {
    type Item = &'a RunnerRecord;
    type IntoIter = std::slice::Iter<'a, RunnerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.runners.iter()
    }
}

/// Non-finite distances are rejected by `validate`, so equal values
/// (including `-0.0` and `0.0`) compare as ties and keep input order.
fn compare_distance_desc(a: &RunnerRecord, b: &RunnerRecord) -> Ordering {
    b.total_distance
        .partial_cmp(&a.total_distance)
        .unwrap_or(Ordering::Equal)
}
