//! Display model for the runner progress board.
//!
//! Turns a `RankedDataset` into what a front end draws: the group's progress
//! towards the goal distance, one marker per runner along the bar and the
//! medal/colour for each rank.

use crate::models::RankedDataset;
use crate::utils::{format_distance, format_percentage};

/// Goal distance in kilometers the progress bar is measured against.
pub const DEFAULT_GOAL_KM: f64 = 500.0;

/// Markers stop short of the right edge so the last avatar stays on the bar.
pub const MAX_MARKER_POSITION: f64 = 98.0;

/// Colour for ranks without a medal.
pub const DEFAULT_RANK_COLOR: &str = "#6b7280";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal awarded to a zero-based rank, if any.
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Medal::Gold),
            1 => Some(Medal::Silver),
            2 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
        }
    }

    pub fn hex_color(&self) -> &'static str {
        match self {
            Medal::Gold => "#FFD700",
            Medal::Silver => "#C0C0C0",
            Medal::Bronze => "#CD7F32",
        }
    }
}

/// Hex colour used for a rank's marker border and leaderboard row.
pub fn rank_color(rank: usize) -> &'static str {
    Medal::for_rank(rank)
        .map(|m| m.hex_color())
        .unwrap_or(DEFAULT_RANK_COLOR)
}

/// Position of a runner along the bar, as a percentage in `0..=98`.
pub fn marker_position(distance_km: f64, goal_km: f64) -> f64 {
    if goal_km <= 0.0 || !distance_km.is_finite() {
        return 0.0;
    }
    (distance_km / goal_km * 100.0).clamp(0.0, MAX_MARKER_POSITION)
}

/// Leader's distance as a percentage of the goal. Not clamped, so a board
/// past its goal reads e.g. `112.0%`.
pub fn progress_percentage(dataset: &RankedDataset, goal_km: f64) -> f64 {
    if goal_km <= 0.0 {
        return 0.0;
    }
    dataset.max_distance() / goal_km * 100.0
}

/// Column of a marker on a track `width` cells wide.
pub fn marker_column(position: f64, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let last = f64::from(width - 1);
    (position / 100.0 * last).round().clamp(0.0, last) as u16
}

/// One runner as placed on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    pub rank: usize,
    pub name: String,
    pub distance_km: f64,
    pub position: f64,
    pub medal: Option<Medal>,
}

impl BoardEntry {
    /// One-based rank with its medal, e.g. `🥇1` or `4`.
    pub fn rank_label(&self) -> String {
        match self.medal {
            Some(medal) => format!("{}{}", medal.emoji(), self.rank + 1),
            None => (self.rank + 1).to_string(),
        }
    }

    /// Marker caption, e.g. `🥇 bob (340.2km)`.
    pub fn marker_label(&self) -> String {
        let medal = self.medal.map(|m| m.emoji()).unwrap_or("");
        format!("{} {} ({}km)", medal, self.name, format_distance(self.distance_km))
            .trim_start()
            .to_string()
    }

    pub fn color(&self) -> &'static str {
        rank_color(self.rank)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBoard {
    pub goal_km: f64,
    pub percentage: f64,
    /// Leader first.
    pub entries: Vec<BoardEntry>,
}

impl ProgressBoard {
    pub fn new(dataset: &RankedDataset, goal_km: f64) -> Self {
        let entries = dataset
            .ranked()
            .map(|(rank, runner)| BoardEntry {
                rank,
                name: runner.name.clone(),
                distance_km: runner.total_distance,
                position: marker_position(runner.total_distance, goal_km),
                medal: Medal::for_rank(rank),
            })
            .collect();

        Self {
            goal_km,
            percentage: progress_percentage(dataset, goal_km),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Width of the filled part of the bar, capped at 100%.
    pub fn fill_percentage(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    /// Markers in paint order: lowest rank first so the leader ends up on top.
    pub fn draw_order(&self) -> impl Iterator<Item = &BoardEntry> {
        self.entries.iter().rev()
    }

    pub fn goal_label(&self) -> String {
        format!("🎯 Goal: {}km", format_distance(self.goal_km))
    }

    pub fn progress_label(&self) -> String {
        format!("{} reached", format_percentage(self.percentage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunnerRecord;

    fn board(records: Vec<RunnerRecord>) -> ProgressBoard {
        ProgressBoard::new(&RankedDataset::from_records(records), DEFAULT_GOAL_KM)
    }

    #[test]
    fn test_marker_position_is_linear() {
        assert_eq!(marker_position(0.0, 500.0), 0.0);
        assert_eq!(marker_position(125.0, 500.0), 25.0);
        assert_eq!(marker_position(250.0, 500.0), 50.0);
    }

    #[test]
    fn test_marker_position_is_clamped() {
        assert_eq!(marker_position(495.0, 500.0), 98.0);
        assert_eq!(marker_position(800.0, 500.0), 98.0);
        assert_eq!(marker_position(-5.0, 500.0), 0.0);
        assert_eq!(marker_position(10.0, 0.0), 0.0);
        assert_eq!(marker_position(f64::NAN, 500.0), 0.0);
    }

    #[test]
    fn test_medals_only_for_podium() {
        assert_eq!(Medal::for_rank(0), Some(Medal::Gold));
        assert_eq!(Medal::for_rank(1), Some(Medal::Silver));
        assert_eq!(Medal::for_rank(2), Some(Medal::Bronze));
        assert_eq!(Medal::for_rank(3), None);
        assert_eq!(rank_color(0), "#FFD700");
        assert_eq!(rank_color(2), "#CD7F32");
        assert_eq!(rank_color(7), DEFAULT_RANK_COLOR);
    }

    #[test]
    fn test_board_from_dataset() {
        let board = board(vec![
            RunnerRecord::new("alice", 120.4),
            RunnerRecord::new("bob", 340.2),
        ]);

        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.entries[0].name, "bob");
        assert_eq!(board.entries[0].medal, Some(Medal::Gold));
        assert!((board.percentage - 68.04).abs() < 1e-9);
        assert_eq!(board.progress_label(), "68.0% reached");
        assert_eq!(board.goal_label(), "🎯 Goal: 500.0km");
    }

    #[test]
    fn test_empty_board() {
        let board = board(Vec::new());
        assert!(board.is_empty());
        assert_eq!(board.percentage, 0.0);
        assert_eq!(board.fill_percentage(), 0.0);
    }

    #[test]
    fn test_fill_is_capped_but_label_is_not() {
        let board = board(vec![RunnerRecord::new("ultra", 1000.0)]);
        assert_eq!(board.percentage, 200.0);
        assert_eq!(board.fill_percentage(), 100.0);
        assert_eq!(board.entries[0].position, MAX_MARKER_POSITION);
    }

    #[test]
    fn test_draw_order_puts_leader_last() {
        let board = board(vec![
            RunnerRecord::new("a", 1.0),
            RunnerRecord::new("b", 3.0),
            RunnerRecord::new("c", 2.0),
        ]);
        let order: Vec<&str> = board.draw_order().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_labels() {
        let board = board(vec![
            RunnerRecord::new("bob", 340.2),
            RunnerRecord::new("a", 3.0),
            RunnerRecord::new("b", 2.0),
            RunnerRecord::new("dave", 1.0),
        ]);
        assert_eq!(board.entries[0].rank_label(), "🥇1");
        assert_eq!(board.entries[0].marker_label(), "🥇 bob (340.2km)");
        assert_eq!(board.entries[3].rank_label(), "4");
        assert_eq!(board.entries[3].marker_label(), "dave (1.0km)");
        assert_eq!(board.entries[3].color(), DEFAULT_RANK_COLOR);
    }

    #[test]
    fn test_marker_column() {
        assert_eq!(marker_column(0.0, 51), 0);
        assert_eq!(marker_column(50.0, 51), 25);
        assert_eq!(marker_column(98.0, 51), 49);
        assert_eq!(marker_column(100.0, 51), 50);
        assert_eq!(marker_column(50.0, 0), 0);
    }
}
