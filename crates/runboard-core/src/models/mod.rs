//! Data models for the runner leaderboard.
//!
//! - `RunnerRecord`: one participant and their cumulative distance
//! - `RankedDataset`: records ordered by distance, leader first

pub mod runner;

pub use runner::{RankedDataset, RunnerRecord};
