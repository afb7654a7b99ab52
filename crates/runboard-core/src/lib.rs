//! Core library for runboard.
//!
//! Fetches the runner distance leaderboard from a backend endpoint, ranks it,
//! keeps it in a short-lived in-memory cache and notifies observers when fresh
//! data arrives. The terminal front end lives in the `runboard-tui` crate.

pub mod api;
pub mod cache;
pub mod config;
pub mod manager;
pub mod models;
pub mod progress;
pub mod utils;

pub use api::{ApiClient, ApiError, RunnerSource};
pub use config::Config;
pub use manager::{DataEvent, ErrorState, LoadState, RunnerDataManager, SubscriptionId};
pub use models::{RankedDataset, RunnerRecord};
