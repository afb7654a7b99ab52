//! Application state management for Runboard.
//!
//! This module contains the `App` struct that holds what the screen shows:
//! the current leaderboard, load/error state, leaderboard scroll position and
//! the handle to the background refresh worker.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use runboard_core::progress::ProgressBoard;
use runboard_core::{ApiClient, Config, DataEvent, ErrorState, RankedDataset, RunnerDataManager};
use tracing::{debug, info};

use crate::refresh::{spawn_refresh_worker, RefreshCommand, RefreshHandle, WorkerEvent};

/// Number of rows to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    Quitting,
}

/// Which full-screen view the board is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardView {
    /// Nothing loaded yet and a fetch is running.
    Loading,
    /// The fetch failed and there is nothing to show instead.
    Error,
    Ready,
}

pub struct App {
    pub state: AppState,
    pub base_url: String,
    pub goal_km: f64,

    // Data
    pub dataset: Arc<RankedDataset>,
    pub board: ProgressBoard,
    pub is_loading: bool,
    pub error: Option<ErrorState>,
    pub last_updated: Option<DateTime<Utc>>,

    // UI state
    pub leaderboard_selection: usize,
    pub status_message: Option<String>,

    refresh: RefreshHandle,
}

impl App {
    /// Create the app and start the refresh worker.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url();
        debug!(base_url = %base_url, "Creating API client");

        let api = ApiClient::new(base_url.clone())?;
        let manager = RunnerDataManager::with_ttl(api, config.cache_ttl());
        let refresh = spawn_refresh_worker(manager, config.refresh_interval());

        Ok(Self::with_refresh(base_url, config.goal_km(), refresh))
    }

    pub(crate) fn with_refresh(base_url: String, goal_km: f64, refresh: RefreshHandle) -> Self {
        let dataset = Arc::new(RankedDataset::default());
        Self {
            state: AppState::Normal,
            base_url,
            goal_km,
            board: ProgressBoard::new(&dataset, goal_km),
            dataset,
            // The worker fetches as soon as it starts
            is_loading: true,
            error: None,
            last_updated: None,
            leaderboard_selection: 0,
            status_message: None,
            refresh,
        }
    }

    pub fn view(&self) -> BoardView {
        if self.last_updated.is_some() {
            BoardView::Ready
        } else if self.error.is_some() {
            BoardView::Error
        } else {
            BoardView::Loading
        }
    }

    // =========================================================================
    // Background Refresh
    // =========================================================================

    /// Ask the worker for data, served from cache while fresh.
    pub async fn request_refresh(&mut self) {
        self.status_message = Some("Checking for new results...".to_string());
        self.refresh.send(RefreshCommand::Refresh).await;
    }

    /// Ask the worker to bypass the cache.
    pub async fn force_refresh(&mut self) {
        self.status_message = Some("Reloading from server...".to_string());
        self.refresh.send(RefreshCommand::ForceRefresh).await;
    }

    /// Apply everything the worker has sent since the last frame.
    pub fn check_background_tasks(&mut self) {
        let events = self.refresh.try_recv_all();

        // Late responses after teardown are ignored
        if self.state == AppState::Quitting {
            return;
        }

        for event in events {
            self.process_worker_event(event);
        }
    }

    fn process_worker_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Data(DataEvent::Loading) => {
                self.is_loading = true;
                self.status_message = Some("Refreshing...".to_string());
            }
            WorkerEvent::Data(DataEvent::Loaded(dataset)) => {
                info!(runners = dataset.len(), "Leaderboard updated");
                self.is_loading = false;
                self.error = None;
                self.set_dataset(dataset);
                self.last_updated = Some(Utc::now());
                self.status_message = None;
            }
            WorkerEvent::Data(DataEvent::Failed(error)) => {
                self.is_loading = false;
                self.status_message = Some(format!("Refresh failed: {}", error.message));
                self.error = Some(error);
            }
            WorkerEvent::CacheHit(age) => {
                self.status_message = Some(format!("Up to date (fetched {})", age));
            }
        }
    }

    fn set_dataset(&mut self, dataset: Arc<RankedDataset>) {
        self.board = ProgressBoard::new(&dataset, self.goal_km);
        self.dataset = dataset;
        self.clamp_selection();
    }

    /// Tear down: stop the refresh timer and drop the worker's cache.
    pub async fn shutdown(&mut self) {
        self.state = AppState::Quitting;
        self.refresh.shutdown().await;
    }

    // =========================================================================
    // Leaderboard Navigation
    // =========================================================================

    pub fn select_next(&mut self, step: usize) {
        self.leaderboard_selection = self.leaderboard_selection.saturating_add(step);
        self.clamp_selection();
    }

    pub fn select_prev(&mut self, step: usize) {
        self.leaderboard_selection = self.leaderboard_selection.saturating_sub(step);
    }

    pub fn select_first(&mut self) {
        self.leaderboard_selection = 0;
    }

    pub fn select_last(&mut self) {
        self.leaderboard_selection = self.board.entries.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let last = self.board.entries.len().saturating_sub(1);
        self.leaderboard_selection = self.leaderboard_selection.min(last);
    }

    /// Status bar text for when nothing more specific is going on.
    pub fn last_updated_display(&self) -> String {
        match self.last_updated {
            Some(at) => format!("Updated {}", at.with_timezone(&chrono::Local).format("%H:%M:%S")),
            None => "Not loaded yet".to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
