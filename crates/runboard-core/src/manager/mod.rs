//! Runner data management.
//!
//! `RunnerDataManager` owns the fetch/cache/notify cycle for the leaderboard:
//! it serves a fresh cached dataset when it has one, otherwise fetches from
//! its `RunnerSource`, ranks the result, caches it and tells subscribers.
//!
//! The manager is driven through `&mut self`, so a single owner (the refresh
//! worker in the TUI) serialises every read-then-write of the cache without
//! locking.

mod observer;
mod state;

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, RunnerSource};
use crate::cache::CacheStore;
use crate::models::RankedDataset;

pub use observer::{DataEvent, SubscriptionId};
pub use state::{ErrorState, LoadState};

use observer::Observers;

/// The leaderboard is a single global dataset, so it lives under one key.
pub const RUNNER_DATA_KEY: &str = "runner_data";

pub struct RunnerDataManager<S = ApiClient> {
    source: S,
    cache: CacheStore<Arc<RankedDataset>>,
    state: LoadState,
    observers: Observers,
}

impl<S: RunnerSource> RunnerDataManager<S> {
    /// Create a manager using the default five minute cache lifetime.
    pub fn new(source: S) -> Self {
        Self::with_cache(source, CacheStore::default())
    }

    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self::with_cache(source, CacheStore::new(ttl))
    }

    fn with_cache(source: S, cache: CacheStore<Arc<RankedDataset>>) -> Self {
        Self {
            source,
            cache,
            state: LoadState::default(),
            observers: Observers::default(),
        }
    }

    /// Return the ranked leaderboard, from cache while it is fresh.
    ///
    /// A network fetch emits `DataEvent::Loading` followed by either
    /// `DataEvent::Loaded` or `DataEvent::Failed`. Cache hits emit nothing.
    /// A failed fetch records the error in `state()` and leaves the current
    /// dataset and any cached entry untouched.
    pub async fn fetch_data(&mut self) -> Result<Arc<RankedDataset>, ApiError> {
        if let Some(cached) = self.cache.get(RUNNER_DATA_KEY) {
            debug!(age = %cached.age_display(), "Serving runner data from cache");
            return Ok(Arc::clone(&cached.data));
        }

        self.load_from_source().await
    }

    /// Fetch from the network even if the cache is fresh.
    ///
    /// The cached entry is only replaced when the fetch succeeds, so a
    /// failed refresh keeps serving the previous dataset.
    pub async fn refresh(&mut self) -> Result<Arc<RankedDataset>, ApiError> {
        self.load_from_source().await
    }

    async fn load_from_source(&mut self) -> Result<Arc<RankedDataset>, ApiError> {
        self.state.is_loading = true;
        self.state.error = None;
        self.observers.notify(&DataEvent::Loading);

        match self.source.fetch_runner_distances().await {
            Ok(records) => {
                let dataset = Arc::new(RankedDataset::from_records(records));
                info!(
                    runners = dataset.len(),
                    leader = dataset.leader().map(|r| r.name.as_str()).unwrap_or("-"),
                    "Runner data loaded"
                );

                self.cache.insert(RUNNER_DATA_KEY, Arc::clone(&dataset));
                self.state.data = Arc::clone(&dataset);
                self.state.is_loading = false;
                self.observers.notify(&DataEvent::Loaded(Arc::clone(&dataset)));
                Ok(dataset)
            }
            Err(e) => {
                warn!(error = %e, status = ?e.status(), "Failed to fetch runner data");
                let error = ErrorState::from(&e);
                self.state.is_loading = false;
                self.state.error = Some(error.clone());
                self.observers.notify(&DataEvent::Failed(error));
                Err(e)
            }
        }
    }
}

impl<S> RunnerDataManager<S> {
    /// Drop every cached entry so the next `fetch_data` goes to the network.
    pub fn clear_cache(&mut self) {
        debug!(entries = self.cache.len(), "Clearing runner data cache");
        self.cache.clear();
    }

    /// Drop only the leaderboard entry.
    pub fn invalidate(&mut self) {
        self.cache.invalidate(RUNNER_DATA_KEY);
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&DataEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn data(&self) -> &Arc<RankedDataset> {
        &self.state.data
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.state.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Whether `fetch_data` would currently be answered from the cache.
    pub fn has_fresh_data(&self) -> bool {
        self.cache.get(RUNNER_DATA_KEY).is_some()
    }

    /// Age of the cached leaderboard, including an expired one.
    pub fn cache_age(&self) -> Option<String> {
        self.cache
            .get_even_if_expired(RUNNER_DATA_KEY)
            .map(|cached| cached.age_display())
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

// ============================================================================
// Tests
// ============================================================================
