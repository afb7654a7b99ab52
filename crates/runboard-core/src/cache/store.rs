use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Default time-to-live for a cached dataset.
pub const DEFAULT_TTL_SECS: i64 = 5 * 60;

#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Utc::now() - self.cached_at
    }

    /// An entry is served only while `now - cached_at < ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }

    pub fn age_display(&self) -> String {
        format_age(self.age())
    }
}

/// Human readable age for the status bar ("just now", "4m ago", "2h ago").
fn format_age(age: Duration) -> String {
    let minutes = age.num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        // 1h 30m+ rounds up to 2h
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

/// Keyed in-memory cache with a single time-to-live for every entry.
#[derive(Debug)]
pub struct CacheStore<T> {
    entries: HashMap<String, CachedData<T>>,
    ttl: Duration,
}

impl<T: Clone> CacheStore<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the entry for `key` if it has not expired yet.
    pub fn get(&self, key: &str) -> Option<&CachedData<T>> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(self.ttl) {
            debug!(key = key, age_secs = entry.age().num_seconds(), "Cache entry expired");
            None
        } else {
            Some(entry)
        }
    }

    /// Return the cached value even if it is past its time-to-live.
    pub fn get_even_if_expired(&self, key: &str) -> Option<&CachedData<T>> {
        self.entries.get(key)
    }

    /// Store `data` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: &str, data: T) {
        self.entries.insert(key.to_string(), CachedData::new(data));
    }

    /// Drop a single entry so the next lookup misses.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shift an entry's timestamp into the past.
    #[cfg(test)]
    pub(crate) fn age_entry(&mut self, key: &str, by: Duration) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.cached_at = entry.cached_at - by;
        }
    }
}

impl<T: Clone> Default for CacheStore<T> {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

// ============================================================================
// Tests
// ============================================================================
