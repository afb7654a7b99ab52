//! In-memory caching for fetched datasets.
//!
//! This module provides `CacheStore`, a keyed map of `CachedData` entries
//! that stop being served once they are older than the store's time-to-live.
//! Nothing is written to disk; the store lives and dies with its owner.

pub mod store;

pub use store::{CacheStore, CachedData, DEFAULT_TTL_SECS};
