//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! which backend to talk to, how often to refresh, how long fetched data
//! stays cached and the goal distance of the progress bar.
//!
//! Configuration is stored at `~/.config/runboard/config.json`. The base URL
//! can be overridden with the `RUNBOARD_BASE_URL` environment variable.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::DEFAULT_TTL_SECS;
use crate::progress::DEFAULT_GOAL_KM;

/// Application name used for config/log directory paths
const APP_NAME: &str = "runboard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "RUNBOARD_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Periodic refresh interval. Matches the cache lifetime so every tick
/// finds an expired entry.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub refresh_interval_secs: Option<u64>,
    pub cache_ttl_secs: Option<u64>,
    pub goal_distance_km: Option<f64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_json(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Write the config, returning the path it was written to.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files.
    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Config with every field set to its default, for writing a starter file.
    pub fn with_defaults() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            refresh_interval_secs: Some(DEFAULT_REFRESH_INTERVAL_SECS),
            cache_ttl_secs: Some(DEFAULT_TTL_SECS as u64),
            goal_distance_km: Some(DEFAULT_GOAL_KM),
        }
    }

    /// Base URL of the backend: environment first, then config file, then default.
    pub fn base_url(&self) -> String {
        self.resolve_base_url(std::env::var(BASE_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn refresh_interval(&self) -> Duration {
        match self.refresh_interval_secs {
            Some(0) => {
                warn!("refresh_interval_secs must be positive, using default");
                Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS)
            }
            Some(secs) => Duration::from_secs(secs),
            None => Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
        }
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        let default = || chrono::Duration::seconds(DEFAULT_TTL_SECS);
        match self.cache_ttl_secs {
            Some(0) => {
                warn!("cache_ttl_secs must be positive, using default");
                default()
            }
            Some(secs) => i64::try_from(secs)
                .ok()
                .and_then(chrono::Duration::try_seconds)
                .unwrap_or_else(|| {
                    warn!(secs, "cache_ttl_secs is out of range, using default");
                    default()
                }),
            None => default(),
        }
    }

    pub fn goal_km(&self) -> f64 {
        match self.goal_distance_km {
            Some(goal) if goal.is_finite() && goal > 0.0 => goal,
            Some(goal) => {
                warn!(goal, "goal_distance_km must be a positive number, using default");
                DEFAULT_GOAL_KM
            }
            None => DEFAULT_GOAL_KM,
        }
    }
}
