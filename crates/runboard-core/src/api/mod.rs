//! REST API client module for the running leaderboard backend.
//!
//! This module provides the `ApiClient` that fetches the runner distance
//! list, the `ApiError` taxonomy for everything that can go wrong on the way,
//! and the `RunnerSource` trait the data manager uses to talk to it.

pub mod client;
pub mod error;
pub mod source;

pub use client::ApiClient;
pub use error::ApiError;
pub use source::RunnerSource;
