use async_trait::async_trait;

use crate::models::RunnerRecord;

use super::ApiError;

/// Anything that can produce the raw runner distance list.
///
/// `ApiClient` is the production implementation; the data manager only
/// depends on this trait.
#[async_trait]
pub trait RunnerSource: Send + Sync {
    async fn fetch_runner_distances(&self) -> Result<Vec<RunnerRecord>, ApiError>;
}
