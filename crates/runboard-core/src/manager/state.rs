use std::sync::Arc;

use crate::api::ApiError;
use crate::models::RankedDataset;

/// User-visible description of the last failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub message: String,
    pub status: Option<u16>,
}

impl From<&ApiError> for ErrorState {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
            status: err.status(),
        }
    }
}

/// What the display layer needs to decide between loading, error and data.
#[derive(Debug, Clone, Default)]
pub struct LoadState {
    /// Last successfully fetched dataset. Empty until the first success.
    pub data: Arc<RankedDataset>,
    pub is_loading: bool,
    pub error: Option<ErrorState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_state_from_fetch_error() {
        let err = ApiError::Fetch {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        let state = ErrorState::from(&err);
        assert_eq!(state.status, Some(502));
        assert_eq!(state.message, "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_error_state_from_parse_error() {
        let state = ErrorState::from(&ApiError::Parse("entry 0: runner name is empty".to_string()));
        assert_eq!(state.status, None);
        assert!(state.message.contains("runner name is empty"));
    }

    #[test]
    fn test_default_load_state() {
        let state = LoadState::default();
        assert!(state.data.is_empty());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }
}
