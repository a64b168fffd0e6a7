// error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("both a dish name and an API key are required")]
    MissingInput,

    #[error("search request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("could not decode search response: {0}")]
    BadResponse(#[from] serde_json::Error),
}
