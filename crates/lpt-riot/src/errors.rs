use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("player not found: no account for {riot_id}")]
    NotFound { riot_id: String },

    #[error("rate limited by riot api (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("riot api request failed with status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid riot client config: {0}")]
    InvalidConfig(String),
}

impl LookupError {
    /// `true` when the provider has no account for the requested Riot ID.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}
