use std::time::Duration;

use crate::errors::LookupError;

#[derive(Debug, Clone)]
pub struct RiotConfig {
    /// Value sent in the `X-Riot-Token` header.
    pub api_key: String,
    /// Regional routing cluster serving account-v1 (`europe`, `americas`, `asia`).
    pub account_region: String,
    /// Replaces every `https://<host>.api.riotgames.com` base when set.
    pub base_url: Option<String>,
    /// Per-request timeout of the HTTP client.
    pub timeout: Duration,
}

impl RiotConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn validate(&self) -> Result<(), LookupError> {
        if self.api_key.trim().is_empty() {
            return Err(LookupError::InvalidConfig("api key is required".into()));
        }
        if self.account_region.trim().is_empty() {
            return Err(LookupError::InvalidConfig(
                "account region cannot be empty".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(LookupError::InvalidConfig("timeout must be positive".into()));
        }
        Ok(())
    }
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            account_region: "europe".to_string(),
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}
