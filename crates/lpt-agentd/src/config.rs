use std::{net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

use lpt_core::{ExecutorConfig, PollerConfig, TimeoutPolicy};
use lpt_observe::{LogSettings, ObserveError};
use lpt_riot::RiotConfig;

pub const ENV_API_KEY: &str = "RIOT_API_KEY";
pub const ENV_HTTP_ADDR: &str = "LPT_HTTP_ADDR";
pub const ENV_WORKERS: &str = "LPT_WORKERS";
pub const ENV_POLL_INTERVAL: &str = "LPT_POLL_INTERVAL_SECS";
pub const ENV_TIMEOUT_POLICY: &str = "LPT_TIMEOUT_POLICY";
pub const ENV_RIOT_REGION: &str = "LPT_RIOT_REGION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("logging: {0}")]
    Logging(#[from] ObserveError),
}

/// Everything the agent needs, read from the environment.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub http_addr: SocketAddr,
    pub riot: RiotConfig,
    pub executor: ExecutorConfig,
    pub poller: PollerConfig,
    pub logging: LogSettings,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let mut riot = RiotConfig::new(api_key.trim());
        if let Some(region) = get(ENV_RIOT_REGION) {
            riot.account_region = region.trim().to_ascii_lowercase();
        }

        let default_addr = SocketAddr::from(([0, 0, 0, 0], 8080));
        let http_addr = parse_or(get(ENV_HTTP_ADDR), ENV_HTTP_ADDR, default_addr)?;

        let mut executor = ExecutorConfig::default();
        executor.workers = parse_or(get(ENV_WORKERS), ENV_WORKERS, executor.workers)?;
        executor.timeout_policy = parse_or(
            get(ENV_TIMEOUT_POLICY),
            ENV_TIMEOUT_POLICY,
            TimeoutPolicy::default(),
        )?;
        executor.validate().map_err(|e| ConfigError::Invalid {
            key: ENV_WORKERS,
            reason: e.to_string(),
        })?;

        let poll_secs: u64 = parse_or(get(ENV_POLL_INTERVAL), ENV_POLL_INTERVAL, 600)?;
        let poller = PollerConfig {
            interval: Duration::from_secs(poll_secs),
        };

        let logging = LogSettings::from_lookup(&lookup)?;

        Ok(Self {
            http_addr,
            riot,
            executor,
            poller,
            logging,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpt_observe::{DEFAULT_DIRECTIVE, ENV_LOG_FORMAT, ENV_LOG_LEVEL, LogOutput};
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AgentConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AgentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn api_key_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing(ENV_API_KEY))));
        assert!(matches!(
            load(&[(ENV_API_KEY, "  ")]),
            Err(ConfigError::Missing(ENV_API_KEY))
        ));
    }

    #[test]
    fn defaults_apply() {
        let cfg = load(&[(ENV_API_KEY, "RGAPI-1")]).unwrap();
        assert_eq!(cfg.http_addr.port(), 8080);
        assert_eq!(cfg.riot.api_key, "RGAPI-1");
        assert_eq!(cfg.riot.account_region, "europe");
        assert_eq!(cfg.executor.workers, 2);
        assert_eq!(cfg.executor.timeout_policy, TimeoutPolicy::Abandon);
        assert_eq!(cfg.poller.interval, Duration::from_secs(600));
        assert_eq!(cfg.logging.directive, DEFAULT_DIRECTIVE);
        assert_eq!(cfg.logging.output, LogOutput::Text);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = load(&[
            (ENV_API_KEY, "RGAPI-1"),
            (ENV_HTTP_ADDR, "127.0.0.1:9000"),
            (ENV_WORKERS, "4"),
            (ENV_POLL_INTERVAL, "0"),
            (ENV_TIMEOUT_POLICY, "cancel"),
            (ENV_RIOT_REGION, "Americas"),
            (ENV_LOG_FORMAT, "json"),
        ])
        .unwrap();
        assert_eq!(cfg.http_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.executor.workers, 4);
        assert!(!cfg.poller.is_enabled());
        assert_eq!(cfg.executor.timeout_policy, TimeoutPolicy::Cancel);
        assert_eq!(cfg.riot.account_region, "americas");
        assert_eq!(cfg.logging.output, LogOutput::Json);
    }

    #[test]
    fn bad_values_name_their_key() {
        let err = load(&[(ENV_API_KEY, "k"), (ENV_WORKERS, "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_WORKERS, .. }));

        let err = load(&[(ENV_API_KEY, "k"), (ENV_WORKERS, "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_WORKERS, .. }));

        let err = load(&[(ENV_API_KEY, "k"), (ENV_TIMEOUT_POLICY, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_POLICY));
    }

    #[test]
    fn logging_errors_surface_through_config() {
        let err = load(&[(ENV_API_KEY, "k"), (ENV_LOG_LEVEL, "lpt_core=shout")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Logging(ObserveError::BadDirective { .. })
        ));

        let err = load(&[(ENV_API_KEY, "k"), (ENV_LOG_FORMAT, "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::Logging(ObserveError::UnknownOutput(_))));
    }
}
