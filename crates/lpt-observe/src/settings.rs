use std::{io::IsTerminal, str::FromStr};

use tracing_subscriber::EnvFilter;

use crate::error::ObserveError;

pub const ENV_LOG_LEVEL: &str = "LPT_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LPT_LOG_FORMAT";

/// Tracker crates at info, Riot client chatter (retries, 404s) only when it goes wrong.
pub const DEFAULT_DIRECTIVE: &str = "info,lpt_core=info,lpt_riot=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Text,
    Json,
    Journald,
}

impl FromStr for LogOutput {
    type Err = ObserveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "journald" | "journal" => {
                if cfg!(all(target_os = "linux", feature = "journald")) {
                    Ok(Self::Journald)
                } else {
                    Err(ObserveError::JournaldUnavailable)
                }
            }
            _ => Err(ObserveError::UnknownOutput(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub output: LogOutput,
    /// `EnvFilter` directive list.
    pub directive: String,
    pub targets: bool,
    pub color: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            output: LogOutput::Text,
            directive: DEFAULT_DIRECTIVE.to_string(),
            targets: true,
            color: std::io::stdout().is_terminal(),
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Result<Self, ObserveError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values fall back to the defaults. The directive is checked here
    /// so a typo in `LPT_LOG_LEVEL` fails at startup rather than at install.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ObserveError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(directive) = get(ENV_LOG_LEVEL) {
            settings.directive = directive.trim().to_string();
        }
        if let Some(output) = get(ENV_LOG_FORMAT) {
            settings.output = output.parse()?;
        }
        if settings.output != LogOutput::Text {
            settings.color = false;
        }

        settings.filter()?;
        Ok(settings)
    }

    pub fn filter(&self) -> Result<EnvFilter, ObserveError> {
        EnvFilter::try_new(&self.directive).map_err(|e| ObserveError::BadDirective {
            directive: self.directive.clone(),
            reason: e.to_string(),
        })
    }
}
