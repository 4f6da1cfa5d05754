use thiserror::Error;

use lpt_model::{ModelError, PlayerIdentity};
use lpt_riot::LookupError;

/// Failures raised by a [`PlayerStore`](crate::PlayerStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("player {0} is already stored")]
    DuplicateIdentity(PlayerIdentity),

    #[error("puuid {0} is already stored")]
    DuplicatePuuid(String),

    #[error("player not found: {0}")]
    NotFound(String),

    #[error("player record is missing an id")]
    MissingId,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True when a uniqueness constraint rejected the write.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateIdentity(_) | StoreError::DuplicatePuuid(_)
        )
    }
}

/// Coarse classification used when rendering a failure to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyTracked,
    NotFound,
    Upstream,
}

/// One player that could not be refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshFailure {
    pub identity: PlayerIdentity,
    pub reason: String,
}

impl std::fmt::Display for RefreshFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to update player {}: {}",
            self.identity.riot_id(),
            self.reason
        )
    }
}

fn join_failures(failures: &[RefreshFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors produced by the tracking service and surfaced through command outcomes.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("player {0} is already being tracked")]
    AlreadyTracked(PlayerIdentity),

    #[error("player {identity} not found: {source}")]
    NotFound {
        identity: PlayerIdentity,
        #[source]
        source: LookupError,
    },

    #[error("failed to fetch player from riot api: {0}")]
    Lookup(#[source] LookupError),

    #[error("failed to access player store: {0}")]
    Store(#[source] StoreError),

    #[error("command deadline passed; player {0} was not saved")]
    Cancelled(PlayerIdentity),

    #[error(
        "{} players updated, {} failed: {}",
        .updated,
        .failures.len(),
        join_failures(.failures)
    )]
    Refresh {
        updated: usize,
        failures: Vec<RefreshFailure>,
    },

    #[error("command task failed: {0}")]
    Internal(String),
}

impl TrackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackError::AlreadyTracked(_) => ErrorKind::AlreadyTracked,
            TrackError::Store(e) if e.is_duplicate() => ErrorKind::AlreadyTracked,
            TrackError::NotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Upstream,
        }
    }
}

/// Errors raised before a command reaches the worker pool.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid command arguments: {0}")]
    InvalidArguments(#[from] ModelError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpt_model::Server;

    fn faker() -> PlayerIdentity {
        PlayerIdentity::new("Faker", "KR1", Server::Kr)
    }

    #[test]
    fn kinds_classify_failures() {
        assert_eq!(TrackError::AlreadyTracked(faker()).kind(), ErrorKind::AlreadyTracked);
        assert_eq!(
            TrackError::Store(StoreError::DuplicatePuuid("p".into())).kind(),
            ErrorKind::AlreadyTracked
        );
        assert_eq!(
            TrackError::NotFound {
                identity: faker(),
                source: LookupError::NotFound {
                    riot_id: "Faker#KR1".into()
                },
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            TrackError::Lookup(LookupError::RateLimited {
                retry_after_secs: None
            })
            .kind(),
            ErrorKind::Upstream
        );
        assert_eq!(
            TrackError::Store(StoreError::Unavailable("down".into())).kind(),
            ErrorKind::Upstream
        );
    }

    #[test]
    fn refresh_error_names_every_failed_player() {
        let err = TrackError::Refresh {
            updated: 2,
            failures: vec![
                RefreshFailure {
                    identity: faker(),
                    reason: "rate limited".into(),
                },
                RefreshFailure {
                    identity: PlayerIdentity::new("Caps", "EUW", Server::Euw1),
                    reason: "boom".into(),
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("2 players updated, 2 failed"));
        assert!(msg.contains("Faker#KR1: rate limited"));
        assert!(msg.contains("Caps#EUW: boom"));
    }
}
