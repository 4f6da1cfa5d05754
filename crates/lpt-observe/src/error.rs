use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObserveError {
    #[error("unknown log output {0:?} (expected text, json or journald)")]
    UnknownOutput(String),

    #[error("journald output needs linux and the `journald` feature")]
    JournaldUnavailable,

    #[error("bad log directive {directive:?}: {reason}")]
    BadDirective { directive: String, reason: String },

    #[error("a global subscriber is already installed")]
    AlreadyInstalled,

    #[error("failed to install subscriber: {0}")]
    Install(String),
}
