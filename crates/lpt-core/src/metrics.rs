use std::{fmt, time::Duration};

use lpt_model::CommandKind;

/// Final state of a command as exported to metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeLabel {
    Success,
    AlreadyTracked,
    NotFound,
    Failure,
    Timeout,
    /// The caller stopped waiting before an outcome was reached.
    Dropped,
}

impl OutcomeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeLabel::Success => "success",
            OutcomeLabel::AlreadyTracked => "already_tracked",
            OutcomeLabel::NotFound => "not_found",
            OutcomeLabel::Failure => "failure",
            OutcomeLabel::Timeout => "timeout",
            OutcomeLabel::Dropped => "dropped",
        }
    }
}

impl fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for command execution metrics.
pub trait MetricsBackend: Send + Sync + 'static {
    fn command_started(&self, kind: CommandKind);

    fn command_finished(&self, kind: CommandKind, outcome: OutcomeLabel, elapsed: Duration);

    fn refresh_finished(&self, _updated: usize, _failed: usize) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsBackend for NoopMetrics {
    fn command_started(&self, _kind: CommandKind) {}

    fn command_finished(&self, _kind: CommandKind, _outcome: OutcomeLabel, _elapsed: Duration) {}
}
