//! Deadline-bounded command execution on the worker pool.

use std::{str::FromStr, sync::Arc, time::Duration};

use tokio::{task::JoinError, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use lpt_model::{Command, CommandId, CommandKind, Player};

use crate::{
    dispatch::Responder,
    error::{CoreError, ErrorKind, TrackError},
    metrics::{MetricsBackend, NoopMetrics, OutcomeLabel},
    pool::WorkerPool,
    stats::CommandStats,
    tracking::TrackingService,
};

/// What happens to a command's work once its deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutPolicy {
    /// Let the work run to completion in the background; its result is dropped.
    #[default]
    Abandon,
    /// Signal the work to stop before it persists anything.
    Cancel,
}

impl FromStr for TimeoutPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abandon" => Ok(TimeoutPolicy::Abandon),
            "cancel" => Ok(TimeoutPolicy::Cancel),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown timeout policy: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub workers: usize,
    pub add_player_timeout: Duration,
    pub list_players_timeout: Duration,
    pub timeout_policy: TimeoutPolicy,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            workers: WorkerPool::DEFAULT_CAPACITY,
            add_player_timeout: Duration::from_secs(30),
            list_players_timeout: Duration::from_secs(10),
            timeout_policy: TimeoutPolicy::Abandon,
        }
    }
}

impl ExecutorConfig {
    pub fn deadline(&self, kind: CommandKind) -> Duration {
        match kind {
            CommandKind::AddPlayer => self.add_player_timeout,
            CommandKind::ListPlayers => self.list_players_timeout,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.workers == 0 {
            return Err(CoreError::InvalidConfig("workers must be at least 1".into()));
        }
        if self.add_player_timeout.is_zero() || self.list_players_timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "command timeouts must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum CommandOutput {
    Added(Player),
    Listed(Vec<Player>),
}

/// Final result of one command, delivered exactly once.
#[derive(Debug)]
pub enum Outcome {
    Success(CommandOutput),
    Failure(TrackError),
    Timeout,
}

impl Outcome {
    pub fn label(&self) -> OutcomeLabel {
        match self {
            Outcome::Success(_) => OutcomeLabel::Success,
            Outcome::Timeout => OutcomeLabel::Timeout,
            Outcome::Failure(e) => match e.kind() {
                ErrorKind::AlreadyTracked => OutcomeLabel::AlreadyTracked,
                ErrorKind::NotFound => OutcomeLabel::NotFound,
                ErrorKind::Upstream => OutcomeLabel::Failure,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl From<Result<Result<CommandOutput, TrackError>, JoinError>> for Outcome {
    fn from(joined: Result<Result<CommandOutput, TrackError>, JoinError>) -> Self {
        match joined {
            Ok(Ok(output)) => Outcome::Success(output),
            Ok(Err(e)) => Outcome::Failure(e),
            Err(e) if e.is_panic() => Outcome::Failure(TrackError::Internal(
                "command panicked".to_string(),
            )),
            Err(e) => Outcome::Failure(TrackError::Internal(e.to_string())),
        }
    }
}

/// Pairs one `command_started` with exactly one `command_finished`.
///
/// Reports [`OutcomeLabel::Dropped`] unless [`finish`](Self::finish) ran first.
struct MetricsSpan {
    metrics: Arc<dyn MetricsBackend>,
    kind: CommandKind,
    started: Instant,
    label: OutcomeLabel,
}

impl MetricsSpan {
    fn start(metrics: &Arc<dyn MetricsBackend>, kind: CommandKind) -> Self {
        metrics.command_started(kind);
        Self {
            metrics: Arc::clone(metrics),
            kind,
            started: Instant::now(),
            label: OutcomeLabel::Dropped,
        }
    }

    fn finish(mut self, label: OutcomeLabel) {
        self.label = label;
    }
}

impl Drop for MetricsSpan {
    fn drop(&mut self) {
        self.metrics
            .command_finished(self.kind, self.label, self.started.elapsed());
    }
}

/// Runs commands under the pool, the stats tracker and a per-kind deadline.
pub struct CommandExecutor {
    service: Arc<TrackingService>,
    pool: WorkerPool,
    stats: Arc<CommandStats>,
    metrics: Arc<dyn MetricsBackend>,
    cfg: ExecutorConfig,
}

impl CommandExecutor {
    pub fn new(service: Arc<TrackingService>, cfg: ExecutorConfig) -> Self {
        Self {
            service,
            pool: WorkerPool::new(cfg.workers),
            stats: Arc::new(CommandStats::new()),
            metrics: Arc::new(NoopMetrics),
            cfg,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsBackend>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_stats(mut self, stats: Arc<CommandStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn stats(&self) -> &Arc<CommandStats> {
        &self.stats
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.cfg
    }

    pub fn service(&self) -> &Arc<TrackingService> {
        &self.service
    }

    /// Run `command` to an [`Outcome`].
    ///
    /// Waits for a pool slot, acknowledges, races the work against its
    /// deadline and responds once. Stats and the slot are released when the
    /// outcome is known, even if the work itself keeps running. Dropping the
    /// returned future releases them too and reports the command as dropped.
    #[instrument(skip_all, fields(command_id = %id, command = %command.kind()))]
    pub async fn execute(
        &self,
        id: &CommandId,
        command: &Command,
        responder: &dyn Responder,
    ) -> Outcome {
        let kind = command.kind();
        let _slot = self.pool.acquire().await;
        let guard = self.stats.track();
        let span = MetricsSpan::start(&self.metrics, kind);

        responder.acknowledge(id, command).await;

        let outcome = self.race(command.clone(), self.cfg.deadline(kind)).await;
        debug!(
            outcome = %outcome.label(),
            elapsed_ms = guard.elapsed().as_millis() as u64,
            "command finished"
        );

        responder.respond(id, command, &outcome).await;
        span.finish(outcome.label());
        outcome
    }

    async fn race(&self, command: Command, deadline: Duration) -> Outcome {
        let cancel = CancellationToken::new();
        let service = Arc::clone(&self.service);
        let token = cancel.clone();
        let mut work = tokio::spawn(async move { run(&service, command, &token).await });

        tokio::select! {
            joined = &mut work => Outcome::from(joined),
            _ = tokio::time::sleep(deadline) => {
                match self.cfg.timeout_policy {
                    TimeoutPolicy::Abandon => {
                        warn!(
                            deadline_secs = deadline.as_secs(),
                            "deadline passed; abandoning work"
                        );
                    }
                    TimeoutPolicy::Cancel => {
                        warn!(
                            deadline_secs = deadline.as_secs(),
                            "deadline passed; cancelling work"
                        );
                        cancel.cancel();
                    }
                }
                Outcome::Timeout
            }
        }
    }
}

async fn run(
    service: &TrackingService,
    command: Command,
    cancel: &CancellationToken,
) -> Result<CommandOutput, TrackError> {
    match command {
        Command::AddPlayer(identity) => service
            .add_player(identity, cancel)
            .await
            .map(CommandOutput::Added),
        Command::ListPlayers => service.list_players().await.map(CommandOutput::Listed),
    }
}
