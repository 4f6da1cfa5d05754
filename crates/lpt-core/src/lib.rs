pub mod error;
pub use error::{CoreError, ErrorKind, RefreshFailure, StoreError, TrackError};

pub mod directory;
pub use directory::{InMemoryStore, PlayerStore};

pub mod tracking;
pub use tracking::{RefreshSummary, TrackingConfig, TrackingService};

pub mod pool;
pub use pool::{Slot, WorkerPool};

pub mod stats;
pub use stats::{CommandStats, StatsGuard, StatsSnapshot};

pub mod metrics;
pub use metrics::{MetricsBackend, NoopMetrics, OutcomeLabel};

pub mod executor;
pub use executor::{CommandExecutor, CommandOutput, ExecutorConfig, Outcome, TimeoutPolicy};

pub mod router;
pub use router::CommandRouter;

pub mod dispatch;
pub use dispatch::{Dispatched, Dispatcher, Responder};

pub mod poller;
pub use poller::{Poller, PollerConfig};

#[cfg(test)]
pub(crate) mod testing;
