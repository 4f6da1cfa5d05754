//! Periodic background refresh of every tracked player.

use std::{sync::Arc, time::Duration};

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    error::TrackError,
    metrics::{MetricsBackend, NoopMetrics},
    tracking::{RefreshSummary, TrackingService},
};

#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between refresh passes; zero disables polling.
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600),
        }
    }
}

impl PollerConfig {
    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }
}

pub struct Poller {
    service: Arc<TrackingService>,
    metrics: Arc<dyn MetricsBackend>,
    cfg: PollerConfig,
}

impl Poller {
    pub fn new(service: Arc<TrackingService>, cfg: PollerConfig) -> Self {
        Self {
            service,
            metrics: Arc::new(NoopMetrics),
            cfg,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsBackend>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Refresh immediately, then every `interval`, until `cancel` fires.
    ///
    /// Passes never overlap; a pass that overruns delays the next tick.
    pub async fn run(self, cancel: CancellationToken) {
        if !self.cfg.is_enabled() {
            info!("player polling disabled");
            return;
        }

        let mut ticker = tokio::time::interval(self.cfg.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.cfg.interval.as_secs(), "player poller started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    // Errors are already logged per player.
                    let _ = self.poll_once(&cancel).await;
                }
            }
        }
        info!("player poller stopped");
    }

    pub async fn poll_once(
        &self,
        cancel: &CancellationToken,
    ) -> Result<RefreshSummary, TrackError> {
        let result = self.service.refresh_all(cancel).await;
        match &result {
            Ok(summary) => self.metrics.refresh_finished(summary.updated, 0),
            Err(TrackError::Refresh { updated, failures }) => {
                self.metrics.refresh_finished(*updated, failures.len());
            }
            Err(e) => error!(error = %e, "refresh pass failed"),
        }
        result
    }
}
