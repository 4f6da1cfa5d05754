use std::time::Duration;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, proto::MetricFamily,
};

use lpt_core::{MetricsBackend, OutcomeLabel};
use lpt_model::CommandKind;

/// Buckets sized around the 10s and 30s command deadlines.
const DURATION_BUCKETS: &[f64] = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0];

#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    started: IntCounterVec,
    completed: IntCounterVec,
    duration: HistogramVec,
    active: IntGauge,
    refreshed: IntCounterVec,
}

impl PrometheusMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::with_registry(Registry::new())
    }

    /// Register every collector on `registry`.
    pub fn with_registry(registry: Registry) -> Result<Self, prometheus::Error> {
        let started = IntCounterVec::new(
            Opts::new("lpt_commands_started_total", "Commands admitted to the worker pool"),
            &["command"],
        )?;
        let completed = IntCounterVec::new(
            Opts::new("lpt_commands_completed_total", "Commands that reached an outcome"),
            &["command", "outcome"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new("lpt_command_duration_seconds", "Command execution time")
                .buckets(DURATION_BUCKETS.to_vec()),
            &["command"],
        )?;
        let active = IntGauge::new("lpt_commands_active", "Commands currently holding a slot")?;
        let refreshed = IntCounterVec::new(
            Opts::new("lpt_refresh_players_total", "Players handled by background refresh passes"),
            &["result"],
        )?;

        registry.register(Box::new(started.clone()))?;
        registry.register(Box::new(completed.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(active.clone()))?;
        registry.register(Box::new(refreshed.clone()))?;

        Ok(Self {
            registry,
            started,
            completed,
            duration,
            active,
            refreshed,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn command_started(&self, kind: CommandKind) {
        self.started.with_label_values(&[kind.name()]).inc();
        self.active.inc();
    }

    fn command_finished(&self, kind: CommandKind, outcome: OutcomeLabel, elapsed: Duration) {
        self.completed
            .with_label_values(&[kind.name(), outcome.as_str()])
            .inc();
        self.duration
            .with_label_values(&[kind.name()])
            .observe(elapsed.as_secs_f64());
        self.active.dec();
    }

    fn refresh_finished(&self, updated: usize, failed: usize) {
        self.refreshed
            .with_label_values(&["updated"])
            .inc_by(updated as u64);
        self.refreshed
            .with_label_values(&["failed"])
            .inc_by(failed as u64);
    }
}
