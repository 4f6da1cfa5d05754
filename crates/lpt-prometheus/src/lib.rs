//! Prometheus metrics backend for the ranked tracker.
//!
//! [`PrometheusMetrics`] implements [`lpt_core::MetricsBackend`] and keeps its
//! collectors in a private [`Registry`].
//!
//! ## Metrics
//! - `lpt_commands_started_total{command}` - Counter
//! - `lpt_commands_completed_total{command, outcome}` - Counter
//! - `lpt_command_duration_seconds{command}` - Histogram
//! - `lpt_commands_active` - Gauge
//! - `lpt_refresh_players_total{result}` - Counter
//!
//! ## HTTP Server
//! This crate does not serve `/metrics`; encode [`PrometheusMetrics::gather`]
//! with a [`TextEncoder`] from whatever HTTP stack the application runs.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
