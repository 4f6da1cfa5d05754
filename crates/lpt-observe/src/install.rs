use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    Layer, Registry, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
    error::ObserveError,
    settings::{LogOutput, LogSettings},
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Install the global subscriber. Fails with [`ObserveError::AlreadyInstalled`]
/// on a second call.
pub fn install(settings: &LogSettings) -> Result<(), ObserveError> {
    let filter = settings.filter()?;
    let layer = output_layer(settings)?;

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("already") {
                ObserveError::AlreadyInstalled
            } else {
                ObserveError::Install(msg)
            }
        })
}

fn output_layer(settings: &LogSettings) -> Result<BoxedLayer, ObserveError> {
    let layer: BoxedLayer = match settings.output {
        LogOutput::Text => fmt::layer()
            .with_ansi(settings.color)
            .with_target(settings.targets)
            .with_timer(local_timer())
            .boxed(),
        LogOutput::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(settings.targets)
            .with_timer(local_timer())
            .boxed(),
        LogOutput::Journald => journald_layer()?,
    };
    Ok(layer)
}

fn local_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald_layer() -> Result<BoxedLayer, ObserveError> {
    tracing_journald::layer()
        .map(|layer| layer.boxed())
        .map_err(|e| ObserveError::Install(format!("journald: {e}")))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald_layer() -> Result<BoxedLayer, ObserveError> {
    Err(ObserveError::JournaldUnavailable)
}
