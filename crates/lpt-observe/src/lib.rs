//! Log wiring for the lp tracker binaries.
//!
//! [`LogSettings`] is read from `LPT_LOG_LEVEL` / `LPT_LOG_FORMAT` and
//! [`install`] turns it into the process-wide `tracing` subscriber.
//!
//! ```no_run
//! let settings = lpt_observe::LogSettings::from_env()?;
//! lpt_observe::install(&settings)?;
//! # Ok::<(), lpt_observe::ObserveError>(())
//! ```
mod error;
mod install;
mod settings;

pub use error::ObserveError;
pub use install::install;
pub use settings::{DEFAULT_DIRECTIVE, ENV_LOG_FORMAT, ENV_LOG_LEVEL, LogOutput, LogSettings};
