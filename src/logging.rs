//! Logging infrastructure.
//!
//! The library emits structured `tracing` events (per-tile outcomes at
//! debug, bulk operations at info). Host applications that do not carry
//! their own subscriber can install a console subscriber with
//! [`init_logging`]; everyone else should ignore this module and register
//! whatever subscriber they already use.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Install a console subscriber filtered by `RUST_LOG` (defaulting to
/// `info`).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
}
