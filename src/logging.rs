//! Tracing subscriber setup for hosts and demos
//!
//! The library itself only emits `tracing` events. Hosts that do not install
//! their own subscriber can call [`init_logging`] once at startup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Directive used when neither `RUST_LOG` nor the caller sets one
pub const DEFAULT_DIRECTIVE: &str = "drain_metrics=info";

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// `default_directive` applies when `RUST_LOG` is unset or invalid. Calling
/// this again, or after the host installed its own subscriber, is a no-op.
pub fn init_logging(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| {
            Error::config(format!("invalid log directive '{}': {}", default_directive, e))
        })?;

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    if installed.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
    Ok(())
}
