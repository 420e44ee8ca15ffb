//! Drain Metrics - Estimate battery drain per hardware component
//!
//! This crate charges the CPU, the Wi-Fi radio and the mobile radio for the
//! time they spend active during a measurement session, using average current
//! figures from a device power profile.
//!
//! # Features
//!
//! - **CPU Drain**: Active and idle kernel ticks between session start and stop
//! - **Network Drain**: Per-tick sampling of Wi-Fi and mobile byte counters
//! - **Power Profiles**: Coefficients from JSON or any [`power::PowerModel`]
//! - **Linux Counters**: `/proc/stat` and `/proc/net/dev` readers
//! - **Host Bridge**: `"start"`/`"stop"` actions with JSON responses
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use drain_metrics::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let profile = PowerProfile::from_json_file("power_profile.json")?;
//!     let plugin = DrainPlugin::with_proc_counters(Arc::new(profile), SessionConfig::default())?;
//!
//!     plugin.handle("start").await;
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     println!("{}", plugin.handle("stop").await.to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result`] with the crate [`Error`]:
//!
//! ```rust
//! use drain_metrics::{Error, Result};
//!
//! fn example(running: bool) -> Result<()> {
//!     if !running {
//!         return Err(Error::NotRunning);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Thread Safety
//!
//! Counter sources and power models are `Send + Sync`. A
//! [`session::SessionController`] can be shared between tasks; its ticker and
//! callers synchronise on one session lock.

#![doc(html_root_url = "https://docs.rs/drain-metrics/0.1.0")]

pub mod bridge;
pub mod config;
pub mod counters;
pub mod cpu;
pub mod drain;
pub mod error;
pub mod logging;
pub mod network;
pub mod power;
pub mod session;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::bridge::{Action, ActionHandler, DrainPlugin, Response};
    pub use crate::config::SessionConfig;
    pub use crate::counters::{CounterSnapshot, CounterSource, ProcCounterSource};
    pub use crate::drain::{DrainAccumulator, DrainTotals, TrafficActivity};
    pub use crate::error::{Error, Result};
    pub use crate::power::{Coefficients, PowerKey, PowerModel, PowerProfile};
    pub use crate::session::{DrainReport, SessionController};
}
