//! Session configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```rust
//! use drain_metrics::config::SessionConfig;
//!
//! let config = SessionConfig::from_json_str(r#"{ "tick_interval_ms": 500 }"#).unwrap();
//! assert_eq!(config.tick_interval().as_millis(), 500);
//! assert_eq!(config.proc_stat_path.to_str(), Some("/proc/stat"));
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cpu::PROC_STAT_PATH;
use crate::error::{Error, Result};
use crate::network::{InterfaceClassifier, NET_DEV_PATH};

/// Default period of the network sampling tick
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Lower bound (exclusive) of the residual interval folded in on stop
pub const DEFAULT_RESIDUAL_MIN_MS: u64 = 100;

/// Upper bound (exclusive) of the residual interval folded in on stop
pub const DEFAULT_RESIDUAL_MAX_MS: u64 = 900;

/// Interface name prefixes of cellular data links
pub const DEFAULT_MOBILE_PREFIXES: [&str; 7] =
    ["rmnet", "rev_rmnet", "v4-rmnet", "ccmni", "wwan", "pdp", "ppp"];

/// What `start()` does when a session is already running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartPolicy {
    /// Discard the running session and start a fresh one
    #[default]
    Restart,
    /// Fail with [`Error::AlreadyRunning`] and leave the running session alone
    Reject,
}

/// Configuration for a drain measurement session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Period of the network sampling tick in milliseconds
    pub tick_interval_ms: u64,
    /// Residual intervals shorter than or equal to this are dropped on stop
    pub residual_min_ms: u64,
    /// Residual intervals longer than or equal to this are dropped on stop
    pub residual_max_ms: u64,
    /// CPU accounting file
    pub proc_stat_path: PathBuf,
    /// Per-interface counter table
    pub net_dev_path: PathBuf,
    /// Interface name prefixes attributed to the mobile radio
    pub mobile_interface_prefixes: Vec<String>,
    /// Interface name prefixes excluded from all traffic totals
    pub ignored_interface_prefixes: Vec<String>,
    pub start_policy: StartPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            residual_min_ms: DEFAULT_RESIDUAL_MIN_MS,
            residual_max_ms: DEFAULT_RESIDUAL_MAX_MS,
            proc_stat_path: PathBuf::from(PROC_STAT_PATH),
            net_dev_path: PathBuf::from(NET_DEV_PATH),
            mobile_interface_prefixes: DEFAULT_MOBILE_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignored_interface_prefixes: vec!["lo".to_string()],
            start_policy: StartPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::config("tick_interval_ms must be greater than zero"));
        }
        if self.residual_min_ms >= self.residual_max_ms {
            return Err(Error::config(format!(
                "residual window is empty: min {} ms >= max {} ms",
                self.residual_min_ms, self.residual_max_ms
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Whether an interval not yet covered by a tick should be charged on stop
    pub fn is_residual(&self, elapsed: Duration) -> bool {
        elapsed > Duration::from_millis(self.residual_min_ms)
            && elapsed < Duration::from_millis(self.residual_max_ms)
    }

    pub fn interface_classifier(&self) -> InterfaceClassifier {
        InterfaceClassifier::new(
            self.mobile_interface_prefixes.iter().cloned(),
            self.ignored_interface_prefixes.iter().cloned(),
        )
    }
}
