//! # Counter Sources and Snapshots
//!
//! A [`CounterSource`] reads the raw cumulative counters the estimator works
//! from. [`CounterSnapshot`] freezes one reading of all of them together with a
//! monotonic timestamp.
//!
//! The Linux adapter, [`ProcCounterSource`], reads `/proc/stat` and
//! `/proc/net/dev`. Tests substitute scripted sources.

mod linux;

pub use linux::ProcCounterSource;

use tokio::time::Instant;

use crate::cpu::CpuTimes;
use crate::error::Result;
use crate::network::TrafficCounters;

#[cfg(test)]
use mockall::automock;

/// Provider of cumulative CPU and network counters.
///
/// Implementations must return monotonic, non-decreasing values and must fail
/// instead of returning a partial reading.
#[cfg_attr(test, automock)]
pub trait CounterSource: Send + Sync {
    /// Current accumulated CPU active/idle ticks
    fn cpu_times(&self) -> Result<CpuTimes>;

    /// Current cumulative Wi-Fi and mobile byte counters, from a single read
    fn traffic(&self) -> Result<TrafficCounters>;
}

/// Immutable capture of every counter at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterSnapshot {
    pub cpu: CpuTimes,
    pub traffic: TrafficCounters,
    /// Monotonic time of the capture
    pub captured_at: Instant,
}

impl CounterSnapshot {
    /// Reads all counters from `source`.
    ///
    /// Any unreadable source fails the whole capture.
    pub fn capture(source: &dyn CounterSource) -> Result<Self> {
        let cpu = source.cpu_times()?;
        let traffic = source.traffic()?;
        Ok(Self { cpu, traffic, captured_at: Instant::now() })
    }

    pub fn cpu_active_ticks(&self) -> u64 {
        self.cpu.active_ticks
    }

    pub fn cpu_idle_ticks(&self) -> u64 {
        self.cpu.idle_ticks
    }

    pub fn wifi_rx_bytes(&self) -> u64 {
        self.traffic.wifi_rx_bytes
    }

    pub fn wifi_tx_bytes(&self) -> u64 {
        self.traffic.wifi_tx_bytes
    }

    pub fn mobile_rx_bytes(&self) -> u64 {
        self.traffic.mobile_rx_bytes
    }

    pub fn mobile_tx_bytes(&self) -> u64 {
        self.traffic.mobile_tx_bytes
    }
}
