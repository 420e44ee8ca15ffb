use std::path::PathBuf;

use tracing::trace;

use super::CounterSource;
use crate::config::SessionConfig;
use crate::cpu::{self, CpuTimes};
use crate::error::Result;
use crate::network::{self, InterfaceClassifier, TrafficCounters};

/// Counter source backed by the Linux `/proc` filesystem
#[derive(Debug, Clone)]
pub struct ProcCounterSource {
    stat_path: PathBuf,
    net_dev_path: PathBuf,
    classifier: InterfaceClassifier,
}

impl ProcCounterSource {
    pub fn new(
        stat_path: impl Into<PathBuf>,
        net_dev_path: impl Into<PathBuf>,
        classifier: InterfaceClassifier,
    ) -> Self {
        Self { stat_path: stat_path.into(), net_dev_path: net_dev_path.into(), classifier }
    }

    /// Builds a source from the paths and interface prefixes in `config`.
    ///
    /// Also logs a warning if the kernel does not count CPU time in 1/100 s.
    pub fn from_config(config: &SessionConfig) -> Self {
        cpu::check_clock_ticks();
        Self::new(
            config.proc_stat_path.clone(),
            config.net_dev_path.clone(),
            config.interface_classifier(),
        )
    }
}

impl Default for ProcCounterSource {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl CounterSource for ProcCounterSource {
    fn cpu_times(&self) -> Result<CpuTimes> {
        let times = cpu::read_cpu_times(&self.stat_path)?;
        trace!(active = times.active_ticks, idle = times.idle_ticks, "Read CPU times");
        Ok(times)
    }

    fn traffic(&self) -> Result<TrafficCounters> {
        let table = network::read_net_dev(&self.net_dev_path, &self.classifier)?;
        let counters = TrafficCounters::from_interfaces(&table);
        trace!(?counters, interfaces = table.len(), "Read traffic counters");
        Ok(counters)
    }
}
