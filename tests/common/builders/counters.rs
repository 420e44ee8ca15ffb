use parking_lot::Mutex;

use drain_metrics::counters::CounterSource;
use drain_metrics::cpu::CpuTimes;
use drain_metrics::network::TrafficCounters;
use drain_metrics::{Error, Result};

/// Counter source whose readings are set by the test between ticks
#[derive(Default)]
pub struct ScriptedCounters {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    cpu: CpuTimes,
    traffic: TrafficCounters,
    cpu_unavailable: bool,
    traffic_unavailable: bool,
    traffic_reads: usize,
}

impl ScriptedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cpu(self, active_ticks: u64, idle_ticks: u64) -> Self {
        self.set_cpu(active_ticks, idle_ticks);
        self
    }

    pub fn set_cpu(&self, active_ticks: u64, idle_ticks: u64) {
        self.state.lock().cpu = CpuTimes::new(active_ticks, idle_ticks);
    }

    pub fn set_traffic(&self, wifi_rx: u64, wifi_tx: u64, mobile_rx: u64, mobile_tx: u64) {
        self.state.lock().traffic = TrafficCounters::new(wifi_rx, wifi_tx, mobile_rx, mobile_tx);
    }

    /// Adds bytes on top of the current traffic counters
    pub fn add_traffic(&self, wifi_rx: u64, wifi_tx: u64, mobile_rx: u64, mobile_tx: u64) {
        let mut state = self.state.lock();
        let t = state.traffic;
        state.traffic = TrafficCounters::new(
            t.wifi_rx_bytes + wifi_rx,
            t.wifi_tx_bytes + wifi_tx,
            t.mobile_rx_bytes + mobile_rx,
            t.mobile_tx_bytes + mobile_tx,
        );
    }

    pub fn set_cpu_unavailable(&self, unavailable: bool) {
        self.state.lock().cpu_unavailable = unavailable;
    }

    pub fn set_traffic_unavailable(&self, unavailable: bool) {
        self.state.lock().traffic_unavailable = unavailable;
    }

    pub fn traffic_reads(&self) -> usize {
        self.state.lock().traffic_reads
    }
}

fn unavailable(source_name: &str) -> Error {
    Error::CounterUnavailable {
        source_name: source_name.to_string(),
        message: "scripted failure".to_string(),
    }
}

impl CounterSource for ScriptedCounters {
    fn cpu_times(&self) -> Result<CpuTimes> {
        let state = self.state.lock();
        if state.cpu_unavailable {
            return Err(unavailable("scripted cpu"));
        }
        Ok(state.cpu)
    }

    fn traffic(&self) -> Result<TrafficCounters> {
        let mut state = self.state.lock();
        state.traffic_reads += 1;
        if state.traffic_unavailable {
            return Err(unavailable("scripted net"));
        }
        Ok(state.traffic)
    }
}
