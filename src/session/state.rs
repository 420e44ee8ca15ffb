use tokio::time::Instant;
use tracing::{debug, warn};

use super::report::{DrainReport, TickStats};
use crate::config::SessionConfig;
use crate::counters::{CounterSnapshot, CounterSource};
use crate::cpu::CpuTimes;
use crate::drain::{DrainAccumulator, DrainTotals, NetworkIncrement, TrafficActivity};
use crate::error::Result;
use crate::network::TrafficCounters;
use crate::power::Coefficients;

/// One start-to-stop measurement interval and its running totals.
///
/// CPU counters are read only at start and stop; network counters on every
/// tick.
#[derive(Debug)]
pub struct Session {
    coefficients: Coefficients,
    accumulator: DrainAccumulator,
    start_cpu: CpuTimes,
    previous_traffic: TrafficCounters,
    previous_at: Instant,
    started_at: Instant,
    stats: TickStats,
}

impl Session {
    /// Captures the initial snapshot and zeroes the totals
    pub fn begin(source: &dyn CounterSource, coefficients: Coefficients) -> Result<Self> {
        let snapshot = CounterSnapshot::capture(source)?;
        Ok(Self::from_snapshot(snapshot, coefficients))
    }

    pub fn from_snapshot(snapshot: CounterSnapshot, coefficients: Coefficients) -> Self {
        Self {
            coefficients,
            accumulator: DrainAccumulator::new(),
            start_cpu: snapshot.cpu,
            previous_traffic: snapshot.traffic,
            previous_at: snapshot.captured_at,
            started_at: snapshot.captured_at,
            stats: TickStats::default(),
        }
    }

    pub fn totals(&self) -> DrainTotals {
        self.accumulator.totals()
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Time of the last applied tick (or of the start)
    pub fn previous_at(&self) -> Instant {
        self.previous_at
    }

    /// Samples network counters and charges the interval since the last tick.
    ///
    /// A failed read leaves the previous reading and timestamp in place, so the
    /// next good tick covers the gap. A regression discards the interval and
    /// rebases on the new reading. Either way the failure is recorded in
    /// [`TickStats`] and returned for logging.
    pub fn tick(&mut self, source: &dyn CounterSource) -> Result<NetworkIncrement> {
        match source.traffic() {
            Ok(traffic) => self.advance(traffic, Instant::now()),
            Err(e) => {
                self.stats.skipped += 1;
                self.stats.last_error = Some(e.to_string());
                Err(e)
            },
        }
    }

    /// Charges the interval ending at `now` with counters `traffic`
    pub fn advance(&mut self, traffic: TrafficCounters, now: Instant) -> Result<NetworkIncrement> {
        let scale = now.saturating_duration_since(self.previous_at).as_secs_f64();

        let result = TrafficActivity::classify(&self.previous_traffic, &traffic);
        self.previous_traffic = traffic;
        self.previous_at = now;

        match result {
            Ok(activity) => {
                let increment =
                    self.accumulator.apply_network(&activity, scale, &self.coefficients);
                self.stats.applied += 1;
                Ok(increment)
            },
            Err(e) => {
                self.stats.regressions += 1;
                self.stats.last_error = Some(e.to_string());
                Err(e)
            },
        }
    }

    /// Folds in the CPU delta and any residual network interval, then builds the report.
    ///
    /// Either the report is complete or the whole stop fails: an unreadable
    /// source, a CPU counter that went backwards or a failed residual read is
    /// returned as the error. A traffic regression over the residual interval
    /// is discarded like any other interval.
    pub fn finish(
        mut self,
        source: &dyn CounterSource,
        config: &SessionConfig,
    ) -> Result<DrainReport> {
        let stop_cpu = source.cpu_times()?;
        let delta = self.start_cpu.delta_to(&stop_cpu)?;
        let cpu_mah = self.accumulator.apply_cpu(&delta, &self.coefficients);
        debug!(active = delta.active_ticks, idle = delta.idle_ticks, cpu_mah, "Applied CPU drain");

        let now = Instant::now();
        let residual = now.saturating_duration_since(self.previous_at);
        if config.is_residual(residual) {
            let traffic = source.traffic()?;
            match self.advance(traffic, now) {
                Ok(increment) => debug!(
                    residual_secs = residual.as_secs_f64(),
                    ?increment,
                    "Applied residual interval"
                ),
                Err(e) => warn!(error = %e, "Discarding residual interval"),
            }
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        let capacity = self.coefficients.battery_capacity_mah;
        Ok(DrainReport::new(self.accumulator.totals(), capacity, elapsed, self.stats))
    }
}
