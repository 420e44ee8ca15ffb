use crate::error::{Error, Result};

/// Accumulated CPU time split into active and idle ticks
///
/// Values are cumulative since boot. Only the difference between two readings
/// carries meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    /// Ticks spent doing work (user, nice, system, iowait, irq, softirq)
    pub active_ticks: u64,
    /// Ticks spent idle
    pub idle_ticks: u64,
}

/// Tick difference between two [`CpuTimes`] readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuDelta {
    pub active_ticks: u64,
    pub idle_ticks: u64,
}

impl CpuTimes {
    pub fn new(active_ticks: u64, idle_ticks: u64) -> Self {
        Self { active_ticks, idle_ticks }
    }

    /// Ticks elapsed between `self` and a later reading
    ///
    /// Fails with [`Error::CounterRegression`] when either counter went backwards.
    pub fn delta_to(&self, later: &CpuTimes) -> Result<CpuDelta> {
        let active_ticks = later
            .active_ticks
            .checked_sub(self.active_ticks)
            .ok_or_else(|| {
                Error::regression("cpu_active_ticks", self.active_ticks, later.active_ticks)
            })?;
        let idle_ticks = later
            .idle_ticks
            .checked_sub(self.idle_ticks)
            .ok_or_else(|| Error::regression("cpu_idle_ticks", self.idle_ticks, later.idle_ticks))?;

        Ok(CpuDelta { active_ticks, idle_ticks })
    }
}

impl CpuDelta {
    pub fn is_zero(&self) -> bool {
        self.active_ticks == 0 && self.idle_ticks == 0
    }
}
