/// Default location of the kernel CPU accounting file
pub const PROC_STAT_PATH: &str = "/proc/stat";

/// Label of the aggregate CPU line in `/proc/stat`
pub const AGGREGATE_CPU_LABEL: &str = "cpu";

/// Canonical CPU accounting unit: one tick is 1/100 of a second
pub const TICKS_PER_SECOND: u64 = 100;

/// Ticks in one hour, the divisor turning `mA * ticks` into mAh
pub const TICKS_PER_HOUR: f64 = 360_000.0;

/// Numeric fields required after the label (user through softirq)
pub const REQUIRED_FIELDS: usize = 7;

/// 1-indexed field positions summed into active time:
/// user, nice, system, iowait, irq, softirq
pub const ACTIVE_FIELDS: [usize; 6] = [1, 2, 3, 5, 6, 7];

/// 1-indexed field position of idle time
pub const IDLE_FIELD: usize = 4;
