use std::path::Path;

use tracing::warn;

use super::constants::{
    ACTIVE_FIELDS, AGGREGATE_CPU_LABEL, IDLE_FIELD, REQUIRED_FIELDS, TICKS_PER_SECOND,
};
use super::types::CpuTimes;
use crate::error::{Error, Result};

/// Parses a single CPU accounting line such as
/// `cpu  4705 356 584 3699 23 23 0 0 0 0`.
///
/// The first token must be the aggregate `cpu` label; fields 1, 2, 3, 5, 6 and 7 after it sum to
/// active ticks and field 4 is idle ticks. Trailing fields (steal, guest, ...)
/// are ignored.
pub fn parse_cpu_line(line: &str) -> Result<CpuTimes> {
    let mut tokens = line.split_whitespace();
    let label = tokens.next().ok_or_else(|| Error::invalid_data("empty CPU accounting line"))?;
    if label != AGGREGATE_CPU_LABEL {
        return Err(Error::invalid_data(format!("unexpected CPU accounting label '{}'", label)));
    }

    let fields = tokens
        .take(REQUIRED_FIELDS)
        .map(|token| {
            token
                .parse::<u64>()
                .map_err(|e| Error::invalid_data(format!("bad CPU field '{}': {}", token, e)))
        })
        .collect::<Result<Vec<u64>>>()?;

    if fields.len() < REQUIRED_FIELDS {
        return Err(Error::invalid_data(format!(
            "CPU accounting line has {} numeric fields, expected at least {}",
            fields.len(),
            REQUIRED_FIELDS
        )));
    }

    let active_ticks = ACTIVE_FIELDS.iter().map(|&i| fields[i - 1]).fold(0u64, u64::saturating_add);
    let idle_ticks = fields[IDLE_FIELD - 1];

    Ok(CpuTimes { active_ticks, idle_ticks })
}

/// Extracts the aggregate `cpu ` line from a full `/proc/stat` dump and parses it
pub fn parse_proc_stat(content: &str) -> Result<CpuTimes> {
    let line = content
        .lines()
        .find(|l| l.split_whitespace().next() == Some(AGGREGATE_CPU_LABEL))
        .ok_or_else(|| Error::invalid_data("no aggregate cpu line"))?;
    parse_cpu_line(line)
}

/// Reads and parses the CPU accounting file at `path`
pub fn read_cpu_times(path: &Path) -> Result<CpuTimes> {
    let source = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::counter_unavailable(&source, e.to_string()))?;
    parse_proc_stat(&content).map_err(|e| Error::counter_unavailable(source, e.to_string()))
}

/// Kernel clock ticks per second as reported by `sysconf(_SC_CLK_TCK)`
pub fn kernel_clock_ticks() -> Option<u64> {
    // SAFETY: sysconf has no preconditions and only reads a configuration value.
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 {
        Some(ticks as u64)
    } else {
        None
    }
}

/// Logs a warning when the kernel does not account CPU time in 1/100 s ticks.
///
/// Returns whether the canonical unit matches.
pub fn check_clock_ticks() -> bool {
    match kernel_clock_ticks() {
        Some(TICKS_PER_SECOND) => true,
        Some(ticks) => {
            warn!(
                ticks,
                expected = TICKS_PER_SECOND,
                "Kernel clock tick rate differs from the canonical CPU unit"
            );
            false
        },
        None => {
            warn!("Unable to query kernel clock tick rate");
            false
        },
    }
}
