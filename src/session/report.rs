use std::time::Duration;

use serde::Serialize;

use crate::drain::DrainTotals;

/// Bookkeeping of the periodic ticks of one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickStats {
    /// Ticks whose increment was applied (including idle ones)
    pub applied: u64,
    /// Ticks skipped because a counter could not be read
    pub skipped: u64,
    /// Ticks discarded because a counter went backwards
    pub regressions: u64,
    /// Message of the most recent skipped or discarded tick
    pub last_error: Option<String>,
}

/// Final result of a measurement session
///
/// Serialises to the host wire shape
/// `{ "cpu", "wifi", "mobile", "total", "total%" }`. All figures are mAh except
/// `total%`, which is a fraction of full battery capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrainReport {
    #[serde(flatten)]
    pub totals: DrainTotals,
    #[serde(rename = "total")]
    pub total_mah: f64,
    #[serde(rename = "total%")]
    pub total_fraction: f64,
    /// Time between start and stop
    #[serde(skip)]
    pub elapsed: Duration,
    #[serde(skip)]
    pub ticks: TickStats,
}

impl DrainReport {
    pub fn new(
        totals: DrainTotals,
        battery_capacity_mah: f64,
        elapsed: Duration,
        ticks: TickStats,
    ) -> Self {
        let total_mah = totals.total_mah();
        Self { totals, total_mah, total_fraction: total_mah / battery_capacity_mah, elapsed, ticks }
    }

    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
