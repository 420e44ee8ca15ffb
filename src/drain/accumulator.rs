use serde::{Deserialize, Serialize};

use super::classifier::TrafficActivity;
use crate::cpu::{CpuDelta, TICKS_PER_HOUR};
use crate::power::Coefficients;

/// Seconds in one hour, the divisor turning `mA * s` into mAh
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Running charge per component in mAh
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrainTotals {
    #[serde(rename = "cpu")]
    pub cpu_mah: f64,
    #[serde(rename = "wifi")]
    pub wifi_mah: f64,
    #[serde(rename = "mobile")]
    pub mobile_mah: f64,
}

impl DrainTotals {
    pub fn total_mah(&self) -> f64 {
        self.cpu_mah + self.wifi_mah + self.mobile_mah
    }
}

/// Charge added to the radios by one interval
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkIncrement {
    pub wifi_mah: f64,
    pub mobile_mah: f64,
}

impl NetworkIncrement {
    pub fn is_zero(&self) -> bool {
        self.wifi_mah == 0.0 && self.mobile_mah == 0.0
    }
}

/// Radio charge for an interval of `scale_secs` seconds.
///
/// Wi-Fi rx and tx are charged separately. The mobile radio is charged once if
/// either direction was active. Zero, negative or non-finite intervals charge
/// nothing.
pub fn network_increment(
    activity: &TrafficActivity,
    scale_secs: f64,
    coefficients: &Coefficients,
) -> NetworkIncrement {
    if !scale_secs.is_finite() || scale_secs <= 0.0 {
        return NetworkIncrement::default();
    }

    let mut increment = NetworkIncrement::default();
    if activity.wifi_rx {
        increment.wifi_mah += coefficients.wifi_rx_ma / SECONDS_PER_HOUR * scale_secs;
    }
    if activity.wifi_tx {
        increment.wifi_mah += coefficients.wifi_tx_ma / SECONDS_PER_HOUR * scale_secs;
    }
    if activity.mobile_active() {
        increment.mobile_mah += coefficients.radio_active_ma / SECONDS_PER_HOUR * scale_secs;
    }
    increment
}

/// CPU charge for the ticks spent between session start and stop.
///
/// Idle draw is charged for idle ticks, and both active and idle draw are
/// charged for active ticks.
pub fn cpu_increment(delta: &CpuDelta, coefficients: &Coefficients) -> f64 {
    let idle = delta.idle_ticks as f64;
    let active = delta.active_ticks as f64;

    coefficients.cpu_idle_ma * idle / TICKS_PER_HOUR
        + coefficients.cpu_active_ma * active / TICKS_PER_HOUR
        + coefficients.cpu_idle_ma * active / TICKS_PER_HOUR
}

/// Accumulates per-component drain across the ticks of one session.
///
/// Totals only ever grow: every increment is built from non-negative
/// coefficients and non-negative deltas.
#[derive(Debug, Clone, Default)]
pub struct DrainAccumulator {
    totals: DrainTotals,
}

impl DrainAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> DrainTotals {
        self.totals
    }

    pub fn apply_network(
        &mut self,
        activity: &TrafficActivity,
        scale_secs: f64,
        coefficients: &Coefficients,
    ) -> NetworkIncrement {
        let increment = network_increment(activity, scale_secs, coefficients);
        self.totals.wifi_mah += increment.wifi_mah;
        self.totals.mobile_mah += increment.mobile_mah;
        increment
    }

    pub fn apply_cpu(&mut self, delta: &CpuDelta, coefficients: &Coefficients) -> f64 {
        let increment = cpu_increment(delta, coefficients);
        self.totals.cpu_mah += increment;
        increment
    }
}
