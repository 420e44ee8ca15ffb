//! # Power Model
//!
//! The estimator never measures current. It multiplies time spent in a state by
//! a constant average draw for that state, taken from a static device power
//! profile. This module defines the keys of that profile, the [`PowerModel`]
//! lookup interface and the [`Coefficients`] a session resolves once at start.
//!
//! ## Example
//!
//! ```rust
//! use drain_metrics::power::{Coefficients, PowerKey, PowerModel, PowerProfile};
//!
//! let profile = PowerProfile::from_pairs([
//!     ("cpu.idle", 3.0),
//!     ("cpu.active", 60.0),
//!     ("wifi.controller.rx", 80.0),
//!     ("wifi.controller.tx", 120.0),
//!     ("radio.active", 200.0),
//!     ("battery.capacity", 3000.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(profile.lookup(PowerKey::RadioActive).unwrap(), 200.0);
//!
//! let coefficients = Coefficients::resolve(&profile).unwrap();
//! assert_eq!(coefficients.battery_capacity_mah, 3000.0);
//! ```

mod profile;

pub use profile::PowerProfile;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[cfg(test)]
use mockall::automock;

/// Component/state keys of the device power profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerKey {
    /// Average CPU draw while idle (mA)
    CpuIdle,
    /// Average CPU draw while active (mA)
    CpuActive,
    /// Wi-Fi controller draw while receiving (mA)
    WifiControllerRx,
    /// Wi-Fi controller draw while transmitting (mA)
    WifiControllerTx,
    /// Mobile radio draw while active in either direction (mA)
    RadioActive,
    /// Full battery capacity (mAh)
    BatteryCapacity,
}

impl PowerKey {
    pub const ALL: [PowerKey; 6] = [
        PowerKey::CpuIdle,
        PowerKey::CpuActive,
        PowerKey::WifiControllerRx,
        PowerKey::WifiControllerTx,
        PowerKey::RadioActive,
        PowerKey::BatteryCapacity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerKey::CpuIdle => "cpu.idle",
            PowerKey::CpuActive => "cpu.active",
            PowerKey::WifiControllerRx => "wifi.controller.rx",
            PowerKey::WifiControllerTx => "wifi.controller.tx",
            PowerKey::RadioActive => "radio.active",
            PowerKey::BatteryCapacity => "battery.capacity",
        }
    }
}

impl fmt::Display for PowerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PowerKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::invalid_data(format!("unknown power profile key '{}'", s)))
    }
}

/// Read-only lookup into a device power profile
#[cfg_attr(test, automock)]
pub trait PowerModel: Send + Sync {
    /// Resolves `key` to a non-negative value (mA, or mAh for capacity).
    ///
    /// Fails with [`Error::PowerModelUnavailable`] when the profile has no value;
    /// callers must never substitute zero.
    fn lookup(&self, key: PowerKey) -> Result<f64>;
}

/// Every coefficient one session needs, resolved up front
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub cpu_idle_ma: f64,
    pub cpu_active_ma: f64,
    pub wifi_rx_ma: f64,
    pub wifi_tx_ma: f64,
    pub radio_active_ma: f64,
    pub battery_capacity_mah: f64,
}

impl Coefficients {
    /// Looks up all six keys; the first missing or invalid one fails the whole resolve
    pub fn resolve(model: &dyn PowerModel) -> Result<Self> {
        let get = |key: PowerKey| -> Result<f64> {
            let value = model.lookup(key)?;
            if !value.is_finite() || value < 0.0 {
                let message = format!("coefficient {} has invalid value {}", key, value);
                return Err(Error::invalid_data(message));
            }
            Ok(value)
        };

        let coefficients = Self {
            cpu_idle_ma: get(PowerKey::CpuIdle)?,
            cpu_active_ma: get(PowerKey::CpuActive)?,
            wifi_rx_ma: get(PowerKey::WifiControllerRx)?,
            wifi_tx_ma: get(PowerKey::WifiControllerTx)?,
            radio_active_ma: get(PowerKey::RadioActive)?,
            battery_capacity_mah: get(PowerKey::BatteryCapacity)?,
        };

        // capacity is a divisor of the final report
        if coefficients.battery_capacity_mah == 0.0 {
            return Err(Error::invalid_data("battery.capacity must be greater than zero"));
        }
        Ok(coefficients)
    }
}
