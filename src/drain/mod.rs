//! # Drain Estimation
//!
//! Turns counter deltas into milliamp-hours.
//!
//! - [`TrafficActivity`] classifies an interval as active or not, per radio
//!   direction.
//! - [`DrainAccumulator`] charges each interval at the profile's average draw
//!   and keeps running [`DrainTotals`].
//!
//! ```rust
//! use drain_metrics::drain::{network_increment, TrafficActivity};
//! use drain_metrics::network::TrafficCounters;
//! use drain_metrics::power::Coefficients;
//!
//! let coefficients = Coefficients {
//!     cpu_idle_ma: 3.0,
//!     cpu_active_ma: 60.0,
//!     wifi_rx_ma: 80.0,
//!     wifi_tx_ma: 120.0,
//!     radio_active_ma: 200.0,
//!     battery_capacity_mah: 3000.0,
//! };
//!
//! let before = TrafficCounters::new(0, 0, 1_000, 500);
//! let after = TrafficCounters::new(0, 0, 1_400, 500);
//! let activity = TrafficActivity::classify(&before, &after).unwrap();
//!
//! let increment = network_increment(&activity, 1.0, &coefficients);
//! assert!((increment.mobile_mah - 200.0 / 3600.0).abs() < 1e-12);
//! ```

mod accumulator;
mod classifier;

pub use accumulator::*;
pub use classifier::TrafficActivity;
