//! # Network Traffic Counters
//!
//! Per-interface byte counters from the kernel, folded into the four
//! cumulative figures drain attribution needs: Wi-Fi rx/tx and mobile rx/tx.

pub mod interface;
pub mod traffic;

pub use interface::{
    parse_net_dev, read_net_dev, InterfaceClassifier, InterfaceStats, InterfaceType, NET_DEV_PATH,
};
pub use traffic::TrafficCounters;
