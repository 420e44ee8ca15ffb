use super::interface::{InterfaceStats, InterfaceType};

/// Cumulative byte counters split by radio.
///
/// Wi-Fi figures are derived as `total - mobile`, so both must come from the
/// same read of the interface table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficCounters {
    /// Bytes received over Wi-Fi (and any other non-mobile link)
    pub wifi_rx_bytes: u64,
    /// Bytes sent over Wi-Fi (and any other non-mobile link)
    pub wifi_tx_bytes: u64,
    /// Bytes received over the mobile radio
    pub mobile_rx_bytes: u64,
    /// Bytes sent over the mobile radio
    pub mobile_tx_bytes: u64,
}

impl TrafficCounters {
    pub fn new(
        wifi_rx_bytes: u64,
        wifi_tx_bytes: u64,
        mobile_rx_bytes: u64,
        mobile_tx_bytes: u64,
    ) -> Self {
        Self { wifi_rx_bytes, wifi_tx_bytes, mobile_rx_bytes, mobile_tx_bytes }
    }

    /// Builds counters from device totals and the mobile share of them
    pub fn from_totals(total_rx: u64, total_tx: u64, mobile_rx: u64, mobile_tx: u64) -> Self {
        Self {
            wifi_rx_bytes: total_rx.saturating_sub(mobile_rx),
            wifi_tx_bytes: total_tx.saturating_sub(mobile_tx),
            mobile_rx_bytes: mobile_rx,
            mobile_tx_bytes: mobile_tx,
        }
    }

    /// Aggregates a parsed interface table.
    ///
    /// Loopback rows are excluded from the device total; mobile rows make up the
    /// mobile share.
    pub fn from_interfaces<'a, I>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = &'a InterfaceStats>,
    {
        let (mut total_rx, mut total_tx, mut mobile_rx, mut mobile_tx) = (0u64, 0u64, 0u64, 0u64);

        for iface in interfaces {
            match iface.interface_type {
                InterfaceType::Loopback => continue,
                InterfaceType::Mobile => {
                    mobile_rx = mobile_rx.saturating_add(iface.bytes_received);
                    mobile_tx = mobile_tx.saturating_add(iface.bytes_sent);
                },
                InterfaceType::Other => {},
            }
            total_rx = total_rx.saturating_add(iface.bytes_received);
            total_tx = total_tx.saturating_add(iface.bytes_sent);
        }

        Self::from_totals(total_rx, total_tx, mobile_rx, mobile_tx)
    }

    /// Counters paired with their field names, in a fixed order
    pub fn named(&self) -> [(&'static str, u64); 4] {
        [
            ("wifi_rx_bytes", self.wifi_rx_bytes),
            ("wifi_tx_bytes", self.wifi_tx_bytes),
            ("mobile_rx_bytes", self.mobile_rx_bytes),
            ("mobile_tx_bytes", self.mobile_tx_bytes),
        ]
    }
}
