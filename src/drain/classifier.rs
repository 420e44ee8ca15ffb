use crate::error::{Error, Result};
use crate::network::TrafficCounters;

/// Which radio directions saw traffic during one interval
///
/// Classification is presence-only: one byte or one gigabyte both count as
/// "active", because the power model is an average draw while active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficActivity {
    pub wifi_rx: bool,
    pub wifi_tx: bool,
    pub mobile_rx: bool,
    pub mobile_tx: bool,
}

impl TrafficActivity {
    /// Compares two counter readings.
    ///
    /// Each flag is true iff its counter strictly increased. A counter that went
    /// backwards (source reset) fails the whole interval with
    /// [`Error::CounterRegression`].
    pub fn classify(previous: &TrafficCounters, next: &TrafficCounters) -> Result<Self> {
        for ((counter, before), (_, after)) in previous.named().into_iter().zip(next.named()) {
            if after < before {
                return Err(Error::regression(counter, before, after));
            }
        }

        Ok(Self {
            wifi_rx: next.wifi_rx_bytes > previous.wifi_rx_bytes,
            wifi_tx: next.wifi_tx_bytes > previous.wifi_tx_bytes,
            mobile_rx: next.mobile_rx_bytes > previous.mobile_rx_bytes,
            mobile_tx: next.mobile_tx_bytes > previous.mobile_tx_bytes,
        })
    }

    /// The mobile radio shares one active state for both directions
    pub fn mobile_active(&self) -> bool {
        self.mobile_rx || self.mobile_tx
    }

    pub fn is_idle(&self) -> bool {
        !(self.wifi_rx || self.wifi_tx || self.mobile_active())
    }
}
