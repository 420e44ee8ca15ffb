use std::path::Path;

use crate::error::{Error, Result};

/// Default location of the kernel per-interface counter table
pub const NET_DEV_PATH: &str = "/proc/net/dev";

/// Numeric columns in a `/proc/net/dev` row (8 receive + 8 transmit)
const NET_DEV_COLUMNS: usize = 16;

/// Column holding received bytes
const RX_BYTES_COLUMN: usize = 0;

/// Column holding transmitted bytes
const TX_BYTES_COLUMN: usize = 8;

/// Represents the role an interface plays in drain attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceType {
    /// Cellular data interface
    Mobile,
    /// Loopback or otherwise ignored interface
    Loopback,
    /// Anything else; counted towards Wi-Fi
    Other,
}

impl std::fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterfaceType::Mobile => write!(f, "Mobile"),
            InterfaceType::Loopback => write!(f, "Loopback"),
            InterfaceType::Other => write!(f, "Other"),
        }
    }
}

/// Byte counters of one interface at the time of the read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceStats {
    /// Name of the interface (e.g., "wlan0", "rmnet_data0")
    pub name: String,
    pub interface_type: InterfaceType,
    /// Total bytes received
    pub bytes_received: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
}

/// Assigns an [`InterfaceType`] based on interface name prefixes
#[derive(Debug, Clone, Default)]
pub struct InterfaceClassifier {
    mobile_prefixes: Vec<String>,
    ignored_prefixes: Vec<String>,
}

impl InterfaceClassifier {
    pub fn new<M, I>(mobile_prefixes: M, ignored_prefixes: I) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            mobile_prefixes: mobile_prefixes.into_iter().map(Into::into).collect(),
            ignored_prefixes: ignored_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, name: &str) -> InterfaceType {
        if self.ignored_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
            InterfaceType::Loopback
        } else if self.mobile_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
            InterfaceType::Mobile
        } else {
            InterfaceType::Other
        }
    }
}

/// Parses the contents of `/proc/net/dev`.
///
/// Header lines carry no `:` and are skipped. A data row with fewer than
/// sixteen numeric columns is an error rather than a zero reading.
pub fn parse_net_dev(
    content: &str,
    classifier: &InterfaceClassifier,
) -> Result<Vec<InterfaceStats>> {
    let mut interfaces = Vec::new();

    for line in content.lines() {
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_data(format!("unnamed interface row: '{}'", line.trim())));
        }

        let columns = counters
            .split_whitespace()
            .map(|token| {
                token.parse::<u64>().map_err(|e| {
                    Error::invalid_data(format!("bad counter '{}' for {}: {}", token, name, e))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        if columns.len() < NET_DEV_COLUMNS {
            return Err(Error::invalid_data(format!(
                "interface {} has {} counter columns, expected {}",
                name,
                columns.len(),
                NET_DEV_COLUMNS
            )));
        }

        interfaces.push(InterfaceStats {
            name: name.to_string(),
            interface_type: classifier.classify(name),
            bytes_received: columns[RX_BYTES_COLUMN],
            bytes_sent: columns[TX_BYTES_COLUMN],
        });
    }

    Ok(interfaces)
}

/// Reads and parses the interface counter table at `path`
pub fn read_net_dev(path: &Path, classifier: &InterfaceClassifier) -> Result<Vec<InterfaceStats>> {
    let source = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::counter_unavailable(&source, e.to_string()))?;
    parse_net_dev(&content, classifier)
        .map_err(|e| Error::counter_unavailable(source, e.to_string()))
}
