/// Error type for drain-metrics operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A counter source could not be read or parsed
    #[error("Counter unavailable ({source_name}): {message}")]
    CounterUnavailable { source_name: String, message: String },

    /// A power coefficient could not be resolved
    #[error("Power model unavailable: no coefficient for '{key}'")]
    PowerModelUnavailable { key: String },

    /// A cumulative counter went backwards between two reads
    #[error("Counter regression on {counter}: {previous} -> {current}")]
    CounterRegression { counter: &'static str, previous: u64, current: u64 },

    #[error("Measurement session already running")]
    AlreadyRunning,

    #[error("No measurement session running")]
    NotRunning,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn counter_unavailable<S: Into<String>, M: Into<String>>(
        source_name: S,
        message: M,
    ) -> Self {
        Error::CounterUnavailable { source_name: source_name.into(), message: message.into() }
    }

    pub(crate) fn power_model_unavailable<S: Into<String>>(key: S) -> Self {
        Error::PowerModelUnavailable { key: key.into() }
    }

    pub(crate) fn regression(counter: &'static str, previous: u64, current: u64) -> Self {
        Error::CounterRegression { counter, previous, current }
    }

    pub(crate) fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Error::InvalidData(msg.into())
    }

    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this error is absorbed at the tick boundary rather than surfaced.
    ///
    /// Regressions only invalidate the interval they were observed in. A counter
    /// source that is briefly unreadable costs one tick and nothing more.
    pub fn is_tick_local(&self) -> bool {
        matches!(
            self,
            Error::CounterRegression { .. } | Error::CounterUnavailable { .. } | Error::Io(_)
        )
    }
}

/// Result type for drain-metrics operations
pub type Result<T> = std::result::Result<T, Error>;
