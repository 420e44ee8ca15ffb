//! # Measurement Sessions
//!
//! [`SessionController`] runs the `Idle -> Running -> Idle` lifecycle:
//!
//! - `start()` resolves the power coefficients, captures the initial snapshot
//!   and spawns a single ticker task sampling network counters every
//!   `tick_interval_ms`.
//! - Each tick charges the radios for the interval since the previous tick.
//!   Read failures skip the tick and are recorded; they never end the session.
//! - `stop()` cancels the ticker and waits for it to exit, folds in the CPU
//!   delta since start plus any residual network interval, and returns a
//!   [`DrainReport`].
//!
//! Calling `start()` on a running controller discards the running session and
//! starts a fresh one, unless the config's `start_policy` is `reject`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use drain_metrics::config::SessionConfig;
//! use drain_metrics::counters::ProcCounterSource;
//! use drain_metrics::power::PowerProfile;
//! use drain_metrics::session::SessionController;
//!
//! #[tokio::main]
//! async fn main() -> drain_metrics::Result<()> {
//!     let config = SessionConfig::default();
//!     let profile = PowerProfile::from_json_file("power_profile.json")?;
//!     let controller = SessionController::new(
//!         Arc::new(ProcCounterSource::from_config(&config)),
//!         Arc::new(profile),
//!         config,
//!     )?;
//!
//!     controller.start().await?;
//!     tokio::time::sleep(std::time::Duration::from_secs(10)).await;
//!     let report = controller.stop().await?;
//!     println!("{} mAh ({:.4}% of battery)", report.total_mah, report.total_fraction * 100.0);
//!     Ok(())
//! }
//! ```

mod report;
mod state;

pub use report::{DrainReport, TickStats};
pub use state::Session;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::config::{SessionConfig, StartPolicy};
use crate::counters::CounterSource;
use crate::drain::DrainTotals;
use crate::error::{Error, Result};
use crate::power::{Coefficients, PowerModel};

/// State shared between the caller and the ticker task
struct Shared {
    source: Arc<dyn CounterSource>,
    model: Arc<dyn PowerModel>,
    config: SessionConfig,
    /// `Some` while running. Every start, tick and stop goes through this lock.
    session: Mutex<Option<Session>>,
}

impl Shared {
    fn tick(&self) {
        let mut guard = self.session.lock();
        let Some(session) = guard.as_mut() else {
            return;
        };

        match session.tick(self.source.as_ref()) {
            Ok(increment) if increment.is_zero() => trace!("Idle tick"),
            Ok(increment) => debug!(
                wifi_mah = increment.wifi_mah,
                mobile_mah = increment.mobile_mah,
                "Applied tick"
            ),
            Err(e) if e.is_tick_local() => warn!(error = %e, "Skipping tick"),
            Err(e) => error!(error = %e, "Skipping tick on unexpected error"),
        }
    }
}

/// Handle to the running ticker task
struct Ticker {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(shared: Arc<Shared>) -> Self {
        let period = shared.config.tick_interval();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            // a late tick is dropped, never run back to back with the next one
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => shared.tick(),
                }
            }
            trace!("Ticker exited");
        });

        Self { stop_tx, handle }
    }

    /// Signals the task and waits for it to exit
    async fn shutdown(self) {
        let _ = self.stop_tx.send(());
        if let Err(e) = self.handle.await {
            if e.is_panic() {
                warn!(error = %e, "Ticker task panicked");
            }
        }
    }
}

/// Orchestrates drain measurement sessions
///
/// At most one session is active per controller.
pub struct SessionController {
    shared: Arc<Shared>,
    /// Serialises start/stop; held across the ticker join
    lifecycle: tokio::sync::Mutex<Option<Ticker>>,
}

impl SessionController {
    /// Creates an idle controller.
    ///
    /// Fails with [`Error::Config`] for an invalid configuration.
    pub fn new(
        source: Arc<dyn CounterSource>,
        model: Arc<dyn PowerModel>,
        config: SessionConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shared: Arc::new(Shared { source, model, config, session: Mutex::new(None) }),
            lifecycle: tokio::sync::Mutex::new(None),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.shared.config
    }

    pub fn is_running(&self) -> bool {
        self.shared.session.lock().is_some()
    }

    /// Running totals of the active session, without stopping it
    pub fn current_totals(&self) -> Option<DrainTotals> {
        self.shared.session.lock().as_ref().map(Session::totals)
    }

    /// Starts a new session.
    ///
    /// A running session is replaced, or with [`StartPolicy::Reject`] left
    /// untouched and [`Error::AlreadyRunning`] returned.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock().await;

        if lifecycle.is_some() && self.shared.config.start_policy == StartPolicy::Reject {
            return Err(Error::AlreadyRunning);
        }
        if let Some(ticker) = lifecycle.take() {
            info!("Session already running, restarting");
            ticker.shutdown().await;
            self.shared.session.lock().take();
        }

        let coefficients = Coefficients::resolve(self.shared.model.as_ref())?;
        let session = Session::begin(self.shared.source.as_ref(), coefficients)?;
        *self.shared.session.lock() = Some(session);
        *lifecycle = Some(Ticker::spawn(Arc::clone(&self.shared)));

        info!(tick_interval_ms = self.shared.config.tick_interval_ms, "Drain session started");
        Ok(())
    }

    /// Ends the running session and returns its report.
    ///
    /// No tick runs after this returns. The session ends even when the final
    /// CPU read fails; the error is returned and the partial totals dropped.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<DrainReport> {
        let mut lifecycle = self.lifecycle.lock().await;
        let ticker = lifecycle.take().ok_or(Error::NotRunning)?;
        ticker.shutdown().await;

        let session = self.shared.session.lock().take().ok_or(Error::NotRunning)?;
        let report = session.finish(self.shared.source.as_ref(), &self.shared.config)?;

        info!(
            cpu_mah = report.totals.cpu_mah,
            wifi_mah = report.totals.wifi_mah,
            mobile_mah = report.totals.mobile_mah,
            total_mah = report.total_mah,
            elapsed_secs = report.elapsed.as_secs_f64(),
            skipped_ticks = report.ticks.skipped,
            "Drain session stopped"
        );
        Ok(report)
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(ticker) = self.lifecycle.get_mut().take() {
            ticker.handle.abort();
        }
    }
}
