//! Runs one drain session against the local `/proc` counters.
//!
//! Usage: `drain_session <power_profile.json> [seconds] [session_config.json]`

use std::sync::Arc;
use std::time::Duration;

use drain_metrics::logging::{init_logging, DEFAULT_DIRECTIVE};
use drain_metrics::prelude::*;

const USAGE: &str = "usage: drain_session <power_profile.json> [seconds] [config.json]";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(DEFAULT_DIRECTIVE)?;

    let mut args = std::env::args().skip(1);
    let profile_path = args.next().ok_or_else(|| Error::Config(USAGE.into()))?;
    let seconds = match args.next() {
        Some(s) => s
            .parse::<u64>()
            .map_err(|e| Error::Config(format!("bad duration '{}': {}", s, e)))?,
        None => 5,
    };
    let config = match args.next() {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };

    let profile = PowerProfile::from_json_file(&profile_path)?;
    let plugin = DrainPlugin::with_proc_counters(Arc::new(profile), config)?;

    let started = plugin.handle("start").await;
    println!("start: {}", started.to_json()?);
    if !started.is_ok() {
        return Ok(());
    }

    for elapsed in 1..=seconds {
        tokio::time::sleep(Duration::from_secs(1)).await;
        if let Some(totals) = plugin.controller().current_totals() {
            println!(
                "{:>3}s  cpu pending  wifi {:.6} mAh  mobile {:.6} mAh",
                elapsed, totals.wifi_mah, totals.mobile_mah
            );
        }
    }

    println!("stop: {}", plugin.handle("stop").await.to_json()?);
    Ok(())
}
