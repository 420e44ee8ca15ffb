use std::sync::Arc;
use std::time::Duration;

use drain_metrics::counters::{CounterSnapshot, CounterSource, ProcCounterSource};
use drain_metrics::session::SessionController;
use drain_metrics::{Error, Result};

use crate::common::{ProcFixture, TestProfileBuilder};

#[test]
fn test_snapshot_from_fixture_files() -> Result<()> {
    let fixture = ProcFixture::new();
    fixture.set_cpu(4_200, 9_000);
    fixture.set_interfaces(&[
        ("lo", 50_000, 50_000),
        ("wlan0", 8_000, 3_000),
        ("rmnet_data0", 2_000, 1_000),
    ]);

    let source = ProcCounterSource::from_config(&fixture.config());
    let snapshot = CounterSnapshot::capture(&source)?;

    assert_eq!(snapshot.cpu_active_ticks(), 4_200);
    assert_eq!(snapshot.cpu_idle_ticks(), 9_000);
    assert_eq!(snapshot.wifi_rx_bytes(), 8_000);
    assert_eq!(snapshot.wifi_tx_bytes(), 3_000);
    assert_eq!(snapshot.mobile_rx_bytes(), 2_000);
    assert_eq!(snapshot.mobile_tx_bytes(), 1_000);
    Ok(())
}

#[test]
fn test_missing_files_are_unavailable() {
    let fixture = ProcFixture::new();
    fixture.remove_net_dev();
    let source = ProcCounterSource::from_config(&fixture.config());

    assert!(source.cpu_times().is_ok());
    assert!(matches!(source.traffic(), Err(Error::CounterUnavailable { .. })));
    assert!(matches!(CounterSnapshot::capture(&source), Err(Error::CounterUnavailable { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_session_over_proc_files() -> Result<()> {
    let fixture = ProcFixture::new();
    fixture.set_cpu(0, 0);
    fixture.set_interfaces(&[("lo", 0, 0), ("wlan0", 0, 0), ("rmnet0", 0, 0)]);

    let config = fixture.config();
    let source = Arc::new(ProcCounterSource::from_config(&config));
    let profile = Arc::new(TestProfileBuilder::new().build());
    let controller = SessionController::new(source, profile, config)?;
    controller.start().await?;

    // loopback traffic is never charged
    fixture.set_interfaces(&[("lo", 9_999, 9_999), ("wlan0", 1_500, 0), ("rmnet0", 0, 0)]);
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    fixture.set_interfaces(&[("lo", 19_999, 19_999), ("wlan0", 1_500, 0), ("rmnet0", 0, 400)]);
    fixture.set_cpu(36_000, 36_000);

    let report = controller.stop().await?;
    assert!((report.totals.wifi_mah - 80.0 / 3600.0).abs() < 1e-9);
    assert!((report.totals.mobile_mah - 200.0 / 3600.0 * 0.5).abs() < 1e-9);
    assert!((report.totals.cpu_mah - 6.6).abs() < 1e-9);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unparseable_stat_fails_stop() -> Result<()> {
    let fixture = ProcFixture::new();
    let config = fixture.config();
    let source = Arc::new(ProcCounterSource::from_config(&config));
    let profile = Arc::new(TestProfileBuilder::new().build());
    let controller = SessionController::new(source, profile, config)?;
    controller.start().await?;

    std::fs::write(fixture.stat_path(), "intr 1\nctxt 2\n")?;
    assert!(matches!(controller.stop().await, Err(Error::CounterUnavailable { .. })));
    assert!(!controller.is_running());
    Ok(())
}
