use std::sync::Arc;
use std::time::Duration;

use drain_metrics::config::SessionConfig;
use drain_metrics::power::PowerKey;
use drain_metrics::session::SessionController;
use drain_metrics::{Error, Result};

use crate::common::{ScriptedCounters, TestProfileBuilder};

const EPSILON: f64 = 1e-9;

fn controller(counters: &Arc<ScriptedCounters>, profile: TestProfileBuilder) -> SessionController {
    let config = SessionConfig::default();
    SessionController::new(counters.clone(), Arc::new(profile.build()), config).unwrap()
}

async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_wifi_session_over_several_ticks() -> Result<()> {
    let counters = Arc::new(ScriptedCounters::new());
    let controller = controller(&counters, TestProfileBuilder::new());
    controller.start().await?;

    // download during ticks one and two, upload during tick three
    counters.add_traffic(1_000, 0, 0, 0);
    advance_ms(1_200).await;
    counters.add_traffic(1_000, 0, 0, 0);
    advance_ms(1_000).await;
    counters.add_traffic(0, 500, 0, 0);
    advance_ms(1_000).await;

    let report = controller.stop().await?;
    let expected_wifi = (80.0 * 2.0 + 120.0) / 3600.0;
    assert!((report.totals.wifi_mah - expected_wifi).abs() < EPSILON);
    assert_eq!(report.totals.mobile_mah, 0.0);
    assert_eq!(report.totals.cpu_mah, 0.0);
    assert!((report.total_fraction - expected_wifi / 3000.0).abs() < EPSILON);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_mobile_radio_charged_once_per_interval() -> Result<()> {
    let counters = Arc::new(ScriptedCounters::new());
    let controller = controller(&counters, TestProfileBuilder::new());
    controller.start().await?;

    counters.add_traffic(0, 0, 64, 64);
    advance_ms(1_500).await;

    let report = controller.stop().await?;
    assert!((report.totals.mobile_mah - 200.0 / 3600.0).abs() < EPSILON);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cpu_charged_from_start_to_stop() -> Result<()> {
    let counters = Arc::new(ScriptedCounters::new().with_cpu(1_000, 5_000));
    let controller = controller(&counters, TestProfileBuilder::new());
    controller.start().await?;

    advance_ms(3_000).await;
    counters.set_cpu(1_000 + 36_000, 5_000 + 36_000);

    let report = controller.stop().await?;
    assert!((report.totals.cpu_mah - 6.6).abs() < EPSILON);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unreadable_network_does_not_end_session() -> Result<()> {
    let counters = Arc::new(ScriptedCounters::new());
    let controller = controller(&counters, TestProfileBuilder::new());
    controller.start().await?;

    counters.set_traffic_unavailable(true);
    advance_ms(3_500).await;
    assert!(controller.is_running());

    counters.set_traffic_unavailable(false);
    counters.add_traffic(0, 0, 1, 0);
    advance_ms(1_000).await;

    let report = controller.stop().await?;
    // the first good tick spans all four seconds since start
    assert!((report.totals.mobile_mah - 200.0 / 3600.0 * 4.0).abs() < EPSILON);
    assert_eq!(report.ticks.skipped, 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stop_twice() -> Result<()> {
    let counters = Arc::new(ScriptedCounters::new());
    let controller = controller(&counters, TestProfileBuilder::new());

    controller.start().await?;
    controller.stop().await?;
    assert!(matches!(controller.stop().await, Err(Error::NotRunning)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_missing_radio_coefficient_fails_start() {
    let counters = Arc::new(ScriptedCounters::new());
    let profile = TestProfileBuilder::new().without(PowerKey::RadioActive);
    let controller = controller(&counters, profile);

    match controller.start().await {
        Err(Error::PowerModelUnavailable { key }) => assert_eq!(key, "radio.active"),
        other => panic!("expected PowerModelUnavailable, got {:?}", other),
    }
    assert!(!controller.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_restart_discards_previous_totals() -> Result<()> {
    let counters = Arc::new(ScriptedCounters::new());
    let controller = controller(&counters, TestProfileBuilder::new());

    controller.start().await?;
    counters.add_traffic(10, 10, 10, 10);
    advance_ms(1_500).await;

    controller.start().await?;
    counters.add_traffic(10, 0, 0, 0);
    advance_ms(1_200).await;

    let report = controller.stop().await?;
    assert!((report.totals.wifi_mah - 80.0 / 3600.0).abs() < EPSILON);
    assert_eq!(report.totals.mobile_mah, 0.0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_ticker_stops_with_session() -> Result<()> {
    let counters = Arc::new(ScriptedCounters::new());
    let controller = controller(&counters, TestProfileBuilder::new());

    controller.start().await?;
    advance_ms(2_500).await;
    controller.stop().await?;
    let reads = counters.traffic_reads();

    advance_ms(10_000).await;
    assert_eq!(counters.traffic_reads(), reads);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shared_controller_across_tasks() -> Result<()> {
    let counters = Arc::new(ScriptedCounters::new());
    let controller = Arc::new(controller(&counters, TestProfileBuilder::new()));
    controller.start().await?;

    let observer = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            let mut previous = 0.0;
            for _ in 0..4 {
                tokio::time::sleep(Duration::from_millis(1_000)).await;
                let total = controller.current_totals().map(|t| t.total_mah()).unwrap_or(previous);
                assert!(total >= previous);
                previous = total;
            }
        })
    };

    for _ in 0..4 {
        counters.add_traffic(1, 1, 1, 1);
        advance_ms(1_000).await;
    }
    observer.await.unwrap();

    let report = controller.stop().await?;
    assert!(report.total_mah > 0.0);
    Ok(())
}
