//! Tick loop pacing: one wait then one tick per iteration.
mod helpers;

use helpers::{MockCanBus, MockTimer, SimulatedAdc, SleepTimer};
use korri_thermo::{
    config::NodeConfig,
    infra::calibration::FactoryCalibration,
    protocol::{
        telemetry::TelemetryNode,
        tick_loop::{TickHandler, TickLoop},
    },
};
use tokio::time::{timeout, Duration};

/// Handler counting its ticks.
struct Probe {
    ticks: u32,
}

impl TickHandler for Probe {
    async fn on_tick(&mut self) {
        self.ticks += 1;
    }
}

#[tokio::test]
async fn test_run_for_waits_before_every_tick() {
    let interval = embassy_time::Duration::from_millis(100);
    let mut tick_loop = TickLoop::new(MockTimer::default(), interval);
    let mut probe = Probe { ticks: 0 };

    tick_loop.run_for(25, &mut probe).await;

    assert_eq!(probe.ticks, 25);
    let timer = tick_loop.into_timer();
    assert_eq!(timer.delays.len(), 25);
    assert!(timer.delays.iter().all(|&d| d == 100));
}

#[tokio::test]
async fn test_run_for_drives_telemetry_node() {
    let config = NodeConfig::builder().build().unwrap();
    let mut node = TelemetryNode::new(
        &config,
        SimulatedAdc::new(900),
        FactoryCalibration::new(1000, 1800),
        MockCanBus::default(),
    )
    .unwrap();
    let mut tick_loop = TickLoop::new(MockTimer::default(), config.tick_interval());
    assert_eq!(tick_loop.interval_ms(), 100);

    tick_loop.run_for(25, &mut node).await;

    assert_eq!(node.stats().ticks, 25);
    assert_eq!(node.bus().frames_with_id(0x19FD0801).len(), 2);
    assert_eq!(node.bus().frames_with_id(0x0A1).len(), 25);
}

#[tokio::test(start_paused = true)]
async fn test_run_keeps_ticking_until_cancelled() {
    let config = NodeConfig::builder().build().unwrap();
    let mut node = TelemetryNode::new(
        &config,
        SimulatedAdc::new(900),
        FactoryCalibration::new(1000, 1800),
        MockCanBus::default(),
    )
    .unwrap();
    let mut tick_loop = TickLoop::new(SleepTimer, config.tick_interval());

    // Ticks land at 100 ms, 200 ms, … 1000 ms; the deadline falls in between.
    let outcome = timeout(Duration::from_millis(1050), tick_loop.run(&mut node)).await;
    assert!(outcome.is_err(), "run never returns on its own");

    assert_eq!(node.stats().ticks, 10);
    assert_eq!(node.bus().frames_with_id(0x19FD0801).len(), 1);
}
