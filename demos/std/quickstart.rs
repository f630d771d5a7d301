//! # Quickstart (host simulation)
//!
//! Runs the telemetry node against a simulated converter and a bus that
//! prints every frame. Three seconds of firmware time at the default 100 ms
//! tick: thirty heartbeats, three temperature broadcasts.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use embedded_can::Frame;
use korri_thermo::{
    config::NodeConfig,
    infra::{
        acquisition::{PollStatus, TemperatureSensor},
        calibration::FactoryCalibration,
    },
    protocol::{
        telemetry::TelemetryNode,
        tick_loop::TickLoop,
        transport::{
            can_frame::CanFrame,
            traits::{can_bus::CanBus, korri_timer::KorriTimer},
        },
    },
};
use tokio::time::{sleep, Duration};

// ============================================================================
// Simulated platform
// ============================================================================

/// Converter whose count creeps up by one on every conversion.
struct DriftingAdc {
    count: u16,
}

impl TemperatureSensor for DriftingAdc {
    type Error = ();

    fn start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn poll(&mut self, _timeout_ms: u32) -> PollStatus {
        PollStatus::Ready
    }

    fn read(&mut self) -> u16 {
        self.count += 1;
        self.count
    }

    fn stop(&mut self) {}
}

struct PrintingBus;

impl CanBus for PrintingBus {
    type Error = ();

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        let kind = if frame.is_extended() { "EXT" } else { "STD" };
        println!("{kind} 0x{:08X} {:02X?}", frame.raw_id(), frame.data());
        Ok(())
    }
}

struct TokioTimer;

impl KorriTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

// ============================================================================
// Main application
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== korri-thermo quickstart ===");

    // 1. Configuration (defaults plus the legacy frame every second)
    let config = match NodeConfig::builder().legacy_temperature(0x0A2, 10).build() {
        Ok(config) => config,
        Err(err) => {
            println!("✗ Invalid configuration: {err}");
            return;
        }
    };

    // 2. Factory calibration, normally copied out of system memory at boot
    let calibration = FactoryCalibration::new(1000, 1800);

    // 3. Node + loop
    let mut node = match TelemetryNode::new(
        &config,
        DriftingAdc { count: 899 },
        calibration,
        PrintingBus,
    ) {
        Ok(node) => node,
        Err(err) => {
            println!("✗ Channel registration failed: {err}");
            return;
        }
    };
    let mut tick_loop = TickLoop::new(TokioTimer, config.tick_interval());

    // 4. Three seconds of operation
    tick_loop.run_for(30, &mut node).await;

    let stats = node.stats();
    println!(
        "✓ {} ticks, {} frames sent, {} dropped, {} degraded conversions",
        stats.ticks, stats.frames_sent, stats.transmit_failures, stats.acquisition_timeouts
    );
}
