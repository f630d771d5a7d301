/// Test doubles simulating the converter, the CAN bus, the timer, and the
/// status LED during integration tests.
use korri_thermo::infra::acquisition::{PollStatus, TemperatureSensor};
use korri_thermo::infra::indicator::StatusIndicator;
use korri_thermo::protocol::transport::{
    can_frame::CanFrame,
    traits::{can_bus::CanBus, korri_timer::KorriTimer},
};

#[allow(dead_code)]
/// Converter with a scripted conversion time and a simulated clock.
pub struct SimulatedAdc {
    pub count: u16,
    pub conversion_ms: u32,
    pub elapsed_ms: u32,
    pub conversions: u32,
}

#[allow(dead_code)]
impl SimulatedAdc {
    pub fn new(count: u16) -> Self {
        Self {
            count,
            conversion_ms: 1,
            elapsed_ms: 0,
            conversions: 0,
        }
    }

    /// Converter that never completes within the acquisition bound.
    pub fn stalled() -> Self {
        Self {
            conversion_ms: u32::MAX,
            ..Self::new(0)
        }
    }
}

impl TemperatureSensor for SimulatedAdc {
    type Error = ();

    fn start(&mut self) -> Result<(), Self::Error> {
        self.conversions += 1;
        Ok(())
    }

    fn poll(&mut self, timeout_ms: u32) -> PollStatus {
        if self.conversion_ms <= timeout_ms {
            self.elapsed_ms += self.conversion_ms;
            PollStatus::Ready
        } else {
            self.elapsed_ms += timeout_ms;
            PollStatus::TimedOut
        }
    }

    fn read(&mut self) -> u16 {
        self.count
    }

    fn stop(&mut self) {}
}

#[derive(Default)]
#[allow(dead_code)]
/// In-memory CAN bus recording every accepted frame.
pub struct MockCanBus {
    pub sent: Vec<CanFrame>,
    /// Raw identifiers the bus refuses.
    pub rejected_ids: Vec<u32>,
    pub attempts: u32,
}

#[allow(dead_code)]
impl MockCanBus {
    pub fn rejecting(raw_id: u32) -> Self {
        Self {
            rejected_ids: vec![raw_id],
            ..Self::default()
        }
    }

    pub fn frames_with_id(&self, raw_id: u32) -> Vec<&CanFrame> {
        self.sent.iter().filter(|f| f.raw_id() == raw_id).collect()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BusOff;

impl CanBus for MockCanBus {
    type Error = BusOff;

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        self.attempts += 1;
        if self.rejected_ids.contains(&frame.raw_id()) {
            return Err(BusOff);
        }
        self.sent.push(frame.clone());
        Ok(())
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// Timer that records requested delays and returns immediately.
pub struct MockTimer {
    pub delays: Vec<u32>,
}

impl KorriTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        self.delays.push(millis);
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// LED stand-in counting toggles.
pub struct CountingIndicator {
    pub toggles: u32,
}

impl StatusIndicator for CountingIndicator {
    fn toggle(&mut self) {
        self.toggles += 1;
    }
}

#[allow(dead_code)]
/// Timer based on `tokio::time::sleep`; pair with a paused runtime clock.
pub struct SleepTimer;

impl KorriTimer for SleepTimer {
    async fn delay_ms(&mut self, millis: u32) {
        tokio::time::sleep(tokio::time::Duration::from_millis(millis as u64)).await;
    }
}
