//! Cooperative tick loop: wait one interval, run one tick, repeat.
//!
//! Single-threaded and run-to-completion: a tick finishes before the next
//! wait begins, so the period between ticks is the interval plus the tick's
//! own duration. Nothing ends the loop short of a reset.
use core::convert::Infallible;

use crate::protocol::transport::traits::korri_timer::KorriTimer;
use embassy_time::Duration;
use futures_util::Future;

/// Work performed once per tick.
pub trait TickHandler {
    fn on_tick(&mut self) -> impl Future<Output = ()> + '_;
}

/// Drives a [`TickHandler`] at a fixed interval.
pub struct TickLoop<T: KorriTimer> {
    timer: T,
    interval_ms: u32,
}

impl<T: KorriTimer> TickLoop<T> {
    /// Intervals longer than `u32::MAX` ms are capped.
    pub fn new(timer: T, interval: Duration) -> Self {
        let interval_ms = interval.as_millis().min(u32::MAX as u64) as u32;
        Self { timer, interval_ms }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Run forever.
    pub async fn run<H: TickHandler>(&mut self, handler: &mut H) -> Infallible {
        #[cfg(feature = "defmt")]
        defmt::info!("Tick loop started, interval {} ms", self.interval_ms);
        loop {
            self.step(handler).await;
        }
    }

    /// Run exactly `ticks` iterations.
    pub async fn run_for<H: TickHandler>(&mut self, ticks: u32, handler: &mut H) {
        for _ in 0..ticks {
            self.step(handler).await;
        }
    }

    async fn step<H: TickHandler>(&mut self, handler: &mut H) {
        self.timer.delay_ms(self.interval_ms).await;
        handler.on_tick().await;
    }

    pub fn into_timer(self) -> T {
        self.timer
    }
}
