//! Telemetry node: owns the scheduler, the thermometer, the encoders, and the
//! bus, and turns each tick into zero or more transmitted frames.
//!
//! Channels are registered in a fixed order (heartbeat, environmental, then
//! the optional legacy temperature frame), which is also the order frames
//! leave the node when several fire on the same tick. A tick acquires at most
//! one temperature sample, shared by every temperature channel that fires.
//!
//! Transmission is fire-and-forget: a rejected frame is not retried, it is
//! counted in [`TelemetryStats::transmit_failures`] and the tick moves on to
//! the next channel.
use crate::config::NodeConfig;
use crate::core::{AcquisitionStatus, TemperatureReading};
use crate::error::SchedulerError;
use crate::infra::acquisition::{TemperatureSensor, Thermometer};
use crate::infra::calibration::CalibrationSource;
use crate::infra::indicator::{NoIndicator, StatusIndicator};
use crate::protocol::messages::{
    EnvironmentalEncoder, HeartbeatEncoder, LegacyTemperatureEncoder,
};
use crate::protocol::scheduler::{ChannelId, FiredChannels, Scheduler};
use crate::protocol::tick_loop::TickHandler;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::can_bus::CanBus;
use futures_util::Future;

/// Heartbeat, environmental, legacy temperature.
pub const MAX_CHANNELS: usize = 3;

/// Broadcast streams emitted by the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Broadcast {
    Heartbeat,
    Environmental,
    LegacyTemperature,
}

/// Running counters, never reset while the node lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryStats {
    pub ticks: u32,
    pub frames_sent: u32,
    pub transmit_failures: u32,
    /// Conversions that timed out or failed to start.
    pub acquisition_timeouts: u32,
}

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub fired: FiredChannels<MAX_CHANNELS>,
    pub sent: u8,
    pub failed: u8,
    /// Sample taken on this tick, if a temperature channel fired.
    pub reading: Option<TemperatureReading>,
}

//==================================================================================TELEMETRY_NODE
pub struct TelemetryNode<S, Cal, C, I = NoIndicator> {
    scheduler: Scheduler<MAX_CHANNELS>,
    heartbeat_channel: ChannelId,
    environmental_channel: ChannelId,
    legacy_channel: Option<ChannelId>,
    heartbeat: HeartbeatEncoder,
    environmental: EnvironmentalEncoder,
    legacy: Option<LegacyTemperatureEncoder>,
    thermometer: Thermometer<S, Cal>,
    bus: C,
    indicator: I,
    stats: TelemetryStats,
}

impl<S, Cal, C> TelemetryNode<S, Cal, C, NoIndicator>
where
    S: TemperatureSensor,
    Cal: CalibrationSource,
    C: CanBus,
{
    /// Register the configured channels and take ownership of the collaborators.
    pub fn new(
        config: &NodeConfig,
        sensor: S,
        calibration: Cal,
        bus: C,
    ) -> Result<Self, SchedulerError> {
        let mut scheduler = Scheduler::new();
        let heartbeat_channel = scheduler.register_channel(config.heartbeat_period())?;
        let environmental_channel = scheduler.register_channel(config.environmental_period())?;
        let (legacy_channel, legacy) = match config.legacy() {
            Some(legacy) => (
                Some(scheduler.register_channel(legacy.period)?),
                Some(LegacyTemperatureEncoder::new(legacy.id)),
            ),
            None => (None, None),
        };

        let environmental = EnvironmentalEncoder::new(config.temperature_id())
            .with_instance(config.temperature_instance())
            .with_source(config.temperature_source());
        let thermometer = Thermometer::new(sensor, calibration)
            .with_timeout(config.acquisition_timeout_ms());

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Telemetry node ready: {} channels, source address {}",
            scheduler.len(),
            config.source_address()
        );

        Ok(Self {
            scheduler,
            heartbeat_channel,
            environmental_channel,
            legacy_channel,
            heartbeat: HeartbeatEncoder::new(config.heartbeat_id()),
            environmental,
            legacy,
            thermometer,
            bus,
            indicator: NoIndicator,
            stats: TelemetryStats::default(),
        })
    }
}

impl<S, Cal, C, I> TelemetryNode<S, Cal, C, I>
where
    S: TemperatureSensor,
    Cal: CalibrationSource,
    C: CanBus,
    I: StatusIndicator,
{
    /// Toggle `indicator` once per tick.
    pub fn with_indicator<J: StatusIndicator>(
        self,
        indicator: J,
    ) -> TelemetryNode<S, Cal, C, J> {
        TelemetryNode {
            scheduler: self.scheduler,
            heartbeat_channel: self.heartbeat_channel,
            environmental_channel: self.environmental_channel,
            legacy_channel: self.legacy_channel,
            heartbeat: self.heartbeat,
            environmental: self.environmental,
            legacy: self.legacy,
            thermometer: self.thermometer,
            bus: self.bus,
            indicator,
            stats: self.stats,
        }
    }

    /// Advance the scheduler and transmit every frame that fired.
    pub async fn tick(&mut self) -> TickReport {
        self.indicator.toggle();
        self.stats.ticks = self.stats.ticks.wrapping_add(1);

        let fired = self.scheduler.on_tick();
        let mut report = TickReport {
            fired: FiredChannels::new(),
            sent: 0,
            failed: 0,
            reading: None,
        };

        for &channel in fired.iter() {
            let Some(broadcast) = self.broadcast_for(channel) else {
                continue;
            };
            let frame = match broadcast {
                Broadcast::Heartbeat => self.heartbeat.encode(),
                Broadcast::Environmental => {
                    let reading = self.sample(&mut report.reading);
                    self.environmental.encode(reading.celsius)
                }
                Broadcast::LegacyTemperature => {
                    let reading = self.sample(&mut report.reading);
                    match &self.legacy {
                        Some(encoder) => encoder.encode(&reading),
                        None => continue,
                    }
                }
            };

            if self.transmit(broadcast, &frame).await {
                report.sent += 1;
            } else {
                report.failed += 1;
            }
        }

        report.fired = fired;
        report
    }

    /// Acquire once per tick; later channels reuse the cached reading.
    fn sample(&mut self, cache: &mut Option<TemperatureReading>) -> TemperatureReading {
        if let Some(reading) = cache {
            return *reading;
        }
        let reading = self.thermometer.read();
        if reading.status != AcquisitionStatus::Converted {
            self.stats.acquisition_timeouts = self.stats.acquisition_timeouts.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Degraded acquisition ({}), broadcasting raw 0 as {}",
                reading.status,
                reading.celsius
            );
        }
        *cache = Some(reading);
        reading
    }

    async fn transmit(&mut self, _broadcast: Broadcast, frame: &CanFrame) -> bool {
        match self.bus.send(frame).await {
            Ok(()) => {
                self.stats.frames_sent = self.stats.frames_sent.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::trace!("Sent {} frame id={=u32:#x}", _broadcast, frame.raw_id());
                true
            }
            Err(_err) => {
                self.stats.transmit_failures = self.stats.transmit_failures.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Dropped {} frame: {}",
                    _broadcast,
                    defmt::Debug2Format(&_err)
                );
                false
            }
        }
    }

    /// Map a scheduler channel back to its broadcast stream.
    pub fn broadcast_for(&self, channel: ChannelId) -> Option<Broadcast> {
        if channel == self.heartbeat_channel {
            Some(Broadcast::Heartbeat)
        } else if channel == self.environmental_channel {
            Some(Broadcast::Environmental)
        } else if Some(channel) == self.legacy_channel {
            Some(Broadcast::LegacyTemperature)
        } else {
            None
        }
    }

    pub fn stats(&self) -> TelemetryStats {
        self.stats
    }

    pub fn scheduler(&self) -> &Scheduler<MAX_CHANNELS> {
        &self.scheduler
    }

    /// Sequence id the next environmental frame will carry.
    pub fn next_sequence_id(&self) -> u8 {
        self.environmental.sequence().peek()
    }

    pub fn bus(&self) -> &C {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut C {
        &mut self.bus
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        self.thermometer.sensor_mut()
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}

impl<S, Cal, C, I> TickHandler for TelemetryNode<S, Cal, C, I>
where
    S: TemperatureSensor,
    Cal: CalibrationSource,
    C: CanBus,
    I: StatusIndicator,
{
    fn on_tick(&mut self) -> impl Future<Output = ()> + '_ {
        async move {
            self.tick().await;
        }
    }
}
