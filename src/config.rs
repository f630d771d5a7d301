//! Node configuration: channel periods, identifiers, and timing.
//!
//! Defaults reproduce the reference firmware: a 100 ms tick, a heartbeat on
//! every tick, and a temperature broadcast every ten ticks (1 Hz) from source
//! address 1. Everything is validated once by [`NodeConfigBuilder::build`].
//!
//! ```rust,ignore
//! let config = NodeConfig::builder()
//!     .source_address(35)
//!     .environmental_period(50)
//!     .legacy_temperature(0x0A2, 10)
//!     .build()?;
//! ```
use crate::error::ConfigError;
use crate::infra::acquisition::ACQUISITION_TIMEOUT_MS;
use crate::protocol::messages::heartbeat::DEFAULT_HEARTBEAT_ID;
use crate::protocol::messages::pgn130312::{
    temperature_can_id, DEFAULT_TEMPERATURE_INSTANCE, DEFAULT_TEMPERATURE_SOURCE,
};
use crate::protocol::transport::can_id::CanId;
use embassy_time::Duration;
use embedded_can::StandardId;

/// Default duration of one tick.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);
/// Default NMEA 2000 source address of the node.
pub const DEFAULT_SOURCE_ADDRESS: u8 = 1;
/// Heartbeat fires on every tick by default.
pub const DEFAULT_HEARTBEAT_PERIOD: u32 = 1;
/// Temperature broadcast every ten ticks (1 Hz at the default tick).
pub const DEFAULT_ENVIRONMENTAL_PERIOD: u32 = 10;
/// Highest claimable NMEA 2000 address (254 = null, 255 = global).
pub const MAX_SOURCE_ADDRESS: u8 = 253;

/// Identifier and period of the optional legacy temperature frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegacyChannelConfig {
    pub id: StandardId,
    pub period: u32,
}

//==================================================================================NODE_CONFIG
/// Validated configuration consumed by the telemetry node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeConfig {
    tick_interval: Duration,
    source_address: u8,
    heartbeat_id: StandardId,
    heartbeat_period: u32,
    temperature_id: CanId,
    environmental_period: u32,
    temperature_instance: u8,
    temperature_source: u8,
    legacy: Option<LegacyChannelConfig>,
    acquisition_timeout_ms: u32,
}

impl NodeConfig {
    pub fn builder() -> NodeConfigBuilder {
        NodeConfigBuilder::default()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn source_address(&self) -> u8 {
        self.source_address
    }

    pub fn heartbeat_id(&self) -> StandardId {
        self.heartbeat_id
    }

    pub fn heartbeat_period(&self) -> u32 {
        self.heartbeat_period
    }

    /// 29-bit identifier of the PGN 130312 broadcast.
    pub fn temperature_id(&self) -> CanId {
        self.temperature_id
    }

    pub fn environmental_period(&self) -> u32 {
        self.environmental_period
    }

    pub fn temperature_instance(&self) -> u8 {
        self.temperature_instance
    }

    pub fn temperature_source(&self) -> u8 {
        self.temperature_source
    }

    pub fn legacy(&self) -> Option<LegacyChannelConfig> {
        self.legacy
    }

    pub fn acquisition_timeout_ms(&self) -> u32 {
        self.acquisition_timeout_ms
    }
}

//==================================================================================BUILDER
/// Fluent builder; values are checked in [`build`](Self::build).
#[derive(Clone, Copy, Debug)]
pub struct NodeConfigBuilder {
    tick_interval: Duration,
    source_address: u8,
    heartbeat_id: u16,
    heartbeat_period: u32,
    environmental_period: u32,
    temperature_instance: u8,
    temperature_source: u8,
    legacy: Option<(u16, u32)>,
    acquisition_timeout_ms: u32,
}

impl Default for NodeConfigBuilder {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            source_address: DEFAULT_SOURCE_ADDRESS,
            heartbeat_id: DEFAULT_HEARTBEAT_ID,
            heartbeat_period: DEFAULT_HEARTBEAT_PERIOD,
            environmental_period: DEFAULT_ENVIRONMENTAL_PERIOD,
            temperature_instance: DEFAULT_TEMPERATURE_INSTANCE,
            temperature_source: DEFAULT_TEMPERATURE_SOURCE,
            legacy: None,
            acquisition_timeout_ms: ACQUISITION_TIMEOUT_MS,
        }
    }
}

impl NodeConfigBuilder {
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn source_address(mut self, address: u8) -> Self {
        self.source_address = address;
        self
    }

    /// 11-bit identifier of the heartbeat frame.
    pub fn heartbeat_id(mut self, id: u16) -> Self {
        self.heartbeat_id = id;
        self
    }

    pub fn heartbeat_period(mut self, ticks: u32) -> Self {
        self.heartbeat_period = ticks;
        self
    }

    pub fn environmental_period(mut self, ticks: u32) -> Self {
        self.environmental_period = ticks;
        self
    }

    pub fn temperature_instance(mut self, instance: u8) -> Self {
        self.temperature_instance = instance;
        self
    }

    pub fn temperature_source(mut self, source: u8) -> Self {
        self.temperature_source = source;
        self
    }

    /// Enable the legacy temperature frame under `id`, every `ticks` ticks.
    pub fn legacy_temperature(mut self, id: u16, ticks: u32) -> Self {
        self.legacy = Some((id, ticks));
        self
    }

    pub fn acquisition_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.acquisition_timeout_ms = timeout_ms;
        self
    }

    pub fn build(self) -> Result<NodeConfig, ConfigError> {
        let interval_ms = self.tick_interval.as_millis();
        if interval_ms == 0 || interval_ms > u32::MAX as u64 {
            return Err(ConfigError::InvalidTickInterval);
        }
        if self.source_address > MAX_SOURCE_ADDRESS {
            return Err(ConfigError::InvalidSourceAddress {
                address: self.source_address,
            });
        }
        if self.heartbeat_period == 0 {
            return Err(ConfigError::ZeroPeriod {
                channel: "heartbeat",
            });
        }
        if self.environmental_period == 0 {
            return Err(ConfigError::ZeroPeriod {
                channel: "environmental",
            });
        }

        let heartbeat_id = standard_id(self.heartbeat_id)?;
        let legacy = match self.legacy {
            Some((_, 0)) => {
                return Err(ConfigError::ZeroPeriod {
                    channel: "legacy temperature",
                })
            }
            Some((id, period)) => Some(LegacyChannelConfig {
                id: standard_id(id)?,
                period,
            }),
            None => None,
        };

        Ok(NodeConfig {
            tick_interval: self.tick_interval,
            source_address: self.source_address,
            heartbeat_id,
            heartbeat_period: self.heartbeat_period,
            temperature_id: temperature_can_id(self.source_address)?,
            environmental_period: self.environmental_period,
            temperature_instance: self.temperature_instance,
            temperature_source: self.temperature_source,
            legacy,
            acquisition_timeout_ms: self.acquisition_timeout_ms,
        })
    }
}

fn standard_id(id: u16) -> Result<StandardId, ConfigError> {
    StandardId::new(id).ok_or(ConfigError::InvalidStandardId { id })
}
