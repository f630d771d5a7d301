//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (CAN ID construction,
//! scheduling, configuration, payload serialization).
use thiserror_no_std::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur while building a 29-bit CAN identifier.
pub enum CanIdBuildError {
    /// Attempt to build a broadcast message (PDU2) with PF < 240.
    #[error("Invalid for broadcast message: PF is too low")]
    InvalidForBroadcast,
    /// Attempt to send an addressed message (PDU1) with PF ≥ 240.
    #[error("Invalid for addressed message: PF is too high: {pgn}")]
    InvalidForFocusedMessage { pgn: u8 },
    /// In PDU1 the lower 8 bits of the PGN must remain zero.
    #[error("PDU1 PGNs require PS = 0")]
    PsFocusMessageMustBeNull,
    /// PGN does not fit in 18 bits.
    #[error("PGN out of range: {pgn}")]
    PgnOutOfRange { pgn: u32 },
}

//==================================================================================SCHEDULER_ERROR
#[derive(Error, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while registering telemetry channels.
pub enum SchedulerError {
    /// A channel must fire at most once per tick, so its period is at least 1.
    #[error("Channel period must be at least one tick")]
    ZeroPeriod,
    /// Every channel slot is already taken.
    #[error("Channel capacity exceeded: {capacity}")]
    CapacityExceeded { capacity: usize },
}

//==================================================================================CONFIG_ERROR
#[derive(Error, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Rejected node configuration.
pub enum ConfigError {
    /// A channel period of zero ticks was requested.
    #[error("Period for {channel} must be at least one tick")]
    ZeroPeriod { channel: &'static str },
    /// Source addresses 254 and 255 are reserved on NMEA 2000.
    #[error("Invalid source address: {address}")]
    InvalidSourceAddress { address: u8 },
    /// Standard identifiers are limited to 11 bits.
    #[error("Standard identifier out of range: {id:#x}")]
    InvalidStandardId { id: u16 },
    /// Tick interval must be non-zero and fit the timer's millisecond range.
    #[error("Invalid tick interval")]
    InvalidTickInterval,
    /// The PGN identifier could not be built.
    #[error(transparent)]
    BuildErr(#[from] CanIdBuildError),
}

//================================================================================CODEC_ERROR

#[derive(Debug, Error, PartialEq, Eq)]
/// Issues encountered while serializing a message into a buffer.
pub enum SerializationError {
    /// Provided buffer is too small for the payload.
    #[error("Buffer too small: needed {needed}, available {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors raised while decoding a payload into a message structure.
pub enum DeserializationError {
    /// Payload size does not match the expected schema.
    #[error("Invalid data length: expected {expected}, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },
}
