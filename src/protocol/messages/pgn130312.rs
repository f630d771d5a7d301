//! PGN 130312 "Temperature" (single frame, 8 bytes).
//!
//! | byte | field                                   |
//! |------|-----------------------------------------|
//! | 0    | sequence id                             |
//! | 1    | instance                                |
//! | 2    | source                                  |
//! | 3-4  | actual temperature, 0.01 K, LE u16      |
//! | 5-6  | set temperature, 0.01 K, LE u16         |
//! | 7    | reserved                                |
use super::{PgnData, DATA_MAX_U16, DATA_UNAVAILABLE_U16, DATA_UNAVAILABLE_U8};
use crate::core::KELVIN_OFFSET;
use crate::error::{CanIdBuildError, DeserializationError, SerializationError};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::CanId;

/// Parameter Group Number of the temperature message.
pub const PGN_TEMPERATURE: u32 = 130312;
/// Priority of the temperature broadcast.
pub const TEMPERATURE_PRIORITY: u8 = 6;
/// Instance reported by this node.
pub const DEFAULT_TEMPERATURE_INSTANCE: u8 = 0;
/// Source selector reporting the on-die sensor as the inside reading.
pub const DEFAULT_TEMPERATURE_SOURCE: u8 = 1;

//==================================================================================PGN_130312
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pgn130312 {
    pub sid: u8,
    pub instance: u8,
    pub source: u8,
    /// 0.01 K units; [`DATA_UNAVAILABLE_U16`] when unknown.
    pub actual_temperature: u16,
    /// 0.01 K units; [`DATA_UNAVAILABLE_U16`] when unknown.
    pub set_temperature: u16,
}

impl Pgn130312 {
    /// Message with every field marked unavailable.
    pub const fn new() -> Self {
        Self {
            sid: DATA_UNAVAILABLE_U8,
            instance: DATA_UNAVAILABLE_U8,
            source: DATA_UNAVAILABLE_U8,
            actual_temperature: DATA_UNAVAILABLE_U16,
            set_temperature: DATA_UNAVAILABLE_U16,
        }
    }

    /// Fixed-size payload.
    pub fn payload(&self) -> [u8; 8] {
        let actual = self.actual_temperature.to_le_bytes();
        let set = self.set_temperature.to_le_bytes();
        [
            self.sid,
            self.instance,
            self.source,
            actual[0],
            actual[1],
            set[0],
            set[1],
            DATA_UNAVAILABLE_U8,
        ]
    }

    /// Actual temperature back in Celsius, `None` when unavailable.
    pub fn actual_temperature_celsius(&self) -> Option<f32> {
        if self.actual_temperature > DATA_MAX_U16 {
            return None;
        }
        Some((self.actual_temperature as f64 / 100.0 - KELVIN_OFFSET) as f32)
    }
}

impl Default for Pgn130312 {
    fn default() -> Self {
        Self::new()
    }
}

impl PgnData for Pgn130312 {
    const PGN: u32 = PGN_TEMPERATURE;
    const LENGTH: usize = 8;

    fn from_payload(payload: &[u8]) -> Result<Self, DeserializationError> {
        if payload.len() < Self::LENGTH {
            return Err(DeserializationError::InvalidDataLength {
                expected: Self::LENGTH,
                actual: payload.len(),
            });
        }
        Ok(Self {
            sid: payload[0],
            instance: payload[1],
            source: payload[2],
            actual_temperature: u16::from_le_bytes([payload[3], payload[4]]),
            set_temperature: u16::from_le_bytes([payload[5], payload[6]]),
        })
    }

    fn to_payload(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
        if buffer.len() < Self::LENGTH {
            return Err(SerializationError::BufferTooSmall {
                needed: Self::LENGTH,
                available: buffer.len(),
            });
        }
        buffer[..Self::LENGTH].copy_from_slice(&self.payload());
        Ok(Self::LENGTH)
    }
}

//==================================================================================CONVERSION
/// `round((celsius + 273.15) * 100)` as an unsigned 0.01 K field.
///
/// Non-finite input maps to [`DATA_UNAVAILABLE_U16`]. Below absolute zero
/// clamps to 0, above the data range clamps to [`DATA_MAX_U16`].
pub fn celsius_to_centikelvin(celsius: f32) -> u16 {
    if !celsius.is_finite() {
        return DATA_UNAVAILABLE_U16;
    }
    let scaled = (celsius as f64 + KELVIN_OFFSET) * 100.0;
    if scaled <= 0.0 {
        return 0;
    }
    // Half away from zero; `scaled` is positive here.
    let rounded = (scaled + 0.5) as u32;
    rounded.min(DATA_MAX_U16 as u32) as u16
}

//==================================================================================SEQUENCE_COUNTER
/// 8-bit sequence id, post-incremented once per environmental frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceCounter(u8);

impl SequenceCounter {
    pub const fn new(start: u8) -> Self {
        Self(start)
    }

    /// Value the next frame will carry.
    pub fn peek(&self) -> u8 {
        self.0
    }

    /// Returns the current value and advances, wrapping 255 → 0.
    pub fn next_id(&mut self) -> u8 {
        let current = self.0;
        self.0 = self.0.wrapping_add(1);
        current
    }
}

//==================================================================================ENCODER
/// Builds PGN 130312 frames from a calibrated temperature.
#[derive(Clone, Debug)]
pub struct EnvironmentalEncoder {
    id: CanId,
    instance: u8,
    source: u8,
    sequence: SequenceCounter,
}

impl EnvironmentalEncoder {
    /// Encoder for a prebuilt identifier (see [`temperature_can_id`]).
    pub fn new(id: CanId) -> Self {
        Self {
            id,
            instance: DEFAULT_TEMPERATURE_INSTANCE,
            source: DEFAULT_TEMPERATURE_SOURCE,
            sequence: SequenceCounter::default(),
        }
    }

    pub fn with_instance(mut self, instance: u8) -> Self {
        self.instance = instance;
        self
    }

    pub fn with_source(mut self, source: u8) -> Self {
        self.source = source;
        self
    }

    pub fn with_sequence(mut self, sequence: SequenceCounter) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn id(&self) -> CanId {
        self.id
    }

    pub fn sequence(&self) -> SequenceCounter {
        self.sequence
    }

    /// Typed message for `celsius`. Consumes one sequence id.
    pub fn message(&mut self, celsius: f32) -> Pgn130312 {
        Pgn130312 {
            sid: self.sequence.next_id(),
            instance: self.instance,
            source: self.source,
            actual_temperature: celsius_to_centikelvin(celsius),
            set_temperature: DATA_UNAVAILABLE_U16,
        }
    }

    /// Wire frame for `celsius`. Consumes one sequence id.
    pub fn encode(&mut self, celsius: f32) -> CanFrame {
        let message = self.message(celsius);
        CanFrame {
            id: self.id.into(),
            data: message.payload(),
            len: Pgn130312::LENGTH,
        }
    }
}

/// Broadcast identifier of PGN 130312 for `source_address`.
pub fn temperature_can_id(source_address: u8) -> Result<CanId, CanIdBuildError> {
    CanId::builder(PGN_TEMPERATURE, source_address)
        .with_priority(TEMPERATURE_PRIORITY)
        .build()
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "pgn130312_tests.rs"]
mod tests;
