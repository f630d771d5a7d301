//! Legacy temperature frame for receivers predating PGN 130312.
//!
//! Layout (big-endian): `['T', deci_hi, deci_lo, raw_hi, raw_lo, 0, 0, 0]`.
use crate::core::TemperatureReading;
use crate::protocol::transport::can_frame::CanFrame;
use embedded_can::StandardId;

/// Standard identifier of the legacy temperature frame.
pub const DEFAULT_LEGACY_TEMPERATURE_ID: u16 = 0x0A2;
/// Leading tag byte (`'T'`).
pub const LEGACY_TEMPERATURE_TAG: u8 = 0x54;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegacyTemperatureEncoder {
    id: StandardId,
}

impl LegacyTemperatureEncoder {
    pub const fn new(id: StandardId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> StandardId {
        self.id
    }

    pub fn encode(&self, reading: &TemperatureReading) -> CanFrame {
        let deci = reading.deci_celsius.to_be_bytes();
        let raw = reading.raw.count().to_be_bytes();
        CanFrame {
            id: self.id.into(),
            data: [LEGACY_TEMPERATURE_TAG, deci[0], deci[1], raw[0], raw[1], 0, 0, 0],
            len: 8,
        }
    }
}

impl Default for LegacyTemperatureEncoder {
    fn default() -> Self {
        Self::new(StandardId::new(DEFAULT_LEGACY_TEMPERATURE_ID).unwrap_or(StandardId::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AcquisitionStatus, RawSample};

    #[test]
    /// Signed decicelsius and raw count are packed big-endian.
    fn test_legacy_layout() {
        let reading = TemperatureReading {
            raw: RawSample::new(0x0ABC),
            celsius: -12.5,
            deci_celsius: -125,
            status: AcquisitionStatus::Converted,
        };
        let frame = LegacyTemperatureEncoder::default().encode(&reading);
        assert_eq!(frame.raw_id(), 0x0A2);
        assert_eq!(frame.data, [0x54, 0xFF, 0x83, 0x0A, 0xBC, 0, 0, 0]);
        assert_eq!(frame.len, 8);
    }
}
