//! Message encoders broadcast by the node.
//!
//! - [`heartbeat`]: constant liveness beacon under a standard identifier.
//! - [`pgn130312`]: NMEA 2000 "Temperature" payload and its encoder, which
//!   owns the 8-bit sequence counter.
//! - [`legacy`]: decicelsius + raw-count frame kept for existing receivers.
use crate::error::{DeserializationError, SerializationError};

pub mod heartbeat;
pub mod legacy;
pub mod pgn130312;

pub use heartbeat::HeartbeatEncoder;
pub use legacy::LegacyTemperatureEncoder;
pub use pgn130312::{EnvironmentalEncoder, Pgn130312, SequenceCounter};

/// Fill value for an 8-bit field whose data is not available.
pub const DATA_UNAVAILABLE_U8: u8 = 0xFF;
/// Fill value for a 16-bit field whose data is not available.
pub const DATA_UNAVAILABLE_U16: u16 = 0xFFFF;
/// Largest valid value of an unsigned 16-bit field (0xFFFE/0xFFFF are reserved).
pub const DATA_MAX_U16: u16 = 0xFFFD;

//==================================================================================PGN_DATA
/// Implemented by every typed PGN struct: a fixed PGN number plus the
/// conversions between the struct and its wire payload.
pub trait PgnData: Sized {
    /// Parameter Group Number carried in the CAN identifier.
    const PGN: u32;
    /// Payload length in bytes.
    const LENGTH: usize;

    /// Deserialize a payload into an instance of the struct.
    fn from_payload(payload: &[u8]) -> Result<Self, DeserializationError>;

    /// Serialize the instance into the provided buffer, returning the length written.
    fn to_payload(&self, buffer: &mut [u8]) -> Result<usize, SerializationError>;
}
