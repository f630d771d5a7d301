//! Liveness beacon: a constant payload under a fixed standard identifier.
use crate::protocol::transport::can_frame::CanFrame;
use embedded_can::StandardId;

/// Standard identifier used when none is configured.
pub const DEFAULT_HEARTBEAT_ID: u16 = 0x0A1;

/// Constant heartbeat payload.
pub const HEARTBEAT_PAYLOAD: [u8; 8] = [0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x00, 0x00, 0x00];

/// Builds heartbeat frames. Carries no sensor data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeartbeatEncoder {
    id: StandardId,
}

impl HeartbeatEncoder {
    pub const fn new(id: StandardId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> StandardId {
        self.id
    }

    pub fn encode(&self) -> CanFrame {
        CanFrame {
            id: self.id.into(),
            data: HEARTBEAT_PAYLOAD,
            len: HEARTBEAT_PAYLOAD.len(),
        }
    }
}

impl Default for HeartbeatEncoder {
    fn default() -> Self {
        // 0x0A1 is below the 11-bit limit.
        Self::new(StandardId::new(DEFAULT_HEARTBEAT_ID).unwrap_or(StandardId::ZERO))
    }
}
