//! In-memory representation of a classic CAN data frame, standard or extended.
use crate::protocol::transport::can_id::CanId;
use embedded_can::{ExtendedId, Frame, Id, StandardId};

/// Classic CAN payload capacity.
pub const MAX_FRAME_PAYLOAD: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Frame handed to the bus collaborator.
pub struct CanFrame {
    /// Standard (11-bit) or extended (29-bit) identifier.
    pub id: Id,
    /// Payload buffer; bytes past `len` are zero.
    pub data: [u8; MAX_FRAME_PAYLOAD],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Frame under an 11-bit identifier. `None` when `data` exceeds eight bytes.
    pub fn standard(id: StandardId, data: &[u8]) -> Option<Self> {
        Self::with_id(Id::Standard(id), data)
    }

    /// Frame under a 29-bit NMEA 2000 identifier.
    pub fn extended(id: CanId, data: &[u8]) -> Option<Self> {
        Self::with_id(Id::Extended(id.to_extended_id()), data)
    }

    fn with_id(id: Id, data: &[u8]) -> Option<Self> {
        if data.len() > MAX_FRAME_PAYLOAD {
            return None;
        }
        let mut buffer = [0u8; MAX_FRAME_PAYLOAD];
        buffer[..data.len()].copy_from_slice(data);
        Some(Self {
            id,
            data: buffer,
            len: data.len(),
        })
    }

    /// Raw identifier value regardless of its width.
    pub fn raw_id(&self) -> u32 {
        match self.id {
            Id::Standard(id) => id.as_raw() as u32,
            Id::Extended(id) => id.as_raw(),
        }
    }

    /// NMEA 2000 view of the identifier, only for extended frames.
    pub fn can_id(&self) -> Option<CanId> {
        match self.id {
            Id::Standard(_) => None,
            Id::Extended(id) => Some(CanId::from(id)),
        }
    }

    /// Populated payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        Self::with_id(id.into(), data)
    }

    /// Remote frames are never emitted by this node.
    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}

impl From<CanId> for Id {
    fn from(id: CanId) -> Self {
        Id::Extended(ExtendedId::from(id))
    }
}
