//! Creation and inspection of the 29-bit CAN identifiers used by
//! NMEA 2000 (derived from the SAE J1939 specification).
use crate::error::CanIdBuildError;
use embedded_can::ExtendedId;

/// Priority applied when none is requested.
pub const DEFAULT_PRIORITY: u8 = 6;
/// Largest Parameter Group Number representable in 18 bits.
pub const MAX_PGN: u32 = 0x3_FFFF;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Encapsulates an extended CAN identifier (29 bits) and exposes accessors
/// for priority, PGN, destination, and source.
pub struct CanId(pub u32);

impl CanId {
    /// Creates a pre-configured `CanIdBuilder` for a PGN and source address.
    pub fn builder(pgn: u32, source_address: u8) -> CanIdBuilder {
        CanIdBuilder::new(pgn, source_address)
    }

    /// Returns the priority (3 bits, value 0-7) encoded in the CAN ID.
    pub fn priority(&self) -> u8 {
        ((self.0 >> 26) & 0x07) as u8
    }

    /// Extracts the 18-bit PGN, handling the PDU1/PDU2 distinction.
    pub fn pgn(&self) -> u32 {
        let ps = (self.0 >> 8) & 0xFF;
        let pf = (self.0 >> 16) & 0xFF;
        let dp_r = (self.0 >> 24) & 0x03;

        if pf >= 240 {
            // PDU2: PS is the group extension and part of the PGN.
            (dp_r << 16) | (pf << 8) | ps
        } else {
            // PDU1: PS carries the destination.
            (dp_r << 16) | (pf << 8)
        }
    }

    /// Returns the destination address (PDU1) when the PGN requires one.
    pub fn destination(&self) -> Option<u8> {
        let pf = ((self.0 >> 16) & 0xFF) as u8;
        if pf >= 240 {
            None
        } else {
            Some(((self.0 >> 8) & 0xFF) as u8)
        }
    }

    /// Eight-bit source address (logical node identifier on the N2K network).
    pub fn source_address(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Converts into the `embedded-can` identifier used by frames.
    pub fn to_extended_id(&self) -> ExtendedId {
        // Every builder path keeps the value within 29 bits.
        ExtendedId::new(self.0 & ExtendedId::MAX.as_raw()).unwrap_or(ExtendedId::ZERO)
    }
}

impl From<CanId> for ExtendedId {
    fn from(id: CanId) -> Self {
        id.to_extended_id()
    }
}

impl From<ExtendedId> for CanId {
    fn from(id: ExtendedId) -> Self {
        CanId(id.as_raw())
    }
}

//==================================================================================CAN_ID_BUILDER
#[derive(Debug)]
/// Fluent builder that enforces the PDU1/PDU2 rules.
pub struct CanIdBuilder {
    pub priority: u8,
    pub pgn: u32,
    pub source_address: u8,
    pub destination: Option<u8>,
}

impl CanIdBuilder {
    /// Initializes the builder for a given PGN and source address.
    pub fn new(pgn: u32, source_address: u8) -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            pgn,
            source_address,
            destination: None,
        }
    }

    /// Sets the priority (3 bits) to use during construction.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority & 0x07;
        self
    }

    /// Assigns a destination address (PDU1). Implies a directed message.
    pub fn to_destination(mut self, destination_address: u8) -> Self {
        self.destination = Some(destination_address);
        self
    }

    /// Builds the CAN identifier while applying J1939 rules:
    /// - PF < 240 → addressed message (PDU1): `destination` mandatory and PGN PS byte must be `0`
    /// - PF ≥ 240 → broadcast (PDU2): `destination` must not be provided
    /// - R/DP/PF/PS bits are copied from the provided PGN
    ///
    /// For a broadcast this is `(priority << 26) | (pgn << 8) | source_address`.
    pub fn build(self) -> Result<CanId, CanIdBuildError> {
        if self.pgn > MAX_PGN {
            return Err(CanIdBuildError::PgnOutOfRange { pgn: self.pgn });
        }
        let dp_r = (self.pgn >> 16) & 0x03;
        let pf = ((self.pgn >> 8) & 0xFF) as u8;
        let ps = (self.pgn & 0xFF) as u8;

        let ps_field = match self.destination {
            None => {
                if pf < 240 {
                    return Err(CanIdBuildError::InvalidForBroadcast);
                }
                ps
            }
            Some(da) => {
                if pf >= 240 {
                    return Err(CanIdBuildError::InvalidForFocusedMessage { pgn: pf });
                }
                if ps != 0 {
                    return Err(CanIdBuildError::PsFocusMessageMustBeNull);
                }
                da
            }
        };

        Ok(CanId(
            ((self.priority as u32) << 26)
                | (dp_r << 24)
                | ((pf as u32) << 16)
                | ((ps_field as u32) << 8)
                | (self.source_address as u32),
        ))
    }
}
