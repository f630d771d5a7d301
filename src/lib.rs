//! `korri-thermo` library: a `no_std` telemetry node that samples an on-die
//! temperature sensor and broadcasts a heartbeat plus NMEA 2000 PGN 130312
//! frames on a CAN bus. The crate exposes the acquisition layer (sensor
//! polling, factory calibration), the protocol layer (encoders, scheduler,
//! tick loop), and the configuration used to wire them together.
#![no_std]
//==================================================================================
/// Core data types shared by acquisition, encoders, and the telemetry node.
pub mod core;
/// Node configuration and its builder.
pub mod config;
/// Domain errors (CAN identifier construction, scheduling, configuration,
/// serialization).
pub mod error;
/// Hardware-facing layer: sensor acquisition and calibration.
pub mod infra;
/// Telemetry protocol: CAN transport, message encoders, scheduler, tick loop.
pub mod protocol;
//==================================================================================
