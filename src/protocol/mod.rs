//! Telemetry protocol: CAN transport primitives, message encoders, the
//! channel scheduler, the telemetry node, and the cooperative tick loop.
pub mod messages;
pub mod scheduler;
pub mod telemetry;
pub mod tick_loop;
pub mod transport;
