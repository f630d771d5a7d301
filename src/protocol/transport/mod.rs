//! CAN transport layer: frame representation, 29-bit identifier
//! management, and bus abstraction traits.
//!
//! ## Timing Constants

pub mod can_frame;
pub mod can_id;
pub mod traits;

/// Recommended timeout for sending a single CAN frame (ms).
///
/// Prevents indefinite blocking when the bus is faulty, disconnected, or saturated.
///
/// # Timeout rationale
///
/// On an NMEA 2000 bus @ 250 kbps with CAN arbitration:
/// - Maximum time for one frame (8 bytes): ~0.5 ms (no contention)
/// - With arbitration and retransmissions: ~10–20 ms
/// - Safety margin ×5 → 100 ms
///
/// # Implementation notes
///
/// [`CanBus`](traits::can_bus::CanBus) implementations **SHOULD**
/// enforce a timeout on `send()` so that a stuck bus cannot stall the tick loop.
///
/// # Example
///
/// ```rust,ignore
/// use embassy_time::{with_timeout, Duration};
/// use korri_thermo::protocol::transport::CAN_SEND_TIMEOUT_MS;
///
/// async fn send(&mut self, frame: &CanFrame) -> Result<(), Error> {
///     with_timeout(
///         Duration::from_millis(CAN_SEND_TIMEOUT_MS as u64),
///         self.can.transmit_async(&twai_frame)
///     )
///     .await
///     .map_err(|_| Error::Timeout)?
/// }
/// ```
pub const CAN_SEND_TIMEOUT_MS: u32 = 100;
