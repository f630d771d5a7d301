//! Minimal abstraction for an asynchronous CAN transmitter. Allows the library
//! to plug into various implementations (embedded HAL, desktop driver, etc.).
use crate::protocol::transport::can_frame::CanFrame;
use futures_util::Future;

/// Contract to hand frames to the bus. Arbitration, mailbox allocation, and
/// filtering stay on the implementation side.
pub trait CanBus {
    type Error: core::fmt::Debug;
    /// Emit a frame on the bus. Asynchronous to accommodate non-blocking drivers.
    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}
