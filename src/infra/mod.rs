//! Hardware-facing building blocks: single-shot sensor acquisition with a
//! bounded wait, the two-point factory calibration that linearizes counts,
//! and the liveness indicator.
pub mod acquisition;
pub mod calibration;
pub mod indicator;
