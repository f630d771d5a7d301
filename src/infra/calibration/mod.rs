//! Two-point factory calibration of the on-die temperature sensor.
//!
//! The silicon vendor programs two converter counts measured at known
//! temperatures. Linear interpolation between them maps any count to degrees
//! Celsius. The pairs are supplied through [`CalibrationSource`] so the
//! algorithm does not depend on where the platform stores them.
use crate::core::{RawSample, FALLBACK_CELSIUS};

/// Reference temperature of the low factory point.
pub const LOW_REFERENCE_CELSIUS: f32 = 30.0;
/// Reference temperature of the high factory point.
pub const HIGH_REFERENCE_CELSIUS: f32 = 110.0;

//==================================================================================CALIBRATION_PAIR
/// One `(count, reference temperature)` point of the linear map.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationPair {
    pub count: u16,
    pub celsius: f32,
}

impl CalibrationPair {
    pub const fn new(count: u16, celsius: f32) -> Self {
        Self { count, celsius }
    }
}

//==================================================================================CALIBRATION_SOURCE
/// Provider of the two calibration points, read once per acquisition.
pub trait CalibrationSource {
    /// Returns `(low, high)`.
    fn pairs(&self) -> (CalibrationPair, CalibrationPair);
}

/// Calibration points captured at initialization.
///
/// On hardware the counts are typically copied out of the factory-programmed
/// system memory once at boot and handed to the node through this type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FactoryCalibration {
    low: CalibrationPair,
    high: CalibrationPair,
}

impl FactoryCalibration {
    /// Counts measured by the factory at 30 °C and 110 °C.
    pub const fn new(cal_30: u16, cal_110: u16) -> Self {
        Self {
            low: CalibrationPair::new(cal_30, LOW_REFERENCE_CELSIUS),
            high: CalibrationPair::new(cal_110, HIGH_REFERENCE_CELSIUS),
        }
    }

    /// Arbitrary reference points.
    pub const fn from_pairs(low: CalibrationPair, high: CalibrationPair) -> Self {
        Self { low, high }
    }

    /// `false` when both counts are equal and no slope can be derived.
    pub fn is_valid(&self) -> bool {
        self.low.count != self.high.count
    }
}

impl CalibrationSource for FactoryCalibration {
    fn pairs(&self) -> (CalibrationPair, CalibrationPair) {
        (self.low, self.high)
    }
}

impl<T: CalibrationSource + ?Sized> CalibrationSource for &T {
    fn pairs(&self) -> (CalibrationPair, CalibrationPair) {
        (**self).pairs()
    }
}

//==================================================================================CONVERSIONS
/// Linear interpolation of `raw` between the two calibration points.
///
/// Returns [`FALLBACK_CELSIUS`] when `high.count == low.count`.
pub fn to_celsius(raw: RawSample, low: CalibrationPair, high: CalibrationPair) -> f32 {
    if high.count == low.count {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Degenerate calibration (count {}), using fallback",
            low.count
        );
        return FALLBACK_CELSIUS;
    }

    let slope = (high.celsius - low.celsius) / (high.count as f32 - low.count as f32);
    // Signed offset: raw counts below the low point are valid and extrapolate.
    let offset = raw.count() as i32 - low.count as i32;
    slope * offset as f32 + low.celsius
}

/// Tenths of a degree, truncated toward zero.
///
/// Out-of-range values saturate at the `i16` bounds and NaN maps to 0.
pub fn to_deci_celsius(celsius: f32) -> i16 {
    (celsius * 10.0) as i16
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
