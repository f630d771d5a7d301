//! Unit tests for the linearization helpers.
use super::*;

const LOW: CalibrationPair = CalibrationPair::new(1000, 30.0);
const HIGH: CalibrationPair = CalibrationPair::new(1500, 110.0);
const MAX_RAW: u16 = crate::core::MAX_RAW_COUNT;

fn within(a: f32, b: f32, tolerance: f32) -> bool {
    let delta = a - b;
    delta < tolerance && delta > -tolerance
}

fn approx(a: f32, b: f32) -> bool {
    within(a, b, 1e-3)
}

//==================================================================================TO_CELSIUS
#[test]
/// Reference points map back onto their own temperatures.
fn test_reference_points() {
    assert!(approx(to_celsius(RawSample::new(1000), LOW, HIGH), 30.0));
    assert!(approx(to_celsius(RawSample::new(1500), LOW, HIGH), 110.0));
    assert!(approx(to_celsius(RawSample::new(1250), LOW, HIGH), 70.0));
}

#[test]
/// Counts below the low point extrapolate with a signed offset.
fn test_extrapolates_below_low_point() {
    // slope = 80 / 500 = 0.16 °C per count
    assert!(approx(to_celsius(RawSample::zero(), LOW, HIGH), -130.0));
    assert!(approx(to_celsius(RawSample::new(4095), LOW, HIGH), 525.2));
}

#[test]
/// Over the whole 12-bit range the map is affine and strictly increasing.
fn test_affine_and_monotonic_over_full_range() {
    let mut previous = to_celsius(RawSample::zero(), LOW, HIGH);
    for raw in 1..=MAX_RAW {
        let current = to_celsius(RawSample::new(raw), LOW, HIGH);
        assert!(current > previous, "not increasing at raw {raw}");
        let expected = 0.16 * (raw as f32 - 1000.0) + 30.0;
        assert!(within(current, expected, 1e-2), "not affine at raw {raw}");
        previous = current;
    }
}

#[test]
/// A negative slope yields a strictly decreasing map.
fn test_negative_slope_is_decreasing() {
    let low = CalibrationPair::new(1000, 110.0);
    let high = CalibrationPair::new(1500, 30.0);
    let mut previous = to_celsius(RawSample::zero(), low, high);
    for raw in (0..=MAX_RAW).step_by(7).skip(1) {
        let current = to_celsius(RawSample::new(raw), low, high);
        assert!(current < previous, "not decreasing at raw {raw}");
        previous = current;
    }
}

#[test]
/// Equal counts fall back to nominal ambient for every raw value.
fn test_degenerate_calibration_fallback() {
    let low = CalibrationPair::new(1200, 30.0);
    let high = CalibrationPair::new(1200, 110.0);
    for raw in [0, 1, 1200, 2048, 4095] {
        assert_eq!(to_celsius(RawSample::new(raw), low, high), 25.0);
    }
    assert!(!FactoryCalibration::from_pairs(low, high).is_valid());
}

//==================================================================================TO_DECI_CELSIUS
#[test]
/// Decicelsius truncates instead of rounding.
fn test_deci_celsius_truncates() {
    assert_eq!(to_deci_celsius(25.03), 250);
    assert_eq!(to_deci_celsius(25.09), 250);
    assert_eq!(to_deci_celsius(25.5), 255);
}

#[test]
/// Truncation goes toward zero for negative values, not toward minus infinity.
fn test_deci_celsius_toward_zero() {
    assert_eq!(to_deci_celsius(-0.09), 0);
    assert_eq!(to_deci_celsius(-12.37), -123);
}

#[test]
/// Values outside the `i16` range saturate.
fn test_deci_celsius_saturates() {
    assert_eq!(to_deci_celsius(5000.0), i16::MAX);
    assert_eq!(to_deci_celsius(-5000.0), i16::MIN);
    assert_eq!(to_deci_celsius(f32::NAN), 0);
}

//==================================================================================FACTORY_CALIBRATION
#[test]
/// Factory constructor pins the counts to the 30 °C / 110 °C references.
fn test_factory_calibration_pairs() {
    let calibration = FactoryCalibration::new(1000, 1500);
    let (low, high) = calibration.pairs();
    assert_eq!(low, CalibrationPair::new(1000, LOW_REFERENCE_CELSIUS));
    assert_eq!(high, CalibrationPair::new(1500, HIGH_REFERENCE_CELSIUS));
    assert!(calibration.is_valid());
}
