//! Acquisition tests driven by a simulated converter with its own clock.
use super::*;
use crate::infra::calibration::{CalibrationPair, FactoryCalibration};

/// Converter that needs `conversion_ms` to complete and tracks elapsed time.
struct SimulatedAdc {
    count: u16,
    conversion_ms: u32,
    refuse_start: bool,
    elapsed_ms: u32,
    running: bool,
    starts: u32,
    stops: u32,
}

impl SimulatedAdc {
    fn new(count: u16, conversion_ms: u32) -> Self {
        Self {
            count,
            conversion_ms,
            refuse_start: false,
            elapsed_ms: 0,
            running: false,
            starts: 0,
            stops: 0,
        }
    }
}

impl TemperatureSensor for SimulatedAdc {
    type Error = ();

    fn start(&mut self) -> Result<(), Self::Error> {
        if self.refuse_start {
            return Err(());
        }
        self.running = true;
        self.starts += 1;
        Ok(())
    }

    fn poll(&mut self, timeout_ms: u32) -> PollStatus {
        if self.conversion_ms <= timeout_ms {
            self.elapsed_ms += self.conversion_ms;
            PollStatus::Ready
        } else {
            self.elapsed_ms += timeout_ms;
            PollStatus::TimedOut
        }
    }

    fn read(&mut self) -> u16 {
        self.count
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }
}

//==================================================================================ACQUIRE_RAW
#[test]
/// A conversion completing within the bound returns the converter count.
fn test_acquire_converted() {
    let mut adc = SimulatedAdc::new(1234, 5);
    let acquisition = acquire_raw(&mut adc);
    assert_eq!(acquisition.raw.count(), 1234);
    assert_eq!(acquisition.status, AcquisitionStatus::Converted);
    assert!(!acquisition.status.is_degraded());
    assert_eq!(adc.elapsed_ms, 5);
    assert!(!adc.running, "converter must be stopped");
}

#[test]
/// A stalled conversion blocks for exactly the bound and degrades to zero.
fn test_acquire_timeout_returns_zero() {
    let mut adc = SimulatedAdc::new(1234, 250);
    let acquisition = acquire_raw(&mut adc);
    assert_eq!(acquisition.raw, RawSample::zero());
    assert_eq!(acquisition.status, AcquisitionStatus::TimedOut);
    assert!(acquisition.status.is_degraded());
    assert_eq!(adc.elapsed_ms, ACQUISITION_TIMEOUT_MS);
    assert_eq!(adc.stops, 1, "timed out conversion must still be stopped");
}

#[test]
/// A conversion that takes exactly the bound still counts as ready.
fn test_acquire_at_bound() {
    let mut adc = SimulatedAdc::new(42, ACQUISITION_TIMEOUT_MS);
    assert_eq!(acquire_raw(&mut adc).status, AcquisitionStatus::Converted);
}

#[test]
/// A converter refusing to start is never stopped and yields zero.
fn test_acquire_start_failure() {
    let mut adc = SimulatedAdc::new(1234, 5);
    adc.refuse_start = true;
    let acquisition = acquire_raw(&mut adc);
    assert_eq!(acquisition.raw.count(), 0);
    assert_eq!(acquisition.status, AcquisitionStatus::StartFailed);
    assert_eq!(adc.stops, 0);
}

#[test]
/// Driver counts above 12 bits are clamped.
fn test_acquire_clamps_counts() {
    let mut adc = SimulatedAdc::new(0xFFFF, 1);
    assert_eq!(acquire_raw(&mut adc).raw.count(), 4095);
}

//==================================================================================THERMOMETER
#[test]
/// Reading combines acquisition, calibration, and truncation.
fn test_thermometer_reading() {
    let adc = SimulatedAdc::new(1250, 5);
    let mut thermometer = Thermometer::new(adc, FactoryCalibration::new(1000, 1500));
    let reading = thermometer.read();
    assert_eq!(reading.raw.count(), 1250);
    assert_eq!(reading.celsius, 70.0);
    assert_eq!(reading.deci_celsius, 700);
    assert_eq!(reading.status, AcquisitionStatus::Converted);
}

#[test]
/// Timeout is calibrated like a real zero count: a plausible but very low value.
fn test_thermometer_timeout_reads_as_zero_count() {
    let adc = SimulatedAdc::new(1250, 500);
    let mut thermometer = Thermometer::new(adc, FactoryCalibration::new(1000, 1500));
    let reading = thermometer.read();
    assert_eq!(reading.raw.count(), 0);
    assert_eq!(reading.celsius, -130.0);
    assert_eq!(reading.deci_celsius, -1300);
    assert_eq!(reading.status, AcquisitionStatus::TimedOut);
}

#[test]
/// A custom bound is forwarded to the converter.
fn test_thermometer_custom_timeout() {
    let adc = SimulatedAdc::new(1250, 50);
    let mut thermometer =
        Thermometer::new(adc, FactoryCalibration::new(1000, 1500)).with_timeout(10);
    assert_eq!(thermometer.read().status, AcquisitionStatus::TimedOut);
    assert_eq!(thermometer.sensor_mut().elapsed_ms, 10);
}

#[test]
/// Degenerate calibration reports the nominal fallback.
fn test_thermometer_degenerate_calibration() {
    let adc = SimulatedAdc::new(3000, 5);
    let calibration = FactoryCalibration::from_pairs(
        CalibrationPair::new(1500, 30.0),
        CalibrationPair::new(1500, 110.0),
    );
    let mut thermometer = Thermometer::new(adc, calibration);
    let reading = thermometer.read();
    assert_eq!(reading.celsius, 25.0);
    assert_eq!(reading.deci_celsius, 250);
}
