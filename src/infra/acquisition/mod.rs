//! Single-shot acquisition of the on-die temperature sensor.
//!
//! The converter is driven through [`TemperatureSensor`]: start a conversion,
//! wait for it with a bounded [`TemperatureSensor::poll`], read the count,
//! stop. A conversion that never completes degrades to a zero count instead of
//! an error so that the telemetry cycle keeps running; the returned
//! [`AcquisitionStatus`] tells the caller which path was taken.
use crate::core::{Acquisition, AcquisitionStatus, RawSample, TemperatureReading};
use crate::infra::calibration::{to_celsius, to_deci_celsius, CalibrationSource};

/// Upper bound for one conversion (ms).
pub const ACQUISITION_TIMEOUT_MS: u32 = 100;

/// Result of a bounded wait for end of conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollStatus {
    Ready,
    TimedOut,
}

//==================================================================================SENSOR_TRAIT
/// Contract for the analog front end feeding the temperature channel.
///
/// Implementations wrap the platform ADC; tests plug a simulated converter
/// with its own clock.
pub trait TemperatureSensor {
    type Error: core::fmt::Debug;

    /// Trigger a single conversion.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Wait at most `timeout_ms` for the conversion started by [`start`](Self::start).
    fn poll(&mut self, timeout_ms: u32) -> PollStatus;

    /// Converted count. Only meaningful after `poll` returned [`PollStatus::Ready`].
    fn read(&mut self) -> u16;

    /// Release the converter. Called after every successful `start`.
    fn stop(&mut self);
}

impl<T: TemperatureSensor + ?Sized> TemperatureSensor for &mut T {
    type Error = T::Error;

    fn start(&mut self) -> Result<(), Self::Error> {
        (**self).start()
    }

    fn poll(&mut self, timeout_ms: u32) -> PollStatus {
        (**self).poll(timeout_ms)
    }

    fn read(&mut self) -> u16 {
        (**self).read()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Run one conversion with the default bound.
pub fn acquire_raw<S: TemperatureSensor>(sensor: &mut S) -> Acquisition {
    acquire_raw_with_timeout(sensor, ACQUISITION_TIMEOUT_MS)
}

/// Run one conversion, waiting at most `timeout_ms`.
///
/// Failure to start or to complete yields a zero count. The zero is
/// indistinguishable from a genuine reading on the wire; check
/// [`Acquisition::status`] to tell them apart.
pub fn acquire_raw_with_timeout<S: TemperatureSensor>(
    sensor: &mut S,
    timeout_ms: u32,
) -> Acquisition {
    if let Err(_err) = sensor.start() {
        #[cfg(feature = "defmt")]
        defmt::warn!("Conversion start failed: {}", defmt::Debug2Format(&_err));
        return Acquisition {
            raw: RawSample::zero(),
            status: AcquisitionStatus::StartFailed,
        };
    }

    let acquisition = match sensor.poll(timeout_ms) {
        PollStatus::Ready => Acquisition {
            raw: RawSample::new(sensor.read()),
            status: AcquisitionStatus::Converted,
        },
        PollStatus::TimedOut => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Conversion timed out after {} ms", timeout_ms);
            Acquisition {
                raw: RawSample::zero(),
                status: AcquisitionStatus::TimedOut,
            }
        }
    };

    sensor.stop();
    acquisition
}

//==================================================================================THERMOMETER
/// Sensor paired with its calibration provider.
pub struct Thermometer<S, C> {
    sensor: S,
    calibration: C,
    timeout_ms: u32,
}

impl<S, C> Thermometer<S, C>
where
    S: TemperatureSensor,
    C: CalibrationSource,
{
    pub fn new(sensor: S, calibration: C) -> Self {
        Self {
            sensor,
            calibration,
            timeout_ms: ACQUISITION_TIMEOUT_MS,
        }
    }

    /// Override the conversion bound.
    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Acquire one sample and linearize it.
    ///
    /// Calibration pairs are fetched on every call.
    pub fn read(&mut self) -> TemperatureReading {
        let Acquisition { raw, status } =
            acquire_raw_with_timeout(&mut self.sensor, self.timeout_ms);
        let (low, high) = self.calibration.pairs();
        let celsius = to_celsius(raw, low, high);

        #[cfg(feature = "defmt")]
        defmt::trace!("raw={} celsius={}", raw.count(), celsius);

        TemperatureReading {
            raw,
            celsius,
            deci_celsius: to_deci_celsius(celsius),
            status,
        }
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn calibration(&self) -> &C {
        &self.calibration
    }

    pub fn into_parts(self) -> (S, C) {
        (self.sensor, self.calibration)
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
