//! Plain data types exchanged between the acquisition layer, the encoders,
//! and the telemetry node. Nothing in here talks to hardware.

/// Highest count a 12-bit converter can report.
pub const MAX_RAW_COUNT: u16 = 0x0FFF;

/// Temperature assumed when the calibration pairs cannot define a slope.
pub const FALLBACK_CELSIUS: f32 = 25.0;

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

//==================================================================================RAW_SAMPLE
/// Unsigned converter count in `[0, 4095]`, produced once per acquisition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample(u16);

impl RawSample {
    /// Wraps a driver count, clamping anything above the 12-bit range.
    pub const fn new(count: u16) -> Self {
        if count > MAX_RAW_COUNT {
            Self(MAX_RAW_COUNT)
        } else {
            Self(count)
        }
    }

    /// Degraded sample reported when no conversion completed.
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn count(&self) -> u16 {
        self.0
    }
}

//==================================================================================ACQUISITION_STATUS
/// Outcome of one single-shot conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquisitionStatus {
    /// Conversion completed within the bounded wait.
    Converted,
    /// Conversion was started but did not complete in time; the sample reads 0.
    TimedOut,
    /// The converter refused to start; the sample reads 0.
    StartFailed,
}

impl AcquisitionStatus {
    /// `true` when the sample is the degraded zero rather than a real count.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, AcquisitionStatus::Converted)
    }
}

/// Raw sample paired with the path that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acquisition {
    pub raw: RawSample,
    pub status: AcquisitionStatus,
}

//==================================================================================TEMPERATURE_READING
/// Calibrated temperature computed for one cycle. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    /// Count the reading was derived from.
    pub raw: RawSample,
    /// Linearized temperature in degrees Celsius.
    pub celsius: f32,
    /// `celsius * 10`, truncated toward zero.
    pub deci_celsius: i16,
    /// How the raw count was obtained.
    pub status: AcquisitionStatus,
}
