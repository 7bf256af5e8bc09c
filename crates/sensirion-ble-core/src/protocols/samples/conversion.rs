//! Raw-code to physical-unit conversions.
//!
//! Each variant mirrors one `GadgetBle::_convert*` encoder of the sensor
//! firmware, run backwards. Inputs are the raw little-endian `u16` codes.

use serde::{Deserialize, Serialize};

const FULL_SCALE: f64 = 65535.0;

/// Numeric conversion applied to a single 16-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conversion {
    /// Identity (CO2 ppm, VOC/NOx indices, PM counts).
    Simple,
    TemperatureV1,
    HumidityV1,
    HumidityV2,
    Pm2p5V1,
    Pm2p5V2,
    /// Formaldehyde in ppb.
    HchoV1,
}

impl Conversion {
    /// Stable lowercase name, as shown by `sensirion-ble layouts`.
    pub fn name(self) -> &'static str {
        match self {
            Conversion::Simple => "simple",
            Conversion::TemperatureV1 => "temperature_v1",
            Conversion::HumidityV1 => "humidity_v1",
            Conversion::HumidityV2 => "humidity_v2",
            Conversion::Pm2p5V1 => "pm2p5_v1",
            Conversion::Pm2p5V2 => "pm2p5_v2",
            Conversion::HchoV1 => "hcho_v1",
        }
    }

    /// Converts a raw field value to its physical value, rounded to two
    /// decimals.
    ///
    /// # Examples
    /// ```
    /// use sensirion_ble_core::Conversion;
    ///
    /// assert_eq!(Conversion::TemperatureV1.apply(0x8000), 42.5);
    /// assert_eq!(Conversion::HumidityV1.apply(1000), 1.53);
    /// assert_eq!(Conversion::Simple.apply(100), 100.0);
    /// ```
    pub fn apply(self, raw: u16) -> f64 {
        let v = f64::from(raw);
        let value = match self {
            Conversion::Simple => v,
            Conversion::TemperatureV1 => (v / FULL_SCALE) * 175.0 - 45.0,
            Conversion::HumidityV1 => (v / FULL_SCALE) * 100.0,
            Conversion::HumidityV2 => (v * 125.0 / FULL_SCALE) - 6.0,
            Conversion::Pm2p5V1 => (v / FULL_SCALE) * 1000.0,
            Conversion::Pm2p5V2 => v / 10.0,
            Conversion::HchoV1 => v / 5.0,
        };
        round2(value)
    }

    /// Encodes a physical value the way the firmware does before
    /// broadcasting it: scale, add 0.5, truncate to `u16`.
    ///
    /// Values outside the representable range saturate at `0` or
    /// `u16::MAX`.
    pub fn to_raw(self, value: f64) -> u16 {
        let scaled = match self {
            Conversion::Simple => value,
            Conversion::TemperatureV1 => ((value + 45.0) / 175.0) * FULL_SCALE,
            Conversion::HumidityV1 => (value / 100.0) * FULL_SCALE,
            Conversion::HumidityV2 => ((value + 6.0) * FULL_SCALE) / 125.0,
            Conversion::Pm2p5V1 => (value / 1000.0) * FULL_SCALE,
            Conversion::Pm2p5V2 => value * 10.0,
            Conversion::HchoV1 => value * 5.0,
        };
        // `as` saturates for floats, and maps NaN to 0.
        (scaled + 0.5) as u16
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
