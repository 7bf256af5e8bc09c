//! Sensirion BLE core library for decoding sensor advertisements.
//!
//! This crate turns the manufacturer-data block of a Sensirion gadget
//! advertisement into calibrated readings. The frame router checks the
//! envelope and extracts the device identifier; the sample decoder maps the
//! sample type to a fixed field layout (layout/reader/parser) and converts
//! each 16-bit field to its physical unit. Decoding is byte-oriented, pure and
//! stateless; discovery, naming and sensor registration stay with the caller.
//!
//! Invariants:
//! - Every advertisement is decoded independently; the same bytes always give
//!   the same result.
//! - No read goes past the supplied buffer. Short frames are errors, never
//!   panics.
//! - A reading's (quantity, unit) pair is unique within one advertisement.
//!
//! Version française (résumé):
//! Cette crate décode les données fabricant des capteurs Sensirion BLE :
//! routeur d'enveloppe -> décodeur de champs (layout/reader/parser) ->
//! mesures physiques arrondies à deux décimales. Aucun état, aucune E/S.
//!
//! # Examples
//! ```
//! use sensirion_ble_core::{Quantity, route};
//!
//! let raw = [0x00, 0x08, 0x01, 0x02, 0x00, 0x80, 0x00, 0x80, 0x20, 0x03];
//! let decoded = route(&raw)?.expect("supported frame");
//! assert_eq!(decoded.value(Quantity::Co2), Some(800.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod config;
pub mod hex;
pub mod protocols;
mod report;

pub use config::{ConfigError, DecoderConfig};
pub use protocols::frame::error::FrameError;
pub use protocols::frame::layout::{COMPANY_IDENTIFIER, MANUFACTURER};
pub use protocols::frame::{route, route_manufacturer_data, route_with_config};
pub use protocols::samples::conversion::Conversion;
pub use protocols::samples::error::SampleError;
pub use protocols::samples::layout::{
    FieldSpec, SAMPLE_TYPES, SampleLayout, UNBOUND_LAYOUTS, layout_by_name, lookup,
};
pub use protocols::samples::{decode_layout, decode_samples, decode_samples_with_config};
pub use report::{decode_company_frames, decode_frames};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Physical quantity measured by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Temperature,
    Humidity,
    Co2,
    VolatileOrganicCompounds,
    NitrousOxide,
    Pm1,
    Pm25,
    Pm4,
    Pm10,
    Formaldehyde,
}

impl Quantity {
    /// Unit every reading of this quantity is reported in.
    pub fn unit(self) -> Unit {
        match self {
            Quantity::Temperature => Unit::Celsius,
            Quantity::Humidity => Unit::Percent,
            Quantity::Co2 => Unit::PartsPerMillion,
            Quantity::Formaldehyde => Unit::PartsPerBillion,
            Quantity::VolatileOrganicCompounds
            | Quantity::NitrousOxide
            | Quantity::Pm1
            | Quantity::Pm25
            | Quantity::Pm4
            | Quantity::Pm10 => Unit::MicrogramsPerCubicMeter,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Humidity => "humidity",
            Quantity::Co2 => "co2",
            Quantity::VolatileOrganicCompounds => "volatile_organic_compounds",
            Quantity::NitrousOxide => "nitrous_oxide",
            Quantity::Pm1 => "pm1",
            Quantity::Pm25 => "pm25",
            Quantity::Pm4 => "pm4",
            Quantity::Pm10 => "pm10",
            Quantity::Formaldehyde => "formaldehyde",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of measurement, serialized as its symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "ppm")]
    PartsPerMillion,
    #[serde(rename = "ppb")]
    PartsPerBillion,
    #[serde(rename = "µg/m³")]
    MicrogramsPerCubicMeter,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Percent => "%",
            Unit::PartsPerMillion => "ppm",
            Unit::PartsPerBillion => "ppb",
            Unit::MicrogramsPerCubicMeter => "µg/m³",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One decoded value keyed by its quantity and unit.
///
/// # Examples
/// ```
/// use sensirion_ble_core::{Quantity, Reading, Unit};
///
/// let reading = Reading::new(Quantity::Humidity, 48.25);
/// assert_eq!(reading.unit, Unit::Percent);
/// assert_eq!(reading.to_string(), "humidity: 48.25 %");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub quantity: Quantity,
    pub unit: Unit,
    /// Finite, rounded to two decimals.
    pub value: f64,
}

impl Reading {
    pub fn new(quantity: Quantity, value: f64) -> Self {
        Self {
            quantity,
            unit: quantity.unit(),
            value,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2} {}", self.quantity, self.value, self.unit)
    }
}

/// Result of routing one supported advertisement.
///
/// The caller combines `identifier` with the advertised local name to build
/// a device name, and registers each reading under [`MANUFACTURER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedAdvertisement {
    /// Upper-case hex of the two identifier bytes, in wire order.
    pub identifier: String,
    /// Sample type tag read from the frame.
    pub sample_type: u8,
    /// Name of the layout used for the payload.
    pub layout: String,
    /// Readings in layout order.
    pub readings: Vec<Reading>,
}

impl DecodedAdvertisement {
    /// Value reported for `quantity`, if the layout carries it.
    pub fn value(&self, quantity: Quantity) -> Option<f64> {
        self.readings
            .iter()
            .find(|reading| reading.quantity == quantity)
            .map(|reading| reading.value)
    }

    /// (quantity, unit, value) triples, the shape sensor registries expect.
    pub fn triples(&self) -> impl Iterator<Item = (Quantity, Unit, f64)> + '_ {
        self.readings
            .iter()
            .map(|reading| (reading.quantity, reading.unit, reading.value))
    }
}

/// Batch decoding report with one entry per input frame, in input order.
///
/// # Examples
/// ```
/// use sensirion_ble_core::{DecoderConfig, decode_frames};
///
/// let report = decode_frames(&[vec![0x00, 0x22, 0x00, 0x01, 0x90, 0x01]], &DecoderConfig::default());
/// assert_eq!(report.report_version, sensirion_ble_core::REPORT_VERSION);
/// assert_eq!(report.summary.decoded, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Options the frames were decoded with.
    pub config: DecoderConfig,
    /// Per-frame results.
    pub frames: Vec<FrameResult>,
    /// Status counts over `frames`.
    pub summary: ReportSummary,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Outcome category of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    Decoded,
    NotSupported,
    Malformed,
}

/// Decoding result for a single frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameResult {
    /// Zero-based position in the input.
    pub index: usize,
    /// Input bytes as upper-case hex.
    pub input_hex: String,
    pub status: FrameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertisement: Option<DecodedAdvertisement>,
    /// Error message for malformed frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-status frame counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub frames_total: u64,
    pub decoded: u64,
    pub not_supported: u64,
    pub malformed: u64,
}

/// Build an empty report with base fields filled.
pub fn make_stub_report(config: &DecoderConfig) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "sensirion-ble".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        config: config.clone(),
        frames: vec![],
        summary: ReportSummary::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_follow_quantities() {
        assert_eq!(Quantity::Temperature.unit(), Unit::Celsius);
        assert_eq!(Quantity::Humidity.unit(), Unit::Percent);
        assert_eq!(Quantity::Co2.unit(), Unit::PartsPerMillion);
        assert_eq!(Quantity::Pm25.unit(), Unit::MicrogramsPerCubicMeter);
        assert_eq!(Quantity::NitrousOxide.unit(), Unit::MicrogramsPerCubicMeter);
        assert_eq!(Quantity::Formaldehyde.unit(), Unit::PartsPerBillion);
    }

    #[test]
    fn reading_serializes_unit_symbol() {
        let value = serde_json::to_value(Reading::new(Quantity::Temperature, 21.5))
            .expect("reading json");
        assert_eq!(value["quantity"], "temperature");
        assert_eq!(value["unit"], "°C");
        assert_eq!(value["value"], 21.5);
    }

    #[test]
    fn quantity_names_match_serde() {
        for quantity in [
            Quantity::Temperature,
            Quantity::VolatileOrganicCompounds,
            Quantity::Pm25,
            Quantity::Formaldehyde,
        ] {
            let value = serde_json::to_value(quantity).expect("quantity json");
            assert_eq!(value, quantity.as_str());
        }
    }

    #[test]
    fn advertisement_triples_keep_order() {
        let advertisement = DecodedAdvertisement {
            identifier: "ABCD".to_string(),
            sample_type: 4,
            layout: "t_rh_v1".to_string(),
            readings: vec![
                Reading::new(Quantity::Temperature, 20.0),
                Reading::new(Quantity::Humidity, 40.0),
            ],
        };
        let triples: Vec<_> = advertisement.triples().collect();
        assert_eq!(
            triples,
            vec![
                (Quantity::Temperature, Unit::Celsius, 20.0),
                (Quantity::Humidity, Unit::Percent, 40.0),
            ]
        );
        assert_eq!(advertisement.value(Quantity::Co2), None);
    }

    #[test]
    fn frame_result_omits_optional_fields_when_none() {
        let result = FrameResult {
            index: 0,
            input_hex: "01".to_string(),
            status: FrameStatus::NotSupported,
            advertisement: None,
            error: None,
        };
        let value = serde_json::to_value(&result).expect("frame json");
        assert_eq!(value["status"], "not_supported");
        assert!(value.get("advertisement").is_none());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn stub_report_is_empty() {
        let report = make_stub_report(&DecoderConfig::default());
        assert_eq!(report.report_version, REPORT_VERSION);
        assert!(report.frames.is_empty());
        assert_eq!(report.summary, ReportSummary::default());
    }
}
