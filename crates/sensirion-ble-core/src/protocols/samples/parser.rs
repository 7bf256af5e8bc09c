use log::debug;

use super::error::SampleError;
use super::layout::SampleLayout;
use super::reader::SampleReader;
use crate::{DecoderConfig, Reading};

/// Decodes a sample payload with the default configuration.
///
/// Unknown sample types yield an empty vector. A payload that ends before
/// the last field of the layout fails as a whole with
/// [`SampleError::TooShort`]; no partial readings are returned. Bytes after
/// the last field are ignored.
///
/// # Examples
/// ```
/// use sensirion_ble_core::{Quantity, decode_samples};
///
/// let readings = decode_samples(34, &[0xE8, 0x03])?;
/// assert_eq!(readings.len(), 1);
/// assert_eq!(readings[0].quantity, Quantity::Co2);
/// assert_eq!(readings[0].value, 1000.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_samples(sample_type: u8, payload: &[u8]) -> Result<Vec<Reading>, SampleError> {
    decode_samples_with_config(sample_type, payload, &DecoderConfig::default())
}

pub fn decode_samples_with_config(
    sample_type: u8,
    payload: &[u8],
    config: &DecoderConfig,
) -> Result<Vec<Reading>, SampleError> {
    let Some(layout) = config.resolve_layout(sample_type) else {
        debug!("advertisement sample type {} not supported", sample_type);
        return Ok(Vec::new());
    };
    decode_layout(layout, payload, config.extended_fields)
}

/// Decodes `payload` against an explicit layout.
pub fn decode_layout(
    layout: &SampleLayout,
    payload: &[u8],
    extended: bool,
) -> Result<Vec<Reading>, SampleError> {
    let reader = SampleReader::new(payload);
    if let Err(err) = reader.require_len(layout.required_len(extended)) {
        debug!("{} payload rejected: {}", layout.name, err);
        return Err(err);
    }

    let mut readings = Vec::with_capacity(layout.fields.len());
    for field in layout.active_fields(extended) {
        let raw = reader.read_u16_le(field.offset)?;
        readings.push(Reading::new(field.quantity, field.conversion.apply(raw)));
    }
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::{decode_layout, decode_samples, decode_samples_with_config};
    use crate::protocols::samples::error::SampleError;
    use crate::protocols::samples::layout::{self, FIELD_LEN, SAMPLE_TYPES};
    use crate::{DecoderConfig, Quantity, Unit};

    fn payload(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    #[test]
    fn decode_t_rh_voc() {
        let readings = decode_samples(3, &payload(&[0x8000, 1000, 100])).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].quantity, Quantity::Temperature);
        assert_eq!(readings[0].unit, Unit::Celsius);
        assert_eq!(readings[0].value, 42.5);
        assert_eq!(readings[1].quantity, Quantity::Humidity);
        assert_eq!(readings[1].unit, Unit::Percent);
        assert_eq!(readings[1].value, 1.53);
        assert_eq!(readings[2].quantity, Quantity::VolatileOrganicCompounds);
        assert_eq!(readings[2].unit, Unit::MicrogramsPerCubicMeter);
        assert_eq!(readings[2].value, 100.0);
    }

    #[test]
    fn every_tag_decodes_at_exact_length() {
        for (tag, layout) in SAMPLE_TYPES {
            let len = layout.required_len(false);
            let readings = decode_samples(*tag, &vec![0x11; len]).unwrap();
            let expected = layout.fields.iter().filter(|f| !f.extended).count();
            assert_eq!(readings.len(), expected, "sample type {}", tag);
        }
    }

    #[test]
    fn every_tag_rejects_one_byte_short() {
        for (tag, layout) in SAMPLE_TYPES {
            let len = layout.required_len(false);
            let err = decode_samples(*tag, &vec![0x11; len - 1]).unwrap_err();
            assert_eq!(
                err,
                SampleError::TooShort {
                    needed: len,
                    actual: len - 1
                },
                "sample type {}",
                tag
            );
        }
    }

    #[test]
    fn tag_12_one_byte_short_fails_whole_decode() {
        let mut bytes = payload(&[0x8000, 1000, 800, 0x0100]);
        bytes.pop();
        let err = decode_samples(12, &bytes).unwrap_err();
        assert_eq!(err, SampleError::TooShort { needed: 8, actual: 7 });
    }

    #[test]
    fn unknown_tag_is_empty() {
        assert!(decode_samples(255, &[0u8; 16]).unwrap().is_empty());
        assert!(decode_samples(0, &[]).unwrap().is_empty());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let readings = decode_samples(34, &[0x90, 0x01, 0xFF, 0xFF, 0xFF]).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].value, 400.0);
    }

    #[test]
    fn tag_24_reads_pm25_after_the_gap() {
        // 0xFFFF at offset 6 must not leak into any reading.
        let readings = decode_samples(24, &payload(&[0, 0, 50, 0xFFFF, 123])).unwrap();
        let values: Vec<_> = readings.iter().map(|r| (r.quantity, r.value)).collect();
        assert_eq!(
            values,
            vec![
                (Quantity::Temperature, -45.0),
                (Quantity::Humidity, 0.0),
                (Quantity::VolatileOrganicCompounds, 50.0),
                (Quantity::Pm25, 12.3),
            ]
        );
    }

    #[test]
    fn tag_6_uses_alternate_humidity_scaling() {
        let readings = decode_samples(6, &payload(&[0, 0xFFFF])).unwrap();
        assert_eq!(readings[1].value, 119.0);
    }

    #[test]
    fn tag_32_decodes_climate_fields() {
        let readings = decode_samples(32, &payload(&[0x8000, 1000, 612, 90, 55])).unwrap();
        let quantities: Vec<_> = readings.iter().map(|r| r.quantity).collect();
        assert_eq!(
            quantities,
            vec![
                Quantity::Temperature,
                Quantity::Humidity,
                Quantity::Co2,
                Quantity::VolatileOrganicCompounds,
                Quantity::Pm25,
            ]
        );
        assert_eq!(readings[4].value, 5.5);
    }

    #[test]
    fn extended_fields_add_formaldehyde() {
        let config = DecoderConfig::default().with_extended_fields(true);
        let bytes = payload(&[0x8000, 1000, 100]);
        let readings = decode_samples_with_config(14, &bytes, &config).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[2].quantity, Quantity::Formaldehyde);
        assert_eq!(readings[2].unit, Unit::PartsPerBillion);
        assert_eq!(readings[2].value, 20.0);

        // Without the flag the same payload only needs four bytes.
        assert_eq!(decode_samples(14, &bytes[..4]).unwrap().len(), 2);
        assert!(decode_samples_with_config(14, &bytes[..4], &config).is_err());
    }

    #[test]
    fn particulate_layout_by_override() {
        let config = DecoderConfig::default().with_layout_override(32, "pm1_pm2p5_pm4_pm10");
        let readings = decode_samples_with_config(32, &payload(&[3, 5, 7, 9]), &config).unwrap();
        let values: Vec<_> = readings.iter().map(|r| (r.quantity, r.value)).collect();
        assert_eq!(
            values,
            vec![
                (Quantity::Pm1, 3.0),
                (Quantity::Pm25, 5.0),
                (Quantity::Pm10, 9.0),
            ]
        );
    }

    #[test]
    fn decode_layout_reports_required_length() {
        let err = decode_layout(&layout::PM1_PM2P5_PM4_PM10, &[0; 4], true).unwrap_err();
        assert_eq!(
            err,
            SampleError::TooShort {
                needed: 4 * FIELD_LEN,
                actual: 4
            }
        );
    }

    #[test]
    fn decoding_is_idempotent() {
        let bytes = payload(&[0x6543, 0x9876, 812, 77, 250]);
        let first = decode_samples(20, &bytes).unwrap();
        let second = decode_samples(20, &bytes).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.value.to_bits(), b.value.to_bits());
        }
    }
}
