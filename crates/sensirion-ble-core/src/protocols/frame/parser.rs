use log::debug;

use super::error::FrameError;
use super::layout;
use super::reader::FrameReader;
use crate::protocols::samples::decode_layout;
use crate::{DecodedAdvertisement, DecoderConfig};

/// Routes a manufacturer-data block with the default configuration.
///
/// `Ok(None)` means the advertisement is not supported: the envelope marker
/// is unknown, or the sample type has no layout. Errors are reserved for
/// malformed frames.
///
/// # Examples
/// ```
/// use sensirion_ble_core::{Quantity, route};
///
/// let raw = [0x00, 0x03, 0xAB, 0xCD, 0x00, 0x80, 0xE8, 0x03, 0x64, 0x00];
/// let decoded = route(&raw)?.expect("supported frame");
/// assert_eq!(decoded.identifier, "ABCD");
/// assert_eq!(decoded.value(Quantity::Temperature), Some(42.5));
/// assert_eq!(decoded.value(Quantity::Humidity), Some(1.53));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn route(raw: &[u8]) -> Result<Option<DecodedAdvertisement>, FrameError> {
    route_with_config(raw, &DecoderConfig::default())
}

pub fn route_with_config(
    raw: &[u8],
    config: &DecoderConfig,
) -> Result<Option<DecodedAdvertisement>, FrameError> {
    if raw.is_empty() {
        return Err(FrameError::Empty);
    }
    let reader = FrameReader::new(raw);

    let marker = reader.read_u8(layout::MARKER_OFFSET)?;
    if marker != layout::ADVERTISEMENT_MARKER {
        debug!("data format not supported: marker {:#04x}", marker);
        return Ok(None);
    }

    reader.require_len(layout::HEADER_LEN)?;
    let sample_type = reader.read_u8(layout::SAMPLE_TYPE_OFFSET)?;
    let identifier = reader.read_identifier_hex()?;
    let payload = reader.payload()?;

    let Some(sample_layout) = config.resolve_layout(sample_type) else {
        debug!("advertisement sample type {} not supported", sample_type);
        return Ok(None);
    };
    let readings = decode_layout(sample_layout, payload, config.extended_fields)?;
    if readings.is_empty() {
        return Ok(None);
    }

    Ok(Some(DecodedAdvertisement {
        identifier,
        sample_type,
        layout: sample_layout.name.to_string(),
        readings,
    }))
}

/// Routes manufacturer data only when it was published under Sensirion's
/// company identifier.
pub fn route_manufacturer_data(
    company_id: u16,
    raw: &[u8],
    config: &DecoderConfig,
) -> Result<Option<DecodedAdvertisement>, FrameError> {
    if company_id != layout::COMPANY_IDENTIFIER {
        debug!("manufacturer id {:#06x} not handled", company_id);
        return Ok(None);
    }
    route_with_config(raw, config)
}
